use std::sync::Arc;

use cube_core::{
    Face, Move, MoveCatalog, Puzzle, Scrambler, Sticker, StickerGrid, apply, apply_sequence,
    parse_move, parse_sequence,
};
use fastrand::Rng;
use pretty_assertions::assert_eq;

const SOLVED: &str = "000000000111111111222222222333333333444444444555555555";

fn scrambled(catalog: &MoveCatalog, seed: u64) -> StickerGrid {
    Scrambler::new(catalog)
        .unwrap()
        .scramble(&StickerGrid::solved(), &mut Rng::with_seed(seed), 30)
}

fn run(catalog: &MoveCatalog, grid: &StickerGrid, alg: &str) -> StickerGrid {
    apply_sequence(grid, &parse_sequence(catalog, alg).unwrap())
}

fn order(catalog: &MoveCatalog, key: &str) -> usize {
    let move_ = parse_move(catalog, key).unwrap();
    let start = scrambled(catalog, 5);
    let mut grid = apply(&start, &move_);
    let mut count = 1;
    while grid != start {
        grid = apply(&grid, &move_);
        count += 1;
        assert!(count <= 1260, "{key} never returns");
    }
    count
}

#[test_log::test]
fn quarter_turns_have_order_four() {
    let catalog = MoveCatalog::standard().unwrap();

    for key in ["F", "U", "R", "L", "D", "B", "M", "E", "S", "Rw", "Bw", "x", "y", "z"] {
        let quarter = parse_move(&catalog, key).unwrap();
        for seed in [1, 2, 3] {
            let start = scrambled(&catalog, seed);
            let moved = apply(&start, &quarter);
            assert_ne!(moved, start, "{key}");
            let back = (0..3).fold(moved, |grid, _| apply(&grid, &quarter));
            assert_eq!(back, start, "{key}");
        }
    }
}

#[test_log::test]
fn canned_algorithm_orders() {
    let catalog = MoveCatalog::standard().unwrap();

    assert_eq!(order(&catalog, "Tperm"), 2);
    assert_eq!(order(&catalog, "Superflip"), 2);
    assert_eq!(order(&catalog, "Sexy"), 6);
}

#[test_log::test]
fn reverse_undoes_forward() {
    let catalog = MoveCatalog::standard().unwrap();
    let start = scrambled(&catalog, 9);

    for def in catalog.iter() {
        for token in [
            def.key().to_owned(),
            format!("{}'", def.key()),
            format!("{}2", def.key()),
            format!("{}3'", def.key()),
            format!("{}17", def.key()),
        ] {
            let move_ = parse_move(&catalog, &token).unwrap();
            let there = apply(&start, &move_);
            assert_eq!(apply(&there, &move_.inverse()), start, "{token}");
        }
    }
}

#[test_log::test]
fn moves_only_permute_stickers() {
    let catalog = MoveCatalog::standard().unwrap();

    for def in catalog.iter() {
        let grid = apply(&StickerGrid::solved(), &Move::quarter(Arc::clone(def)));
        for color in Sticker::ALL {
            assert_eq!(
                grid.stickers().iter().filter(|&&s| s == color).count(),
                9,
                "{}",
                def.key()
            );
        }
    }
}

#[test_log::test]
fn sexy_move_returns_after_six() {
    let catalog = MoveCatalog::standard().unwrap();
    let mut puzzle = Puzzle::from_grid(SOLVED.parse().unwrap());

    // The commutator has order 6, so four repetitions still leave the cube scrambled. See the
    // "R U R' U' four times" entry in DESIGN.md.
    for i in 1..=6 {
        puzzle.perform(&catalog, "R U R' U'").unwrap();
        assert_eq!(puzzle.is_solved(), i == 6, "after {i} repetitions");
    }

    assert_eq!(puzzle.grid().encode(), SOLVED);
}

#[test_log::test]
fn canned_algorithms_match_their_sequences() {
    let catalog = MoveCatalog::standard().unwrap();

    for (key, alg) in [
        ("Tperm", "R U R' U' R' F R2 U' R' U' R U R' F'"),
        ("Sexy", "R U R' U'"),
        (
            "Superflip",
            "U R2 F B R B2 R U2 L B2 R U' D' R2 F R' L B2 U2 F2",
        ),
    ] {
        for seed in [11, 12] {
            let start = scrambled(&catalog, seed);
            assert_eq!(run(&catalog, &start, key), run(&catalog, &start, alg), "{key}");
        }
    }
}

#[test_log::test]
fn wide_turns_pair_face_and_slice() {
    let catalog = MoveCatalog::standard().unwrap();

    // The slice goes backwards for Rw, Uw and Bw and forwards for Lw, Dw and Fw
    for (wide, alg) in [
        ("Rw", "R M'"),
        ("Lw", "L M"),
        ("Uw", "U E'"),
        ("Dw", "D E"),
        ("Fw", "F S"),
        ("Bw", "B S'"),
    ] {
        let start = scrambled(&catalog, 21);
        assert_eq!(run(&catalog, &start, wide), run(&catalog, &start, alg), "{wide}");
    }

    let start = scrambled(&catalog, 22);
    assert_ne!(run(&catalog, &start, "Rw"), run(&catalog, &start, "R M"));
}

#[test_log::test]
fn rotations_turn_the_whole_cube() {
    let catalog = MoveCatalog::standard().unwrap();
    let solved = StickerGrid::solved();

    for (rotation, alg) in [("x", "R M' L'"), ("y", "U E' D'"), ("z", "F S B'")] {
        let start = scrambled(&catalog, 31);
        assert_eq!(
            run(&catalog, &start, rotation),
            run(&catalog, &start, alg),
            "{rotation}"
        );

        let rotated = run(&catalog, &solved, rotation);
        assert!(!rotated.is_solved());
        assert!(rotated.is_solved_up_to_rotation(), "{rotation}");
    }

    // x brings the front up, y brings the right to the front, z brings the top to the right
    let x = run(&catalog, &solved, "x");
    assert!(x.face(Face::Up).iter().all(|&s| s == Sticker::Green));
    let y = run(&catalog, &solved, "y");
    assert!(y.face(Face::Front).iter().all(|&s| s == Sticker::Red));
    let z = run(&catalog, &solved, "z");
    assert!(z.face(Face::Right).iter().all(|&s| s == Sticker::White));
}

#[test_log::test]
fn rotation_conjugates_face_turns() {
    let catalog = MoveCatalog::standard().unwrap();
    let start = scrambled(&catalog, 41);

    // Turning the front after rotating with x is turning what used to be the bottom
    assert_eq!(run(&catalog, &start, "x F x'"), run(&catalog, &start, "D"));
    assert_eq!(run(&catalog, &start, "y F y'"), run(&catalog, &start, "R"));
    assert_eq!(run(&catalog, &start, "z U z'"), run(&catalog, &start, "L"));
}

#[test_log::test]
fn opposite_faces_commute() {
    let catalog = MoveCatalog::standard().unwrap();
    let start = scrambled(&catalog, 51);

    for (a, b) in [("R", "L"), ("U", "D"), ("F", "B"), ("R", "M"), ("U", "E")] {
        assert_eq!(
            run(&catalog, &start, &format!("{a} {b}")),
            run(&catalog, &start, &format!("{b} {a}")),
        );
    }
    assert_ne!(
        run(&catalog, &start, "R U"),
        run(&catalog, &start, "U R")
    );
}
