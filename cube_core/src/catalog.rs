use std::{collections::BTreeMap, sync::Arc};

use log::debug;
use thiserror::Error;

use crate::{Cycle, Face, MoveDefinition};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Move `{key}` has a cycle with fewer than two stickers (cycle {cycle})")]
    CycleTooShort { key: String, cycle: usize },
    #[error("Move `{key}` refers to sticker {index} but the cube only has 54 stickers")]
    IndexOutOfRange { key: String, index: usize },
    #[error("Move `{key}` lists sticker {index} twice in cycle {cycle}")]
    DuplicateIndex {
        key: String,
        index: usize,
        cycle: usize,
    },
    #[error("Move `{key}` moves sticker {index} in both cycle {first} and cycle {second}")]
    OverlappingCycles {
        key: String,
        index: usize,
        first: usize,
        second: usize,
    },
    #[error("Move `{0}` is defined more than once")]
    DuplicateKey(String),
    #[error("Move `{0}` is required but missing from the catalog")]
    MissingMove(String),
}

/// The outer ring of a face relative to its offset: corners, then edges
const RING: [[usize; 4]; 2] = [[0, 2, 8, 6], [1, 5, 7, 3]];

/// Stickers on the neighbouring faces dragged along by a clockwise turn, indexed like
/// [`Face::ALL`]
const FACE_NEIGHBOURS: [[[usize; 4]; 3]; 6] = [
    // F
    [[15, 18, 38, 35], [16, 21, 37, 32], [17, 24, 36, 29]],
    // U
    [[0, 27, 45, 18], [1, 28, 46, 19], [2, 29, 47, 20]],
    // R
    [[2, 11, 51, 38], [5, 14, 48, 41], [8, 17, 45, 44]],
    // L
    [[0, 36, 53, 9], [3, 39, 50, 12], [6, 42, 47, 15]],
    // D
    [[6, 24, 51, 33], [7, 25, 52, 34], [8, 26, 53, 35]],
    // B
    [[9, 33, 44, 20], [10, 30, 43, 23], [11, 27, 42, 26]],
];

#[derive(Clone, Copy, Debug)]
enum Slice {
    /// Between L and R, turning like L
    M,
    /// Between U and D, turning like D
    E,
    /// Between F and B, turning like F
    S,
}

impl Slice {
    const ALL: [Slice; 3] = [Slice::M, Slice::E, Slice::S];

    fn key(self) -> &'static str {
        match self {
            Slice::M => "M",
            Slice::E => "E",
            Slice::S => "S",
        }
    }

    fn cycles(self) -> Vec<Cycle> {
        let stickers: [[usize; 4]; 3] = match self {
            Slice::M => [[1, 37, 52, 10], [4, 40, 49, 13], [7, 43, 46, 16]],
            Slice::E => [[3, 21, 48, 30], [4, 22, 49, 31], [5, 23, 50, 32]],
            Slice::S => [[12, 19, 41, 34], [13, 22, 40, 31], [14, 25, 39, 28]],
        };
        stickers.iter().map(|cycle| cycle.to_vec()).collect()
    }
}

fn face_cycles(face: Face) -> Vec<Cycle> {
    let offset = face.offset();

    RING.iter()
        .map(|ring| ring.iter().map(|i| offset + i).collect::<Cycle>())
        .chain(FACE_NEIGHBOURS[face.index()].iter().map(|c| c.to_vec()))
        .collect()
}

fn reversed(cycles: Vec<Cycle>) -> Vec<Cycle> {
    cycles
        .into_iter()
        .map(|mut cycle| {
            cycle.reverse();
            cycle
        })
        .collect()
}

/// Wide turns: a face together with the neighbouring slice, and whether that slice turns against
/// its own direction. Bw, Uw and Rw take the slice reversed, Lw, Dw and Fw take it as is.
const WIDE_TURNS: [(&str, Face, Slice, bool); 6] = [
    ("Fw", Face::Front, Slice::S, false),
    ("Uw", Face::Up, Slice::E, true),
    ("Rw", Face::Right, Slice::M, true),
    ("Lw", Face::Left, Slice::M, false),
    ("Dw", Face::Down, Slice::E, false),
    ("Bw", Face::Back, Slice::S, true),
];

/// Whole-cube rotations: the leading face, the middle slice, and the opposite face, each with
/// whether it is reversed.
const ROTATIONS: [(&str, (Face, bool), (Slice, bool), (Face, bool)); 3] = [
    ("x", (Face::Right, false), (Slice::M, true), (Face::Left, true)),
    ("y", (Face::Up, false), (Slice::E, true), (Face::Down, true)),
    ("z", (Face::Front, false), (Slice::S, false), (Face::Back, true)),
];

/// `R U R' U' R' F R2 U' R' U' R U R' F'`: swaps the UFR/UBR corners and the UL/UR edges
const T_PERM: [[usize; 2]; 5] = [[2, 20], [11, 17], [12, 14], [18, 45], [19, 28]];

/// `R U R' U'`
const SEXY_MOVE: [&[usize]; 4] = [
    &[2, 8, 17, 24, 18, 38],
    &[5, 14, 10],
    &[9, 20, 47, 45, 27, 11],
    &[19, 46, 21],
];

/// Every edge flipped in place
const SUPERFLIP: [[usize; 2]; 12] = [
    [1, 16],
    [3, 32],
    [5, 21],
    [7, 37],
    [10, 46],
    [12, 28],
    [14, 19],
    [23, 48],
    [25, 41],
    [30, 50],
    [34, 39],
    [43, 52],
];

fn maybe_reversed(cycles: Vec<Cycle>, reverse: bool) -> Vec<Cycle> {
    if reverse { reversed(cycles) } else { cycles }
}

/// Every built-in move, in registration order
fn standard_definitions() -> Result<Vec<MoveDefinition>, ConfigurationError> {
    let mut definitions = Vec::new();

    for face in Face::ALL {
        definitions.push(MoveDefinition::new(face.key(), face_cycles(face))?);
    }

    for slice in Slice::ALL {
        definitions.push(MoveDefinition::new(slice.key(), slice.cycles())?);
    }

    for (key, face, slice, reverse_slice) in WIDE_TURNS {
        let mut cycles = face_cycles(face);
        cycles.extend(maybe_reversed(slice.cycles(), reverse_slice));
        definitions.push(MoveDefinition::new(key, cycles)?);
    }

    for (key, (lead, lead_rev), (slice, slice_rev), (opposite, opposite_rev)) in ROTATIONS {
        let mut cycles = maybe_reversed(face_cycles(lead), lead_rev);
        cycles.extend(maybe_reversed(slice.cycles(), slice_rev));
        cycles.extend(maybe_reversed(face_cycles(opposite), opposite_rev));
        definitions.push(MoveDefinition::new(key, cycles)?);
    }

    definitions.push(MoveDefinition::new(
        "Tperm",
        T_PERM.iter().map(|c| c.to_vec()).collect(),
    )?);
    definitions.push(MoveDefinition::new(
        "Sexy",
        SEXY_MOVE.iter().map(|c| c.to_vec()).collect(),
    )?);
    definitions.push(MoveDefinition::new(
        "Superflip",
        SUPERFLIP.iter().map(|c| c.to_vec()).collect(),
    )?);

    Ok(definitions)
}

/// The registry of named moves. Keys are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct MoveCatalog {
    definitions: Vec<Arc<MoveDefinition>>,
    by_key: BTreeMap<String, usize>,
}

impl MoveCatalog {
    /// Index a set of definitions.
    ///
    /// # Errors
    ///
    /// Fails if two keys are equal ignoring case.
    pub fn new(
        definitions: impl IntoIterator<Item = MoveDefinition>,
    ) -> Result<MoveCatalog, ConfigurationError> {
        let mut catalog = MoveCatalog {
            definitions: Vec::new(),
            by_key: BTreeMap::new(),
        };

        for definition in definitions {
            let folded = definition.key().to_ascii_lowercase();
            if catalog.by_key.contains_key(&folded) {
                return Err(ConfigurationError::DuplicateKey(
                    definition.key().to_owned(),
                ));
            }

            catalog.by_key.insert(folded, catalog.definitions.len());
            catalog.definitions.push(Arc::new(definition));
        }

        debug!("Built a move catalog with {} moves", catalog.len());

        Ok(catalog)
    }

    /// The built-in catalog: face, slice, wide, rotation, and canned algorithm moves.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in tables are wrong.
    pub fn standard() -> Result<MoveCatalog, ConfigurationError> {
        MoveCatalog::new(standard_definitions()?)
    }

    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Arc<MoveDefinition>> {
        self.by_key
            .get(&key.to_ascii_lowercase())
            .map(|&idx| &self.definitions[idx])
    }

    /// Every definition in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<MoveDefinition>> {
        self.definitions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{Face, MoveDefinition};

    use super::{ConfigurationError, MoveCatalog};

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = MoveCatalog::standard().unwrap();

        assert_eq!(
            catalog.iter().map(|def| def.key()).collect_vec(),
            [
                "F",
                "U",
                "R",
                "L",
                "D",
                "B",
                "M",
                "E",
                "S",
                "Fw",
                "Uw",
                "Rw",
                "Lw",
                "Dw",
                "Bw",
                "x",
                "y",
                "z",
                "Tperm",
                "Sexy",
                "Superflip"
            ]
        );
    }

    #[test]
    fn move_shapes() {
        let catalog = MoveCatalog::standard().unwrap();
        let lengths = |key: &str| {
            catalog
                .lookup(key)
                .unwrap()
                .cycles()
                .iter()
                .map(Vec::len)
                .collect_vec()
        };

        for face in Face::ALL {
            assert_eq!(lengths(face.key()), [4; 5]);
        }
        for slice in ["M", "E", "S"] {
            assert_eq!(lengths(slice), [4; 3]);
        }
        for wide in ["Fw", "Uw", "Rw", "Lw", "Dw", "Bw"] {
            assert_eq!(lengths(wide), [4; 8]);
        }
        for rotation in ["x", "y", "z"] {
            assert_eq!(lengths(rotation), [4; 13]);
        }
        assert_eq!(lengths("Tperm"), [2; 5]);
        assert_eq!(lengths("Superflip"), [2; 12]);
        assert_eq!(lengths("Sexy"), [6, 3, 6, 3]);
    }

    #[test]
    fn slices_touch_no_face_centers_of_their_own() {
        let catalog = MoveCatalog::standard().unwrap();

        // A slice moves four centers, and none of them belong to the faces it sits between
        for (slice, untouched) in [
            ("M", [Face::Left, Face::Right]),
            ("E", [Face::Up, Face::Down]),
            ("S", [Face::Front, Face::Back]),
        ] {
            let moved = catalog.lookup(slice).unwrap().cycles().concat();
            for face in untouched {
                assert!(moved.iter().all(|i| !face.indices().contains(i)));
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let catalog = MoveCatalog::standard().unwrap();
        assert_eq!(catalog.lookup("rw").unwrap().key(), "Rw");
        assert_eq!(catalog.lookup("RW").unwrap().key(), "Rw");
        assert_eq!(catalog.lookup("X").unwrap().key(), "x");
        assert_eq!(catalog.lookup("tPeRm").unwrap().key(), "Tperm");
        assert!(catalog.lookup("Q").is_none());
    }

    #[test]
    fn rejects_overlapping_cycles() {
        let definitions = [
            MoveDefinition::new("A", vec![vec![0, 1, 2, 3]]),
            MoveDefinition::new("Bad", vec![vec![10, 11, 12, 13], vec![13, 14]]),
        ];

        assert_eq!(
            definitions
                .into_iter()
                .collect::<Result<Vec<_>, _>>()
                .and_then(MoveCatalog::new)
                .unwrap_err(),
            ConfigurationError::OverlappingCycles {
                key: "Bad".to_owned(),
                index: 13,
                first: 0,
                second: 1
            }
        );
    }

    #[test]
    fn rejects_duplicate_keys() {
        assert_eq!(
            MoveCatalog::new([
                MoveDefinition::new("Rw", vec![vec![0, 1]]).unwrap(),
                MoveDefinition::new("rw", vec![vec![2, 3]]).unwrap(),
            ])
            .unwrap_err(),
            ConfigurationError::DuplicateKey("rw".to_owned())
        );
    }
}
