use std::path::{Path, PathBuf};

use ariadne::{Color, IndexType, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, OptionExt, WrapErr, bail};
use cube_core::{
    Face, MoveCatalog, ParseError, Puzzle, SavedPuzzle, Scrambler, Sticker, StickerGrid,
    format_sequence,
};
use log::{LevelFilter, info};
use owo_colors::OwoColorize;

use crate::config::Config;

mod config;
mod store;

#[derive(Parser, Debug)]
#[command(name = "cubist", version, about = "Turn and inspect a saved Rubik's cube")]
struct Cli {
    /// File the cube is saved in. Defaults to `state_file` from the config.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more; repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the cube
    Show,
    /// Apply moves, for example `cubist apply R U "R'" "U'"`
    Apply {
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,
    },
    /// Scramble the cube with random face turns
    Scramble {
        /// Number of moves; defaults to `scramble_length` from the config
        #[arg(long)]
        moves: Option<usize>,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Put the cube back in the solved state
    Reset,
    /// List every move the notation understands
    Moves,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let catalog = MoveCatalog::standard().wrap_err("The built-in moves are inconsistent")?;

    let state = cli.state;
    let open = || -> eyre::Result<(PathBuf, SavedPuzzle)> {
        let path = state
            .clone()
            .or_else(|| config.state_path())
            .ok_or_eyre("No state file given and no data directory to put one in")?;
        let saved = store::load(&path)?
            .unwrap_or_else(|| SavedPuzzle::new(&Puzzle::solved(), config.owner.clone()));
        Ok((path, saved))
    };

    match cli.command {
        Commands::Moves => {
            for def in catalog.iter() {
                println!("{}", def.key());
            }
        }
        Commands::Show => {
            let (_, saved) = open()?;
            print_grid(&saved.state);
        }
        Commands::Apply { moves } => {
            let (path, saved) = open()?;
            let mut puzzle = saved.puzzle();
            let input = moves.join(" ");

            if let Err(err) = puzzle.perform(&catalog, &input) {
                report_parse_error(&input, &err)?;
                bail!("No moves were applied");
            }

            commit(&path, saved, &puzzle)?;
        }
        Commands::Scramble { moves, seed } => {
            let scrambler = Scrambler::new(&catalog)?;
            let mut rng = match seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };

            let (path, saved) = open()?;
            let mut puzzle = saved.puzzle();
            let applied =
                puzzle.scramble(&scrambler, &mut rng, moves.unwrap_or(config.scramble_length));
            println!("{}", format_sequence(&applied));

            commit(&path, saved, &puzzle)?;
        }
        Commands::Reset => {
            let (path, saved) = open()?;
            let mut puzzle = saved.puzzle();
            puzzle.reset();
            commit(&path, saved, &puzzle)?;
        }
    }

    Ok(())
}

/// Save the new state next to the untouched bookkeeping fields and print it
fn commit(path: &Path, mut saved: SavedPuzzle, puzzle: &Puzzle) -> eyre::Result<()> {
    saved.store(puzzle);
    store::save(path, &mut saved)?;

    if puzzle.is_solved() {
        info!("The cube is solved");
    }

    print_grid(puzzle.grid());

    Ok(())
}

fn paint(sticker: Sticker) -> String {
    let digit = sticker.digit();
    match sticker {
        Sticker::Green => digit.green().to_string(),
        Sticker::White => digit.white().to_string(),
        Sticker::Red => digit.red().to_string(),
        Sticker::Orange => digit.truecolor(255, 165, 0).to_string(),
        Sticker::Yellow => digit.yellow().to_string(),
        Sticker::Blue => digit.blue().to_string(),
    }
}

/// One colored group of digits per face, then the plain encoding and whether it is solved
fn print_grid(grid: &StickerGrid) {
    let faces = Face::ALL
        .iter()
        .map(|&face| {
            let stickers: String = grid.face(face).iter().copied().map(paint).collect();
            format!("{} {stickers}", face.key())
        })
        .collect::<Vec<_>>();

    println!("{}", faces.join("  "));
    println!("{grid}");
    println!(
        "{}",
        if grid.is_solved() {
            "solved"
        } else {
            "not solved"
        }
    );
}

fn report_parse_error(input: &str, err: &ParseError) -> eyre::Result<()> {
    let span = err.span();
    let label = match err {
        ParseError::Malformed { reason, .. } => reason.clone(),
        ParseError::UnknownMove { .. } => "run `cubist moves` to list the known moves".to_owned(),
    };

    Report::build(ReportKind::Error, ("moves", span.clone()))
        .with_config(ariadne::Config::default().with_index_type(IndexType::Byte))
        .with_message(err.to_string())
        .with_label(
            Label::new(("moves", span))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .eprint(("moves", Source::from(input)))?;

    Ok(())
}
