#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_panics_doc)]

//! A 3x3x3 Rubik's cube modelled as 54 stickers and a catalog of sticker cycles.
//!
//! Text goes through [`notation::parse_sequence`] against a [`MoveCatalog`], the resulting moves are
//! applied by the [`engine`], and a [`Puzzle`] publishes each new [`StickerGrid`] by swapping a
//! single reference.

pub mod catalog;
pub mod engine;
pub mod moves;
pub mod notation;
pub mod record;
pub mod scramble;
pub mod stickers;

pub use catalog::{ConfigurationError, MoveCatalog};
pub use engine::{Puzzle, apply, apply_sequence};
pub use moves::{Cycle, Move, MoveDefinition, format_sequence};
pub use notation::{ParseError, parse_move, parse_sequence};
pub use record::SavedPuzzle;
pub use scramble::{DEFAULT_SCRAMBLE_LENGTH, Scrambler};
pub use stickers::{FACE_SIZE, Face, FormatError, STICKER_COUNT, Sticker, StickerGrid};
