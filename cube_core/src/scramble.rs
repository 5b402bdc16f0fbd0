use std::{num::NonZeroU16, sync::Arc};

use fastrand::Rng;
use log::debug;

use crate::{
    ConfigurationError, Face, Move, MoveCatalog, MoveDefinition, Puzzle, StickerGrid,
    apply_sequence, format_sequence,
};

/// How many moves a scramble has unless asked otherwise
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 40;

/// Draws random face turns. The random number generator always comes from the caller so a seed
/// reproduces a scramble exactly.
#[derive(Debug, Clone)]
pub struct Scrambler {
    faces: Vec<Arc<MoveDefinition>>,
}

impl Scrambler {
    /// # Errors
    ///
    /// Fails if the catalog lacks any of the six face turns.
    pub fn new(catalog: &MoveCatalog) -> Result<Scrambler, ConfigurationError> {
        let faces = Face::ALL
            .iter()
            .map(|face| {
                catalog
                    .lookup(face.key())
                    .map(Arc::clone)
                    .ok_or_else(|| ConfigurationError::MissingMove(face.key().to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scrambler { faces })
    }

    /// `count` face turns, each with a face picked uniformly and turned one, two or three times.
    /// Scrambles never use the reverse flag.
    #[must_use]
    pub fn moves(&self, rng: &mut Rng, count: usize) -> Vec<Move> {
        (0..count)
            .map(|_| {
                let face = &self.faces[rng.usize(..self.faces.len())];
                let repeat = NonZeroU16::MIN.saturating_add(rng.u16(0..3));
                Move::new(Arc::clone(face), repeat, false)
            })
            .collect()
    }

    /// Apply a fresh scramble of `count` moves to `grid`
    #[must_use]
    pub fn scramble(&self, grid: &StickerGrid, rng: &mut Rng, count: usize) -> StickerGrid {
        apply_sequence(grid, &self.moves(rng, count))
    }
}

impl Puzzle {
    /// Scramble the puzzle in place and return the moves that were applied
    pub fn scramble(&mut self, scrambler: &Scrambler, rng: &mut Rng, count: usize) -> Vec<Move> {
        let moves = scrambler.moves(rng, count);

        debug!("Scrambling with {}", format_sequence(&moves));

        self.compose_into(&moves);
        moves
    }
}
