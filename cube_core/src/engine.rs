use std::sync::Arc;

use log::trace;

use crate::{Move, MoveCatalog, ParseError, StickerGrid, format_sequence, notation};

/// Apply one move. Every cycle reads from `grid` and writes into a fresh grid, so cycles never see
/// each other's partial updates.
#[must_use]
pub fn apply(grid: &StickerGrid, move_: &Move) -> StickerGrid {
    let old = grid.stickers();
    let mut new = *old;

    for cycle in move_.definition().cycles() {
        let len = cycle.len();
        let shift = move_.shift(len);

        for (i, &position) in cycle.iter().enumerate() {
            new[position] = old[cycle[(i + shift) % len]];
        }
    }

    StickerGrid::from_stickers(new)
}

/// Apply `moves` in order on a private copy of `grid`
#[must_use]
pub fn apply_sequence(grid: &StickerGrid, moves: &[Move]) -> StickerGrid {
    moves
        .iter()
        .fold(grid.clone(), |acc, move_| apply(&acc, move_))
}

/// The live state of one cube.
///
/// The grid sits behind an [`Arc`] that is only ever replaced wholesale, so a snapshot taken by a
/// reader stays a complete, consistent grid no matter what is applied afterwards.
#[derive(Clone, Debug, Default)]
pub struct Puzzle {
    grid: Arc<StickerGrid>,
}

impl Puzzle {
    /// A puzzle in the solved state
    #[must_use]
    pub fn solved() -> Puzzle {
        Puzzle::default()
    }

    #[must_use]
    pub fn from_grid(grid: StickerGrid) -> Puzzle {
        Puzzle {
            grid: Arc::new(grid),
        }
    }

    /// A handle to the current grid that later moves will not change
    #[must_use]
    pub fn snapshot(&self) -> Arc<StickerGrid> {
        Arc::clone(&self.grid)
    }

    #[must_use]
    pub fn grid(&self) -> &StickerGrid {
        &self.grid
    }

    /// Apply `moves` and publish the result, returning the new grid
    pub fn compose_into(&mut self, moves: &[Move]) -> Arc<StickerGrid> {
        let next = apply_sequence(&self.grid, moves);

        trace!("Applied {}", format_sequence(moves));

        self.grid = Arc::new(next);
        self.snapshot()
    }

    /// Parse `input` and apply it. Nothing is applied unless every token parses.
    ///
    /// # Errors
    ///
    /// Returns the first token that fails to parse, leaving the puzzle untouched.
    pub fn perform(
        &mut self,
        catalog: &MoveCatalog,
        input: &str,
    ) -> Result<Arc<StickerGrid>, ParseError> {
        let moves = notation::parse_sequence(catalog, input)?;
        Ok(self.compose_into(&moves))
    }

    /// Bring the puzzle back to the solved state
    pub fn reset(&mut self) {
        self.grid = Arc::new(StickerGrid::solved());
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }
}
