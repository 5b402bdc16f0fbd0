use serde::{Deserialize, Serialize};

use crate::{Puzzle, StickerGrid};

/// What a storage layer keeps for one cube. Only `state` is interpreted here; the other fields are
/// carried through untouched for whoever owns the game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SavedPuzzle {
    /// The grid as 54 digits
    pub state: StickerGrid,
    /// Seconds spent on this cube so far
    #[serde(default)]
    pub elapsed_secs: u64,
    /// Unix timestamp of the last move
    #[serde(default)]
    pub last_played: Option<u64>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl SavedPuzzle {
    #[must_use]
    pub fn new(puzzle: &Puzzle, owner: Option<String>) -> SavedPuzzle {
        SavedPuzzle {
            state: puzzle.grid().clone(),
            elapsed_secs: 0,
            last_played: None,
            owner,
        }
    }

    #[must_use]
    pub fn puzzle(&self) -> Puzzle {
        Puzzle::from_grid(self.state.clone())
    }

    /// Replace the stored state, keeping every other field as is
    pub fn store(&mut self, puzzle: &Puzzle) {
        self.state = puzzle.grid().clone();
    }
}
