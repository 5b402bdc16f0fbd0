use std::{fmt, num::NonZeroU16, sync::Arc};

use internment::ArcIntern;
use itertools::Itertools;

use crate::{ConfigurationError, STICKER_COUNT};

/// An ordered list of sticker indices. Applying it once moves the sticker at `cycle[i - 1]` to
/// `cycle[i]`, wrapping around at the end.
pub type Cycle = Vec<usize>;

/// A named transformation of the cube as a set of disjoint sticker cycles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDefinition {
    key: ArcIntern<str>,
    cycles: Vec<Cycle>,
}

impl MoveDefinition {
    /// Every cycle must have at least two stickers, every index must be on the cube, and no
    /// sticker may be moved by more than one cycle or appear twice in the same cycle.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn new(key: &str, cycles: Vec<Cycle>) -> Result<MoveDefinition, ConfigurationError> {
        check_cycles(key, &cycles)?;

        Ok(MoveDefinition {
            key: ArcIntern::from(key),
            cycles,
        })
    }

    /// The canonical notation key, with its canonical capitalization
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }
}

fn check_cycles(key: &str, cycles: &[Cycle]) -> Result<(), ConfigurationError> {
    let mut owners = [None::<usize>; STICKER_COUNT];

    for (cycle_idx, cycle) in cycles.iter().enumerate() {
        if cycle.len() < 2 {
            return Err(ConfigurationError::CycleTooShort {
                key: key.to_owned(),
                cycle: cycle_idx,
            });
        }

        for &index in cycle {
            let Some(owner) = owners.get_mut(index) else {
                return Err(ConfigurationError::IndexOutOfRange {
                    key: key.to_owned(),
                    index,
                });
            };

            match *owner {
                None => *owner = Some(cycle_idx),
                Some(first) if first == cycle_idx => {
                    return Err(ConfigurationError::DuplicateIndex {
                        key: key.to_owned(),
                        index,
                        cycle: cycle_idx,
                    });
                }
                Some(first) => {
                    return Err(ConfigurationError::OverlappingCycles {
                        key: key.to_owned(),
                        index,
                        first,
                        second: cycle_idx,
                    });
                }
            }
        }
    }

    Ok(())
}

/// A move as written by a player: a catalog entry, how many times to apply it, and in which
/// direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    definition: Arc<MoveDefinition>,
    repeat: NonZeroU16,
    reverse: bool,
}

impl Move {
    #[must_use]
    pub fn new(definition: Arc<MoveDefinition>, repeat: NonZeroU16, reverse: bool) -> Move {
        Move {
            definition,
            repeat,
            reverse,
        }
    }

    /// A single clockwise application of `definition`
    #[must_use]
    pub fn quarter(definition: Arc<MoveDefinition>) -> Move {
        Move::new(definition, NonZeroU16::MIN, false)
    }

    #[must_use]
    pub fn definition(&self) -> &Arc<MoveDefinition> {
        &self.definition
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.definition.key()
    }

    #[must_use]
    pub fn repeat(&self) -> u16 {
        self.repeat.get()
    }

    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// The same move turned the other way; applying it after `self` restores the grid
    #[must_use]
    pub fn inverse(&self) -> Move {
        Move {
            definition: Arc::clone(&self.definition),
            repeat: self.repeat,
            reverse: !self.reverse,
        }
    }

    /// How far along a cycle of length `len` each sticker reads its new value from.
    ///
    /// Forward moves read from `repeat` positions back, reversed moves from `repeat` positions
    /// ahead. The result is already reduced into `0..len`. `len` is never zero since definitions
    /// reject cycles shorter than two.
    pub(crate) fn shift(&self, len: usize) -> usize {
        let amount = usize::from(self.repeat.get()) % len;
        if self.reverse {
            amount
        } else {
            (len - amount) % len
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())?;
        if self.repeat() != 1 {
            write!(f, "{}", self.repeat())?;
        }
        if self.reverse {
            f.write_str("'")?;
        }
        Ok(())
    }
}

/// Write a sequence of moves back out as notation
#[must_use]
pub fn format_sequence(moves: &[Move]) -> String {
    moves.iter().join(" ")
}
