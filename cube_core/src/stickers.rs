use std::{fmt, ops::Range, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of stickers on a 3x3x3 cube
pub const STICKER_COUNT: usize = 54;

/// Number of stickers on one face
pub const FACE_SIZE: usize = 9;

/// The color of a single sticker. The discriminant is the digit used by the string encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Sticker {
    Green = 0,
    White = 1,
    Red = 2,
    Orange = 3,
    Yellow = 4,
    Blue = 5,
}

impl Sticker {
    pub const ALL: [Sticker; 6] = [
        Sticker::Green,
        Sticker::White,
        Sticker::Red,
        Sticker::Orange,
        Sticker::Yellow,
        Sticker::Blue,
    ];

    /// The digit this sticker encodes to
    #[must_use]
    pub fn digit(self) -> char {
        char::from(b'0' + self as u8)
    }

    #[must_use]
    pub fn from_digit(digit: char) -> Option<Sticker> {
        let value = digit.to_digit(10)?;
        Sticker::ALL.get(usize::try_from(value).ok()?).copied()
    }
}

/// One of the six faces. Faces are laid out in the grid in declaration order.
///
/// Front, Right, Back and Left are read from outside with Up at the top. Up is read from above with
/// Back at the top and Down is read from below with Front at the top. Each face is row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Front,
    Up,
    Right,
    Left,
    Down,
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Up,
        Face::Right,
        Face::Left,
        Face::Down,
        Face::Back,
    ];

    /// Position of the face in [`Face::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Index of the face's first sticker in the grid
    #[must_use]
    pub const fn offset(self) -> usize {
        self.index() * FACE_SIZE
    }

    #[must_use]
    pub fn indices(self) -> Range<usize> {
        self.offset()..self.offset() + FACE_SIZE
    }

    /// The color every sticker of this face has when the cube is solved
    #[must_use]
    pub const fn solved_color(self) -> Sticker {
        match self {
            Face::Front => Sticker::Green,
            Face::Up => Sticker::White,
            Face::Right => Sticker::Red,
            Face::Left => Sticker::Orange,
            Face::Down => Sticker::Yellow,
            Face::Back => Sticker::Blue,
        }
    }

    /// The notation key of the clockwise turn of this face
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Face::Front => "F",
            Face::Up => "U",
            Face::Right => "R",
            Face::Left => "L",
            Face::Down => "D",
            Face::Back => "B",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Expected 54 stickers but got {0}")]
    WrongLength(usize),
    #[error("Invalid sticker {found:?} at index {index}, expected a digit between 0 and 5")]
    InvalidDigit { index: usize, found: char },
}

/// The full state of a cube: one color per sticker.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StickerGrid {
    stickers: [Sticker; STICKER_COUNT],
}

impl StickerGrid {
    #[must_use]
    pub fn solved() -> StickerGrid {
        StickerGrid {
            stickers: std::array::from_fn(|i| Face::ALL[i / FACE_SIZE].solved_color()),
        }
    }

    pub(crate) fn from_stickers(stickers: [Sticker; STICKER_COUNT]) -> StickerGrid {
        StickerGrid { stickers }
    }

    #[must_use]
    pub fn stickers(&self) -> &[Sticker; STICKER_COUNT] {
        &self.stickers
    }

    /// The nine stickers of `face`, row-major
    #[must_use]
    pub fn face(&self, face: Face) -> &[Sticker] {
        &self.stickers[face.indices()]
    }

    /// Whether every face shows its own canonical color
    #[must_use]
    pub fn is_solved(&self) -> bool {
        Face::ALL
            .iter()
            .all(|&face| self.face(face).iter().all(|&s| s == face.solved_color()))
    }

    /// Whether every face is a single color, regardless of which. A solved cube that has been
    /// rotated as a whole passes this but not [`StickerGrid::is_solved`].
    #[must_use]
    pub fn is_solved_up_to_rotation(&self) -> bool {
        Face::ALL.iter().all(|&face| {
            let stickers = self.face(face);
            stickers.iter().all(|&s| s == stickers[0])
        })
    }

    /// Encode the grid as 54 digits, one per sticker in index order
    #[must_use]
    pub fn encode(&self) -> String {
        self.stickers.iter().map(|s| s.digit()).collect()
    }

    /// Decode a string produced by [`StickerGrid::encode`].
    ///
    /// # Errors
    ///
    /// Fails if the string is not exactly 54 characters, each between `0` and `5`.
    pub fn decode(encoded: &str) -> Result<StickerGrid, FormatError> {
        let len = encoded.chars().count();
        if len != STICKER_COUNT {
            return Err(FormatError::WrongLength(len));
        }

        let mut stickers = [Sticker::Green; STICKER_COUNT];
        for (index, (slot, found)) in stickers.iter_mut().zip(encoded.chars()).enumerate() {
            *slot = Sticker::from_digit(found).ok_or(FormatError::InvalidDigit { index, found })?;
        }

        Ok(StickerGrid { stickers })
    }
}

impl Default for StickerGrid {
    fn default() -> Self {
        StickerGrid::solved()
    }
}

impl fmt::Debug for StickerGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StickerGrid({})", self.encode())
    }
}

impl fmt::Display for StickerGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for StickerGrid {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StickerGrid::decode(s)
    }
}

impl TryFrom<String> for StickerGrid {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StickerGrid::decode(&value)
    }
}

impl From<StickerGrid> for String {
    fn from(grid: StickerGrid) -> Self {
        grid.encode()
    }
}
