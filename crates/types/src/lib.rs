//! Fumen types module - shared page data structures and constants
//!
//! This module defines the plain data carried by a fumen: the field grid, the
//! piece about to be placed and the per-page flags. All types are pure data
//! structures with no external dependencies, so they can be used by the codec,
//! by command-line tooling and by any consumer of decoded pages alike.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 24 rows (indexed 0-23, row 0 at the top)
//! - **Garbage row**: row 23, the row below the visible stack
//! - **Size**: 240 cells, row-major (`y * 10 + x`)
//!
//! # Codes
//!
//! Piece types and rotations have fixed numeric codes used by the encoding:
//!
//! | Code | PieceType | Rotation |
//! |------|-----------|----------|
//! | 0 | Empty | South |
//! | 1 | I | East |
//! | 2 | L | North |
//! | 3 | O | West |
//! | 4 | Z | |
//! | 5 | T | |
//! | 6 | J | |
//! | 7 | S | |
//! | 8 | Gray | |
//!
//! # Examples
//!
//! ```
//! use tetris_fumen_types::{Field, Page, PieceType, Rotation, FIELD_SIZE};
//!
//! let kind = PieceType::from_str("t").unwrap();
//! assert_eq!(kind.code(), 5);
//!
//! assert_eq!(Rotation::North.code(), 2);
//! assert_eq!(Rotation::from_code(3), Some(Rotation::West));
//!
//! let mut field = Field::new();
//! assert!(field.set(4, 23, PieceType::Gray.code()));
//! assert_eq!(field.get(4, 23), Some(8));
//! assert_eq!(field.cells().len(), FIELD_SIZE);
//!
//! let page = Page::default().with_comment("opener");
//! assert!(page.flags.has_comment());
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Field height in cells (23 stack rows plus the garbage row)
pub const FIELD_HEIGHT: usize = 24;

/// Total number of cells in a field
pub const FIELD_SIZE: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// Piece types, including the empty cell and the non-playable garbage class
///
/// The discriminant order is the fumen code order. Only `Empty..=S` (codes
/// 0-7) fit the piece slot of a packed page descriptor; `Gray` is valid as a
/// field cell but cannot be the piece of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceType {
    #[default]
    Empty,
    I,
    L,
    O,
    Z,
    T,
    J,
    S,
    Gray,
}

impl PieceType {
    /// All piece types in code order
    pub const ALL: [PieceType; 9] = [
        PieceType::Empty,
        PieceType::I,
        PieceType::L,
        PieceType::O,
        PieceType::Z,
        PieceType::T,
        PieceType::J,
        PieceType::S,
        PieceType::Gray,
    ];

    /// Numeric code of this piece type (0-8)
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Look up a piece type by its numeric code
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_fumen_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_code(1), Some(PieceType::I));
    /// assert_eq!(PieceType::from_code(8), Some(PieceType::Gray));
    /// assert_eq!(PieceType::from_code(9), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Parse piece type from string (case-insensitive)
    ///
    /// Accepts the single-letter names plus `"_"`/`"empty"` and `"x"`/`"gray"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_fumen_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_str("i"), Some(PieceType::I));
    /// assert_eq!(PieceType::from_str("Gray"), Some(PieceType::Gray));
    /// assert_eq!(PieceType::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "_" | "empty" => Some(PieceType::Empty),
            "i" => Some(PieceType::I),
            "l" => Some(PieceType::L),
            "o" => Some(PieceType::O),
            "z" => Some(PieceType::Z),
            "t" => Some(PieceType::T),
            "j" => Some(PieceType::J),
            "s" => Some(PieceType::S),
            "x" | "gray" => Some(PieceType::Gray),
            _ => None,
        }
    }

    /// Convert to the canonical single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::Empty => "_",
            PieceType::I => "I",
            PieceType::L => "L",
            PieceType::O => "O",
            PieceType::Z => "Z",
            PieceType::T => "T",
            PieceType::J => "J",
            PieceType::S => "S",
            PieceType::Gray => "X",
        }
    }
}

/// Piece orientations
///
/// - **South**: Upside down (code 0)
/// - **East**: Rotated 90° clockwise (code 1)
/// - **North**: Spawn orientation (code 2)
/// - **West**: Rotated 90° counter-clockwise (code 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    South,
    East,
    #[default]
    North,
    West,
}

impl Rotation {
    /// Numeric code of this rotation (0-3)
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Look up a rotation by its numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Rotation::South),
            1 => Some(Rotation::East),
            2 => Some(Rotation::North),
            3 => Some(Rotation::West),
            _ => None,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// The piece about to be placed on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece {
    pub kind: PieceType,
    pub rotation: Rotation,
    /// Flat field index of the piece's center cell, `0..FIELD_SIZE`
    pub location: u8,
}

impl Piece {
    pub fn new(kind: PieceType, rotation: Rotation, location: u8) -> Self {
        Self {
            kind,
            rotation,
            location,
        }
    }
}

/// Per-page flags
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flags {
    /// Raise the garbage row after the piece locks
    pub raise: bool,
    /// Mirror the field horizontally
    pub mirror: bool,
    /// Display pieces in color
    pub color: bool,
    /// Lock the piece into the field for the next page
    pub lock: bool,
    /// Free-form comment, empty when absent
    pub comment: String,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            raise: false,
            mirror: false,
            color: false,
            lock: true,
            comment: String::new(),
        }
    }
}

impl Flags {
    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}

/// A 10x24 grid of cell codes using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Flat array of cell codes, row-major order (y * WIDTH + x)
    cells: [u8; FIELD_SIZE],
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            cells: [0; FIELD_SIZE],
        }
    }

    /// Build a field from a complete row-major cell array
    pub fn from_cells(cells: [u8; FIELD_SIZE]) -> Self {
        Self { cells }
    }

    /// Build a field from a slice; `None` unless it holds exactly 240 cells
    pub fn from_slice(cells: &[u8]) -> Option<Self> {
        let cells: [u8; FIELD_SIZE] = cells.try_into().ok()?;
        Some(Self { cells })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: usize, y: usize) -> Option<usize> {
        if x >= FIELD_WIDTH || y >= FIELD_HEIGHT {
            return None;
        }
        Some(y * FIELD_WIDTH + x)
    }

    /// Get cell code at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell code at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: usize, y: usize, code: u8) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = code;
                true
            }
            None => false,
        }
    }

    /// True when every cell is zero
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8; FIELD_SIZE] {
        &self.cells
    }

    /// Get a mutable reference to the internal cells array
    pub fn cells_mut(&mut self) -> &mut [u8; FIELD_SIZE] {
        &mut self.cells
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(FIELD_WIDTH)
    }
}

/// One board snapshot plus the piece about to be placed and its flags
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Page {
    pub field: Field,
    pub piece: Piece,
    pub flags: Flags,
}

impl Page {
    pub fn new(field: Field, piece: Piece) -> Self {
        Self {
            field,
            piece,
            flags: Flags::default(),
        }
    }

    /// Replace the comment, keeping the other flags
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.flags.comment = comment.into();
        self
    }
}
