//! Fumen codec - text encoding of Tetris page sequences
//!
//! A fumen is a compact, URL-safe string holding an ordered list of pages,
//! each page a 10x24 field, the piece about to be placed and a few flags. This
//! crate converts between that string and [`Page`] values.
//!
//! # Module Structure
//!
//! - [`alphabet`]: 64-symbol digit groups and the decode cursor
//! - [`percent`]: comment escaping
//! - [`field_diff`]: run-length coded field deltas between pages
//! - [`descriptor`]: packed piece/flags integer and the comment block
//! - [`fumen`]: the page loop, format tag and fillers
//! - [`error`]: decode and encode errors
//!
//! # Failure Model
//!
//! [`decode`] answers [`DecodeError::UnsupportedFormat`] for text that is not
//! a `v115@` fumen at all, and a different variant for a fumen whose digit
//! stream is corrupt. No partial page list is ever returned. [`encode`]
//! refuses pages whose values cannot be represented instead of writing a
//! string that would decode to something else.
//!
//! # Example
//!
//! ```
//! use tetris_fumen_codec::{Field, Fumen, Page, Piece, PieceType, Rotation};
//!
//! let mut fumen = Fumen::new();
//! let piece = Piece::new(PieceType::I, Rotation::North, 234);
//! let mut page = Page::new(Field::new(), piece);
//! page.flags.comment = "PCO".to_string();
//! fumen.push(page);
//!
//! let text = fumen.encode().unwrap();
//! assert!(text.starts_with("v115@"));
//! assert_eq!(Fumen::decode(&text).unwrap(), fumen);
//! ```
//!
//! All functions are pure; the only shared state is the constant symbol
//! table, so encoders and decoders can run on any number of threads.

pub mod alphabet;
pub mod descriptor;
pub mod error;
pub mod field_diff;
pub mod fumen;
pub mod percent;

pub use tetris_fumen_types as types;

// Re-export commonly used types for convenience
pub use error::{DecodeError, EncodeError, StreamPart};
pub use fumen::{decode, encode, encode_with, EncodeOptions, Fumen, FILLER, FORMAT_TAG};
pub use types::{Field, Flags, Page, Piece, PieceType, Rotation};
