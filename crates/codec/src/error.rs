//! Codec errors
//!
//! Decoding has two tiers of failure: [`DecodeError::UnsupportedFormat`] is
//! the expected "not a fumen" answer, everything else means the text claimed
//! to be a fumen but its digit stream is corrupt. Encoding fails only when a
//! page holds a value that its slot cannot represent.

use std::fmt;

use thiserror::Error;

/// Which part of a page was being parsed when the stream ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPart {
    Field,
    Descriptor,
    CommentLength,
    Comment,
}

impl fmt::Display for StreamPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamPart::Field => "field",
            StreamPart::Descriptor => "descriptor",
            StreamPart::CommentLength => "comment length",
            StreamPart::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// Digits missing from a group read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub needed: usize,
    pub remaining: usize,
}

impl Shortfall {
    /// Attach the page and part being parsed
    pub fn at(self, page: usize, part: StreamPart) -> DecodeError {
        DecodeError::StreamTruncated {
            page,
            part,
            needed: self.needed,
            remaining: self.remaining,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("input does not start with the v115@ format tag")]
    UnsupportedFormat,

    #[error("stream truncated in page {page} {part}: needed {needed} digits, {remaining} left")]
    StreamTruncated {
        page: usize,
        part: StreamPart,
        needed: usize,
        remaining: usize,
    },

    #[error("page {page} field cell {index} decodes to {value}, outside 0..=255")]
    CorruptField { page: usize, index: usize, value: i32 },
}

impl DecodeError {
    /// True for the soft "not this format" outcome
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, DecodeError::UnsupportedFormat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("page {page}: {field} value {value} does not fit its encoding")]
    RangeViolation {
        page: usize,
        field: &'static str,
        value: i64,
    },
}
