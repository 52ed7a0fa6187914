//! Descriptor module - packed piece placement, flags and comment block
//!
//! The piece and flags of a page share one mixed-radix integer written as a
//! 3-digit group. Fields are folded in this order, each with its own radix:
//!
//! | Field | Radix |
//! |-------|-------|
//! | piece type | 8 |
//! | rotation | 4 |
//! | location | 240 |
//! | raise | 2 |
//! | mirror | 2 |
//! | color | 2 |
//! | has comment | 2 |
//! | not locked | 2 |
//!
//! The largest packed value is `8 * 4 * 240 * 2^5 - 1 = 245759`, below the
//! 3-digit capacity of 262144. The piece slot holds codes 0-7 only, so a
//! `Gray` piece cannot be written.
//!
//! A page with a comment is followed by a 2-digit length of the escaped text
//! and one 5-digit group per 4 escaped characters, each group a base-96
//! number of `char - 32` values, first character least significant.

use crate::alphabet::{self, DigitReader};
use crate::error::{DecodeError, EncodeError, StreamPart};
use crate::percent::{percent_decode, percent_encode};
use crate::types::{Flags, Page, Piece, PieceType, Rotation, FIELD_SIZE};

/// Digits in a packed descriptor
pub const DESCRIPTOR_DIGITS: usize = 3;

/// Digits in the comment length group
pub const COMMENT_LENGTH_DIGITS: usize = 2;

/// Digits per comment chunk
pub const COMMENT_CHUNK_DIGITS: usize = 5;

/// Escaped characters per comment chunk
pub const COMMENT_CHUNK_CHARS: usize = 4;

/// Longest escaped comment the length group can record
pub const MAX_COMMENT_LEN: usize = 4095;

/// Radix of each packed slot, in fold order
const RADIXES: [u32; 8] = [8, 4, FIELD_SIZE as u32, 2, 2, 2, 2, 2];

/// Rotations in code order
const ROTATIONS: [Rotation; 4] = [
    Rotation::South,
    Rotation::East,
    Rotation::North,
    Rotation::West,
];

const CHAR_BASE: u32 = 96;
const CHAR_OFFSET: u32 = 32;

/// Unpacked descriptor of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub piece: Piece,
    pub raise: bool,
    pub mirror: bool,
    pub color: bool,
    pub has_comment: bool,
    pub lock: bool,
}

impl Descriptor {
    /// Descriptor of a page; `has_comment` follows the comment text
    pub fn of(page: &Page) -> Self {
        Self {
            piece: page.piece,
            raise: page.flags.raise,
            mirror: page.flags.mirror,
            color: page.flags.color,
            has_comment: page.flags.has_comment(),
            lock: page.flags.lock,
        }
    }

    /// Page flags with the given comment text
    pub fn flags(&self, comment: String) -> Flags {
        Flags {
            raise: self.raise,
            mirror: self.mirror,
            color: self.color,
            lock: self.lock,
            comment,
        }
    }

    /// Fold all slots into one integer
    ///
    /// Fails if the piece type or location does not fit its slot.
    pub fn pack(&self, page: usize) -> Result<u32, EncodeError> {
        let kind = self.piece.kind.code() as u32;
        if kind >= RADIXES[0] {
            return Err(EncodeError::RangeViolation {
                page,
                field: "piece.type",
                value: kind as i64,
            });
        }
        let location = self.piece.location as u32;
        if location >= RADIXES[2] {
            return Err(EncodeError::RangeViolation {
                page,
                field: "piece.location",
                value: location as i64,
            });
        }

        let slots = [
            kind,
            self.piece.rotation.code() as u32,
            location,
            self.raise as u32,
            self.mirror as u32,
            self.color as u32,
            self.has_comment as u32,
            !self.lock as u32,
        ];
        Ok(slots
            .iter()
            .zip(RADIXES.iter())
            .fold(0, |acc, (&slot, &radix)| slot + acc * radix))
    }

    /// Split a packed integer back into its slots
    pub fn unpack(value: u32) -> Self {
        let mut slots = [0u32; 8];
        let mut value = value;
        for (slot, &radix) in slots.iter_mut().zip(RADIXES.iter()).rev() {
            *slot = value % radix;
            value /= radix;
        }

        let kind = PieceType::ALL[slots[0] as usize];
        let rotation = ROTATIONS[slots[1] as usize];

        Self {
            piece: Piece::new(kind, rotation, slots[2] as u8),
            raise: slots[3] == 1,
            mirror: slots[4] == 1,
            color: slots[5] == 1,
            has_comment: slots[6] == 1,
            lock: slots[7] == 0,
        }
    }
}

/// Append a packed descriptor
pub fn encode_descriptor(
    descriptor: &Descriptor,
    page: usize,
    out: &mut String,
) -> Result<(), EncodeError> {
    let value = descriptor.pack(page)?;
    alphabet::push_digits(out, value, DESCRIPTOR_DIGITS);
    Ok(())
}

pub fn decode_descriptor(
    reader: &mut DigitReader<'_>,
    page: usize,
) -> Result<Descriptor, DecodeError> {
    let value = reader
        .read(DESCRIPTOR_DIGITS)
        .map_err(|s| s.at(page, StreamPart::Descriptor))?;
    Ok(Descriptor::unpack(value))
}

/// Append the length and chunk groups of a comment
pub fn encode_comment(comment: &str, page: usize, out: &mut String) -> Result<(), EncodeError> {
    let escaped = percent_encode(comment);
    let len = escaped.len();
    if len > MAX_COMMENT_LEN {
        return Err(EncodeError::RangeViolation {
            page,
            field: "comment length",
            value: len as i64,
        });
    }
    alphabet::push_digits(out, len as u32, COMMENT_LENGTH_DIGITS);

    for chunk in escaped.as_bytes().chunks(COMMENT_CHUNK_CHARS) {
        let mut value = 0u32;
        for j in (0..COMMENT_CHUNK_CHARS).rev() {
            // Escaped text is printable ASCII; short chunks pad with spaces.
            let code = chunk.get(j).copied().unwrap_or(b' ') as u32;
            value = value * CHAR_BASE + (code - CHAR_OFFSET);
        }
        alphabet::push_digits(out, value, COMMENT_CHUNK_DIGITS);
    }
    Ok(())
}

pub fn decode_comment(reader: &mut DigitReader<'_>, page: usize) -> Result<String, DecodeError> {
    let len = reader
        .read(COMMENT_LENGTH_DIGITS)
        .map_err(|s| s.at(page, StreamPart::CommentLength))? as usize;
    let chunks = len.div_ceil(COMMENT_CHUNK_CHARS);

    let mut escaped = String::with_capacity(chunks * COMMENT_CHUNK_CHARS);
    for _ in 0..chunks {
        let mut value = reader
            .read(COMMENT_CHUNK_DIGITS)
            .map_err(|s| s.at(page, StreamPart::Comment))?;
        for _ in 0..COMMENT_CHUNK_CHARS {
            escaped.push(char::from((value % CHAR_BASE + CHAR_OFFSET) as u8));
            value /= CHAR_BASE;
        }
    }
    escaped.truncate(len);

    Ok(percent_decode(&escaped))
}
