//! Fumen module - page-by-page encode/decode loop
//!
//! Text layout: the `v115@` tag, then for each page its field runs, its
//! packed descriptor and, when the descriptor says so, its comment block. The
//! stream has no length or terminator; it must end exactly after a page.
//! `?` fillers may appear anywhere after the tag and are ignored.

use log::{debug, trace};

use crate::alphabet::{self, DigitReader};
use crate::descriptor::{
    decode_comment, decode_descriptor, encode_comment, encode_descriptor, Descriptor,
};
use crate::error::{DecodeError, EncodeError};
use crate::field_diff::{decode_field, encode_field};
use crate::types::{Field, Page};

/// Literal prefix of every supported fumen
pub const FORMAT_TAG: &str = "v115@";

/// Placeholder symbol skipped while decoding
pub const FILLER: char = '?';

/// Interval the fumen web editor uses when wrapping its output
pub const EDITOR_FILLER_EVERY: usize = 47;

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Insert a filler after every N symbols following the tag
    pub filler_every: Option<usize>,
}

impl EncodeOptions {
    pub fn with_filler_every(mut self, every: usize) -> Self {
        self.filler_every = if every == 0 { None } else { Some(every) };
        self
    }
}

/// Encode pages with default options
///
/// # Examples
///
/// ```
/// use tetris_fumen_codec::{encode, Page, Piece, PieceType, Rotation};
///
/// let page = Page {
///     piece: Piece::new(PieceType::T, Rotation::North, 0),
///     ..Page::default()
/// };
/// assert_eq!(encode(&[page]).unwrap(), "v115@vhAQp");
/// assert_eq!(encode(&[]).unwrap(), "v115@");
/// ```
pub fn encode(pages: &[Page]) -> Result<String, EncodeError> {
    encode_with(pages, &EncodeOptions::default())
}

/// Encode pages, each diffed against the one before it
///
/// Fails on the first page holding a value its slot cannot represent;
/// nothing is returned for earlier pages.
pub fn encode_with(pages: &[Page], options: &EncodeOptions) -> Result<String, EncodeError> {
    let empty = Field::new();
    let mut body = String::new();

    for (index, page) in pages.iter().enumerate() {
        let baseline = match index {
            0 => &empty,
            _ => &pages[index - 1].field,
        };
        let start = body.len();

        encode_field(baseline, &page.field, index, &mut body)?;
        encode_descriptor(&Descriptor::of(page), index, &mut body)?;
        if page.flags.has_comment() {
            encode_comment(&page.flags.comment, index, &mut body)?;
        }
        trace!("page {}: {} symbols", index, body.len() - start);
    }
    debug!("encoded {} pages into {} symbols", pages.len(), body.len());

    let mut out = String::with_capacity(FORMAT_TAG.len() + body.len() + body.len() / 8);
    out.push_str(FORMAT_TAG);
    match options.filler_every {
        Some(every) if every > 0 => {
            for (i, symbol) in body.chars().enumerate() {
                if i > 0 && i % every == 0 {
                    out.push(FILLER);
                }
                out.push(symbol);
            }
        }
        _ => out.push_str(&body),
    }
    Ok(out)
}

/// Decode a fumen into its pages
///
/// All-or-nothing: any truncated or corrupt page fails the whole decode.
///
/// # Examples
///
/// ```
/// use tetris_fumen_codec::{decode, DecodeError, PieceType};
///
/// let pages = decode("v115@vhAQp").unwrap();
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].piece.kind, PieceType::T);
///
/// assert_eq!(decode("v110@vhAQp"), Err(DecodeError::UnsupportedFormat));
/// ```
pub fn decode(text: &str) -> Result<Vec<Page>, DecodeError> {
    let body = text
        .strip_prefix(FORMAT_TAG)
        .ok_or(DecodeError::UnsupportedFormat)?;
    let digits: Vec<u8> = body
        .chars()
        .filter(|&c| c != FILLER)
        .map(alphabet::value_of)
        .collect();

    let empty = Field::new();
    let mut reader = DigitReader::new(&digits);
    let mut pages: Vec<Page> = Vec::new();

    while !reader.is_empty() {
        let index = pages.len();
        let baseline = pages.last().map_or(&empty, |p| &p.field);

        let field = decode_field(baseline, &mut reader, index)?;
        let descriptor = decode_descriptor(&mut reader, index)?;
        let comment = if descriptor.has_comment {
            decode_comment(&mut reader, index)?
        } else {
            String::new()
        };

        trace!("page {}: ends at digit {}", index, reader.position());
        pages.push(Page {
            field,
            piece: descriptor.piece,
            flags: descriptor.flags(comment),
        });
    }
    debug!("decoded {} pages from {} digits", pages.len(), digits.len());

    Ok(pages)
}

/// An ordered sequence of pages
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fumen {
    pages: Vec<Page>,
}

impl Fumen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub fn encode(&self) -> Result<String, EncodeError> {
        encode(&self.pages)
    }

    pub fn encode_with(&self, options: &EncodeOptions) -> Result<String, EncodeError> {
        encode_with(&self.pages, options)
    }

    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        decode(text).map(Self::from_pages)
    }

    /// Decode, treating every failure as "no result"
    pub fn decode_lenient(text: &str) -> Option<Self> {
        Self::decode(text).ok()
    }
}

impl From<Vec<Page>> for Fumen {
    fn from(pages: Vec<Page>) -> Self {
        Self::from_pages(pages)
    }
}

impl<'a> IntoIterator for &'a Fumen {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
