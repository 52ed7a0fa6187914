//! JSON module - serde mirror types for pages
//!
//! The codec types stay free of serialization concerns; this module defines
//! the JSON shape used by the command-line tool and converts both ways.
//!
//! ```json
//! {
//!   "field": [[0,0,0,0,0,0,0,0,0,0], ... 24 rows],
//!   "piece": {"type": "T", "rotation": "north", "location": 4},
//!   "flags": {"raise": false, "mirror": false, "color": false, "lock": true, "comment": "..."}
//! }
//! ```
//!
//! `field` and `flags` may be omitted when reading; they default to an empty
//! field and the default flags.

use serde::{Deserialize, Serialize};

use crate::types::{
    Field, Flags, Page, Piece, PieceType, Rotation, FIELD_HEIGHT, FIELD_SIZE, FIELD_WIDTH,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageJson {
    #[serde(default)]
    pub field: [[u8; FIELD_WIDTH]; FIELD_HEIGHT],
    pub piece: PieceJson,
    #[serde(default)]
    pub flags: FlagsJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceJson {
    #[serde(rename = "type")]
    pub kind: PieceTypeName,
    #[serde(default = "default_rotation")]
    pub rotation: RotationName,
    #[serde(default)]
    pub location: u8,
}

fn default_rotation() -> RotationName {
    RotationName(Rotation::North)
}

fn default_lock() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagsJson {
    #[serde(default)]
    pub raise: bool,
    #[serde(default)]
    pub mirror: bool,
    #[serde(default)]
    pub color: bool,
    #[serde(default = "default_lock")]
    pub lock: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Default for FlagsJson {
    fn default() -> Self {
        Flags::default().into()
    }
}

/// Piece type written as its single-letter name (`"_"` empty, `"X"` gray)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceTypeName(pub PieceType);

impl Serialize for PieceTypeName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for PieceTypeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PieceType::from_str(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown piece type: {}", s)))
    }
}

/// Rotation written as its lowercase name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationName(pub Rotation);

impl Serialize for RotationName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for RotationName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rotation::from_str(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown rotation: {}", s)))
    }
}

impl From<Flags> for FlagsJson {
    fn from(value: Flags) -> Self {
        Self {
            raise: value.raise,
            mirror: value.mirror,
            color: value.color,
            lock: value.lock,
            comment: value.comment,
        }
    }
}

impl From<FlagsJson> for Flags {
    fn from(value: FlagsJson) -> Self {
        Self {
            raise: value.raise,
            mirror: value.mirror,
            color: value.color,
            lock: value.lock,
            comment: value.comment,
        }
    }
}

impl From<&Page> for PageJson {
    fn from(page: &Page) -> Self {
        let mut field = [[0u8; FIELD_WIDTH]; FIELD_HEIGHT];
        for (row, cells) in field.iter_mut().zip(page.field.rows()) {
            row.copy_from_slice(cells);
        }

        Self {
            field,
            piece: PieceJson {
                kind: PieceTypeName(page.piece.kind),
                rotation: RotationName(page.piece.rotation),
                location: page.piece.location,
            },
            flags: page.flags.clone().into(),
        }
    }
}

impl From<PageJson> for Page {
    fn from(value: PageJson) -> Self {
        let mut cells = [0u8; FIELD_SIZE];
        for (chunk, row) in cells.chunks_exact_mut(FIELD_WIDTH).zip(value.field.iter()) {
            chunk.copy_from_slice(row);
        }

        Self {
            field: Field::from_cells(cells),
            piece: Piece::new(
                value.piece.kind.0,
                value.piece.rotation.0,
                value.piece.location,
            ),
            flags: value.flags.into(),
        }
    }
}

/// Serialize pages as a JSON array
pub fn pages_to_json(pages: &[Page], pretty: bool) -> serde_json::Result<String> {
    let pages: Vec<PageJson> = pages.iter().map(PageJson::from).collect();
    if pretty {
        serde_json::to_string_pretty(&pages)
    } else {
        serde_json::to_string(&pages)
    }
}

/// Parse a JSON array of pages
pub fn pages_from_json(json: &str) -> serde_json::Result<Vec<Page>> {
    let pages: Vec<PageJson> = serde_json::from_str(json)?;
    Ok(pages.into_iter().map(Page::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_page_uses_defaults() {
        let pages = pages_from_json(r#"[{"piece":{"type":"t"}}]"#).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].piece.kind, PieceType::T);
        assert_eq!(pages[0].piece.rotation, Rotation::North);
        assert_eq!(pages[0].flags, Flags::default());
        assert!(pages[0].field.is_empty());
    }

    #[test]
    fn field_rows_map_top_to_bottom() {
        let mut page = Page::default();
        page.field.set(3, 23, 8);
        page.field.set(0, 0, 1);

        let json = PageJson::from(&page);
        assert_eq!(json.field[23][3], 8);
        assert_eq!(json.field[0][0], 1);
        assert_eq!(Page::from(json), page);
    }

    #[test]
    fn names_serialize_as_strings() {
        let page = Page {
            piece: Piece::new(PieceType::Gray, Rotation::West, 9),
            ..Page::default()
        }
        .with_comment("hi");
        let json = pages_to_json(&[page.clone()], false).unwrap();
        assert!(json.contains(r#""type":"X""#));
        assert!(json.contains(r#""rotation":"west""#));
        assert!(json.contains(r#""comment":"hi""#));
        assert_eq!(pages_from_json(&json).unwrap(), vec![page]);
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(pages_from_json(r#"[{"piece":{"type":"q"}}]"#).is_err());
        assert!(pages_from_json(r#"[{"piece":{"type":"T","rotation":"up"}}]"#).is_err());
    }
}
