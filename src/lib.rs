//! Tetris fumen (workspace facade crate).
//!
//! This package exposes `tetris_fumen::{codec,types}` while the implementation
//! lives in dedicated crates under `crates/`, plus the JSON mapping and
//! command-line plumbing used by the `fumen` binary.

pub use tetris_fumen_codec as codec;
pub use tetris_fumen_types as types;

pub mod cli;
pub mod json;
