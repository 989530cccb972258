//! Section pattern matching.
//!
//! This module handles:
//! - Translating the EditorConfig glob dialect into regular expressions
//! - Anchoring section patterns at the directory that owns the document

pub mod matcher;
pub mod translate;

pub use matcher::{CompiledGlob, anchor_pattern, matches};
pub use translate::{NumericRange, Translation, translate};
