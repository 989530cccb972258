//! Document parsing and cascade resolution.
//!
//! This module handles:
//! - Parsing INI-like documents into pattern-addressed sections
//! - Directory cascade discovery with `root` termination
//! - Merging matching sections and normalizing values

pub mod cascade;
pub mod normalize;
pub mod parser;
pub mod reader;
pub mod types;

pub use cascade::{
	discover_candidate_paths, merge_documents, resolve, resolve_async, resolve_from_files,
	resolve_with_reader, select_participating_documents,
};
pub use normalize::{KNOWN_PROPERTIES, apply_derivation_rules, coerce_value};
pub use parser::parse_document;
pub use reader::{DocumentReader, FsReader};
pub use types::{
	DEFAULT_CONFIG_FILE_NAME, Document, EffectiveConfig, LoadedDocument, ResolveOptions, Section,
	SourceFile, Value,
};
