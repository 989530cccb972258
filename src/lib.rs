//! EditorConfig core - resolve the effective properties for a file.
//!
//! This library provides the core functionality, including:
//! - Parsing `.editorconfig` documents into glob-addressed sections
//! - Discovering documents in ancestor directories, honoring `root = true`
//! - Matching section globs in the EditorConfig dialect
//! - Merging properties near-over-far with value coercion and derived indentation
//!
//! # Example
//!
//! ```no_run
//! use editorconfig_core::config::{ResolveOptions, resolve};
//! use std::path::Path;
//!
//! let config = resolve(Path::new("src/main.rs"), &ResolveOptions::default()).unwrap();
//!
//! for (key, value) in config.iter() {
//!     println!("{key}={value}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod glob;
pub mod paths;
pub mod version;

pub use config::{EffectiveConfig, ResolveOptions, SourceFile, Value};
pub use error::{EditorConfigError, Result};
