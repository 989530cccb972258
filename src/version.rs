//! Format version handling.
//!
//! The caller-supplied version gates derivation rules that changed between
//! releases of the file format.

use crate::error::{EditorConfigError, Result};
use semver::Version;

/// The version this library implements, used when the caller supplies none.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// First version where `indent_style = tab` implies `indent_size = tab`.
pub const TAB_INDENT_SIZE_SINCE: Version = Version::new(0, 10, 0);

/// Parse a version string supplied by a caller.
pub fn parse_version(version: &str) -> Result<Version> {
	Version::parse(version.trim()).map_err(|source| EditorConfigError::InvalidVersion {
		version: version.to_string(),
		source,
	})
}

/// Whether `version` is at least `minimum`.
pub fn at_least(version: &Version, minimum: &Version) -> bool {
	version >= minimum
}
