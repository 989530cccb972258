use std::path::PathBuf;

/// Library-level structured errors for editorconfig resolution.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum EditorConfigError {
	/// Malformed document text. Aborts resolution of the target file.
	#[error("{label}:{line}:{column}: {message}")]
	Syntax {
		label: String,
		line: usize,
		column: usize,
		message: String,
	},

	#[error("Root directory {root} is not an ancestor of {target}")]
	RootNotAncestor { root: PathBuf, target: PathBuf },

	#[error("Invalid version: {version}")]
	InvalidVersion {
		version: String,
		#[source]
		source: semver::Error,
	},

	#[error("Invalid glob pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid config file name: {name:?}")]
	InvalidConfigName { name: String },

	#[error("Failed to get current directory")]
	CurrentDir {
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using EditorConfigError.
pub type Result<T> = std::result::Result<T, EditorConfigError>;
