use crate::error::{EditorConfigError, Result};
use crate::glob::translate::{NumericRange, translate};
use regex::Regex;

/// A section pattern compiled against the directory that owns its document.
#[derive(Debug, Clone)]
pub struct CompiledGlob {
	/// The full pattern: directory prefix joined with the anchored glob.
	pub pattern: String,

	/// Anchored regex for the whole path.
	regex: Regex,

	/// Ranges checked against the regex's capture groups, in order.
	numeric_ranges: Vec<NumericRange>,
}

impl CompiledGlob {
	/// Compile `pattern` as written in a section header of a document that
	/// lives in `directory_prefix` (slash-separated, no trailing slash needed).
	///
	/// The prefix is matched literally; only the pattern is a glob.
	pub fn new(directory_prefix: &str, pattern: &str) -> Result<Self> {
		let prefix = directory_prefix.trim_end_matches('/');
		let anchored = anchor_pattern(pattern);
		let translation = translate(&anchored);

		let source = format!("^(?s:{}{})$", regex::escape(prefix), translation.regex);
		tracing::trace!(pattern, prefix, regex = %source, "translated section glob");

		let regex = Regex::new(&source).map_err(|source| EditorConfigError::InvalidPattern {
			pattern: pattern.to_string(),
			source,
		})?;

		Ok(CompiledGlob {
			pattern: format!("{prefix}{anchored}"),
			regex,
			numeric_ranges: translation.numeric_ranges,
		})
	}

	/// Check a slash-normalized absolute path against this glob.
	pub fn is_match(&self, path: &str) -> bool {
		let Some(captures) = self.regex.captures(path) else {
			return false;
		};

		// Groups from alternation branches that did not participate are skipped.
		self.numeric_ranges
			.iter()
			.zip(captures.iter().skip(1))
			.all(|(range, group)| match group {
				Some(group) => range.matches_text(group.as_str()),
				None => true,
			})
	}
}

/// Anchor a section pattern below its document's directory.
///
/// The result always starts with `/`:
/// - no `/` in the pattern: it may match at any depth (`**/` prepended)
/// - leading `/`: anchored directly in the directory
/// - otherwise: relative to the directory as written
pub fn anchor_pattern(pattern: &str) -> String {
	if !pattern.contains('/') {
		format!("/**/{pattern}")
	} else if pattern.starts_with('/') {
		pattern.to_string()
	} else {
		format!("/{pattern}")
	}
}

/// Whether `file_path` matches `pattern` from a document in `directory_prefix`.
pub fn matches(file_path: &str, pattern: &str, directory_prefix: &str) -> Result<bool> {
	Ok(CompiledGlob::new(directory_prefix, pattern)?.is_match(file_path))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_anchor_pattern() {
		assert_eq!(anchor_pattern("*.txt"), "/**/*.txt");
		assert_eq!(anchor_pattern("/*.txt"), "/*.txt");
		assert_eq!(anchor_pattern("lib/*.rs"), "/lib/*.rs");
	}

	#[test]
	fn test_basename_pattern_matches_any_depth() {
		assert!(matches("/a/b/d.txt", "*.txt", "/a/b").unwrap());
		assert!(matches("/a/b/c/d.txt", "*.txt", "/a/b").unwrap());
		assert!(!matches("/a/d.txt", "*.txt", "/a/b").unwrap());
	}

	#[test]
	fn test_leading_slash_anchors_to_directory() {
		assert!(matches("/a/b/d.txt", "/*.txt", "/a/b").unwrap());
		assert!(!matches("/a/b/c/d.txt", "/*.txt", "/a/b").unwrap());
	}

	#[test]
	fn test_relative_path_pattern() {
		assert!(matches("/a/b/lib/x.rs", "lib/*.rs", "/a/b").unwrap());
		assert!(!matches("/a/b/src/lib/x.rs", "lib/*.rs", "/a/b").unwrap());
	}

	#[test]
	fn test_dotfiles_are_matched_by_star() {
		assert!(matches("/a/.hidden", "*", "/a").unwrap());
		assert!(matches("/a/.github/ci.yml", "*.yml", "/a").unwrap());
	}

	#[test]
	fn test_directory_prefix_is_literal() {
		assert!(matches("/w[x]/f.c", "*.c", "/w[x]").unwrap());
		assert!(!matches("/wx/f.c", "*.c", "/w[x]").unwrap());
	}

	#[test]
	fn test_root_directory_prefix() {
		assert!(matches("/f.c", "*.c", "/").unwrap());
		assert!(matches("/deep/f.c", "*.c", "/").unwrap());
	}

	#[test]
	fn test_matching_is_case_sensitive() {
		assert!(!matches("/a/README.MD", "*.md", "/a").unwrap());
	}

	#[test]
	fn test_numeric_range_checks_value() {
		let glob = CompiledGlob::new("/a", "file{3..120}").unwrap();
		assert!(glob.is_match("/a/file3"));
		assert!(glob.is_match("/a/file120"));
		assert!(!glob.is_match("/a/file121"));
		assert!(!glob.is_match("/a/file2"));
		assert!(!glob.is_match("/a/filex"));
		assert!(!glob.is_match("/a/file060"));
		assert!(!glob.is_match("/a/file05"));
	}

	#[test]
	fn test_reversed_class_range_is_literal() {
		let glob = CompiledGlob::new("/a", "[z-a].c").unwrap();
		assert!(glob.is_match("/a/[z-a].c"));
		assert!(!glob.is_match("/a/m.c"));
	}
}
