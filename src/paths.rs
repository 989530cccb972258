//! Path helpers shared by the cascade and the glob matcher.
//!
//! All lexical: nothing here touches the filesystem except reading the
//! current directory for relative inputs.

use crate::error::{EditorConfigError, Result};
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute and drop `.`/`..` components without resolving symlinks.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
	let joined = if path.is_absolute() {
		path.to_path_buf()
	} else {
		let cwd =
			std::env::current_dir().map_err(|source| EditorConfigError::CurrentDir { source })?;
		cwd.join(path)
	};

	Ok(normalize_lexically(&joined))
}

/// Remove `.` and `..` components from an absolute path.
///
/// `..` at the root stays at the root, matching how shells treat `/..`.
pub fn normalize_lexically(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
			Component::CurDir => {}
			Component::ParentDir => {
				// Never pops the root or a drive prefix.
				if normalized.parent().is_some() {
					normalized.pop();
				}
			}
			Component::Normal(part) => normalized.push(part),
		}
	}
	normalized
}

/// The filesystem root that `path` lives under (`/` on Unix, `C:\` on Windows).
pub fn filesystem_root(path: &Path) -> PathBuf {
	let mut root = PathBuf::new();
	for component in path.components() {
		match component {
			Component::Prefix(_) | Component::RootDir => root.push(component.as_os_str()),
			_ => break,
		}
	}
	root
}

/// Render a path with forward slashes regardless of the host separator.
pub fn to_slash(path: &Path) -> String {
	let rendered = path.to_string_lossy();
	if std::path::MAIN_SEPARATOR == '/' {
		rendered.into_owned()
	} else {
		rendered.replace(std::path::MAIN_SEPARATOR, "/")
	}
}
