use crate::config::types::SourceFile;
use std::path::{Path, PathBuf};

/// Source of raw document text.
///
/// A missing or unreadable document is `None`; callers treat it as empty.
pub trait DocumentReader {
	fn read(&self, path: &Path) -> Option<String>;
}

/// Reads documents from the local filesystem as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl DocumentReader for FsReader {
	fn read(&self, path: &Path) -> Option<String> {
		match std::fs::read_to_string(path) {
			Ok(contents) => Some(contents),
			Err(e) => {
				tracing::debug!(path = %path.display(), error = %e, "document unreadable, treating as empty");
				None
			}
		}
	}
}

/// In-memory documents keyed by path, for virtual filesystems and tests.
impl DocumentReader for [SourceFile] {
	fn read(&self, path: &Path) -> Option<String> {
		self.iter()
			.find(|file| file.path == path)
			.map(|file| file.contents.clone())
	}
}

/// Read every candidate path in order. Unreadable documents become empty.
pub fn read_all<R: DocumentReader + ?Sized>(reader: &R, paths: &[PathBuf]) -> Vec<SourceFile> {
	paths
		.iter()
		.map(|path| SourceFile {
			path: path.clone(),
			contents: reader.read(path).unwrap_or_default(),
		})
		.collect()
}

/// Read every candidate path concurrently from the filesystem.
///
/// Results keep the order of `paths`, which root truncation depends on.
pub async fn read_all_async(paths: &[PathBuf]) -> Vec<SourceFile> {
	let reads = paths.iter().map(|path| async move {
		let contents = match tokio::fs::read_to_string(path).await {
			Ok(contents) => contents,
			Err(e) => {
				tracing::debug!(path = %path.display(), error = %e, "document unreadable, treating as empty");
				String::new()
			}
		};
		SourceFile {
			path: path.clone(),
			contents,
		}
	});

	futures::future::join_all(reads).await
}
