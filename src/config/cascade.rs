use crate::config::normalize::{apply_derivation_rules, fold_section};
use crate::config::parser::parse_document;
use crate::config::reader::{DocumentReader, FsReader, read_all, read_all_async};
use crate::config::types::{EffectiveConfig, LoadedDocument, ResolveOptions, SourceFile};
use crate::error::{EditorConfigError, Result};
use crate::glob::CompiledGlob;
use crate::paths::{absolutize, filesystem_root, to_slash};
use crate::version::parse_version;
use semver::Version;
use std::path::{Path, PathBuf};

/// Options validated and defaulted for one target file.
#[derive(Debug, Clone)]
struct Prepared {
	target: PathBuf,
	root: PathBuf,
	config_file_name: String,
	version: Version,
}

/// Validate options before any I/O happens.
fn prepare(target: &Path, options: &ResolveOptions) -> Result<Prepared> {
	let name = &options.config_file_name;
	if name.is_empty() || name.contains(['/', std::path::MAIN_SEPARATOR]) {
		return Err(EditorConfigError::InvalidConfigName { name: name.clone() });
	}

	let version = parse_version(&options.version)?;
	let target = absolutize(target)?;
	let root = match &options.root {
		Some(root) => absolutize(root)?,
		None => filesystem_root(&target),
	};

	if target == root || !target.starts_with(&root) {
		return Err(EditorConfigError::RootNotAncestor { root, target });
	}

	Ok(Prepared {
		target,
		root,
		config_file_name: name.clone(),
		version,
	})
}

/// Candidate document paths from the target's directory up to `root`.
///
/// The order is nearest first. `root` itself is included; nothing above it is.
pub fn discover_candidate_paths(
	target: &Path,
	config_file_name: &str,
	root: &Path,
) -> Vec<PathBuf> {
	let mut paths = Vec::new();
	let mut current_dir = target;

	// Walk up the directory tree
	while let Some(parent) = current_dir.parent() {
		current_dir = parent;
		paths.push(current_dir.join(config_file_name));

		if current_dir == root {
			break;
		}
	}

	tracing::debug!(
		file = %target.display(),
		candidates = paths.len(),
		"discovered candidate documents"
	);
	paths
}

/// Parse nearest-first documents, stopping after the first root declaration.
///
/// Any syntax error fails the whole call. Empty contents (missing files)
/// parse to an empty document that never declares root.
pub fn select_participating_documents(files: &[SourceFile]) -> Result<Vec<LoadedDocument>> {
	let mut documents = Vec::new();

	for file in files {
		let document = parse_document(&file.contents, &file.path.display().to_string())?;
		let is_root = document.is_root();

		documents.push(LoadedDocument {
			document,
			path: file.path.clone(),
		});

		if is_root {
			tracing::debug!(path = %file.path.display(), "root declaration stops the cascade");
			break;
		}
	}

	Ok(documents)
}

/// Merge matching sections of nearest-first documents into the effective configuration.
///
/// Documents apply farthest first so nearer ones overwrite; sections apply
/// in file order. Derivation rules run once at the end.
pub fn merge_documents(
	documents: &[LoadedDocument],
	target: &Path,
	version: &Version,
) -> Result<EffectiveConfig> {
	let target_path = to_slash(target);

	let merged = documents
		.iter()
		.rev()
		.try_fold(EffectiveConfig::new(), |config, loaded| -> Result<EffectiveConfig> {
			let directory = loaded.path.parent().unwrap_or(Path::new(""));
			let prefix = to_slash(directory);

			loaded
				.document
				.pattern_sections()
				.try_fold(config, |config, (pattern, section)| -> Result<EffectiveConfig> {
					let glob = CompiledGlob::new(&prefix, pattern)?;
					if !glob.is_match(&target_path) {
						return Ok(config);
					}
					tracing::debug!(
						document = %loaded.path.display(),
						pattern = %glob.pattern,
						"section matches"
					);
					Ok(fold_section(config, section))
				})
		})?;

	Ok(apply_derivation_rules(merged, version))
}

/// Resolve the effective configuration of `target` from the filesystem.
pub fn resolve(target: &Path, options: &ResolveOptions) -> Result<EffectiveConfig> {
	resolve_with_reader(target, options, &FsReader)
}

/// Resolve using a custom document reader for discovery.
pub fn resolve_with_reader<R: DocumentReader + ?Sized>(
	target: &Path,
	options: &ResolveOptions,
	reader: &R,
) -> Result<EffectiveConfig> {
	let prepared = prepare(target, options)?;
	let paths =
		discover_candidate_paths(&prepared.target, &prepared.config_file_name, &prepared.root);
	let files = read_all(reader, &paths);
	resolve_files(&prepared, &files)
}

/// Resolve from documents the caller already read, ordered nearest first.
///
/// No discovery happens; `options.root` and `options.config_file_name` are
/// validated but otherwise unused.
pub fn resolve_from_files(
	target: &Path,
	files: &[SourceFile],
	options: &ResolveOptions,
) -> Result<EffectiveConfig> {
	let prepared = prepare(target, options)?;
	let files = files
		.iter()
		.map(|file| {
			Ok(SourceFile {
				path: absolutize(&file.path)?,
				contents: file.contents.clone(),
			})
		})
		.collect::<Result<Vec<_>>>()?;
	resolve_files(&prepared, &files)
}

/// Resolve from the filesystem, reading candidate documents concurrently.
pub async fn resolve_async(target: &Path, options: &ResolveOptions) -> Result<EffectiveConfig> {
	let prepared = prepare(target, options)?;
	let paths =
		discover_candidate_paths(&prepared.target, &prepared.config_file_name, &prepared.root);
	let files = read_all_async(&paths).await;
	resolve_files(&prepared, &files)
}

fn resolve_files(prepared: &Prepared, files: &[SourceFile]) -> Result<EffectiveConfig> {
	let documents = select_participating_documents(files)?;
	merge_documents(&documents, &prepared.target, &prepared.version)
}
