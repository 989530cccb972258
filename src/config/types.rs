use serde::Serialize;
use serde::ser::SerializeMap;
use std::fmt;
use std::path::PathBuf;

use crate::version::LIBRARY_VERSION;

/// Default name of the documents discovered in each ancestor directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".editorconfig";

/// A pattern-addressed block of properties within a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
	/// The glob from the section header, verbatim. `None` for the preamble.
	pub pattern: Option<String>,

	/// Lower-cased keys with raw values, in first-occurrence order.
	pub properties: Vec<(String, String)>,
}

impl Section {
	/// The unnamed section holding properties declared before any header.
	pub fn preamble() -> Self {
		Section::default()
	}

	pub fn with_pattern(pattern: impl Into<String>) -> Self {
		Section {
			pattern: Some(pattern.into()),
			properties: Vec::new(),
		}
	}

	/// Set a property; a repeated key overwrites the earlier value in place.
	pub fn set(&mut self, key: String, value: String) {
		match self.properties.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = value,
			None => self.properties.push((key, value)),
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.properties
			.iter()
			.find(|(existing, _)| existing == key)
			.map(|(_, value)| value.as_str())
	}
}

/// Parsed form of one configuration file. The first section is always the preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	pub sections: Vec<Section>,
}

impl Default for Document {
	fn default() -> Self {
		Document {
			sections: vec![Section::preamble()],
		}
	}
}

impl Document {
	pub fn preamble(&self) -> Option<&Section> {
		self.sections.first().filter(|section| section.pattern.is_none())
	}

	/// Whether the preamble declares `root = true` (case-insensitive).
	pub fn is_root(&self) -> bool {
		self.preamble()
			.and_then(|preamble| preamble.get("root"))
			.is_some_and(|value| value.eq_ignore_ascii_case("true"))
	}

	/// Sections that take part in glob matching, in file order.
	pub fn pattern_sections(&self) -> impl Iterator<Item = (&str, &Section)> {
		self.sections
			.iter()
			.filter_map(|section| section.pattern.as_deref().map(|pattern| (pattern, section)))
	}
}

/// A parsed document with the path it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
	pub document: Document,
	pub path: PathBuf,
}

/// Raw document contents supplied by a caller instead of filesystem discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
	pub path: PathBuf,
	pub contents: String,
}

impl SourceFile {
	pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
		SourceFile {
			path: path.into(),
			contents: contents.into(),
		}
	}
}

/// A coerced property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Bool(bool),
	Number(f64),
	String(String),
}

impl Value {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// True for the string `value`, compared exactly.
	pub fn is_str(&self, value: &str) -> bool {
		self.as_str() == Some(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Bool(b) => write!(f, "{b}"),
			Value::Number(n) => f.write_str(&format_number(*n)),
			Value::String(s) => f.write_str(s),
		}
	}
}

/// Render a number the way property values are conventionally printed:
/// integers without a fraction, exponent form (`1e+21`, `1e-7`) outside
/// `1e-6..1e21`.
fn format_number(n: f64) -> String {
	let magnitude = n.abs();
	if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
		let rendered = format!("{n:e}");
		return match rendered.split_once('e') {
			Some((mantissa, exponent)) if !exponent.starts_with('-') => {
				format!("{mantissa}e+{exponent}")
			}
			_ => rendered,
		};
	}
	if n.fract() == 0.0 {
		format!("{}", n as i128)
	} else {
		n.to_string()
	}
}

impl Serialize for Value {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
				serializer.serialize_i64(*n as i64)
			}
			Value::Number(n) => serializer.serialize_f64(*n),
			Value::String(s) => serializer.serialize_str(s),
		}
	}
}

/// The merged properties for one target file.
///
/// Keys keep the position of their first insertion; later writes replace
/// the value only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveConfig {
	entries: Vec<(String, Value)>,
}

impl EffectiveConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Return this configuration with `key` set to `value`.
	pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
		let key = key.into();
		match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = value,
			None => self.entries.push((key, value)),
		}
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == key)
			.map(|(_, value)| value)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl IntoIterator for EffectiveConfig {
	type Item = (String, Value);
	type IntoIter = std::vec::IntoIter<(String, Value)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl Serialize for EffectiveConfig {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (key, value) in &self.entries {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

/// Options for one resolution call. Defaults are applied here, at the call boundary.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
	/// File name looked up in each ancestor directory.
	pub config_file_name: String,

	/// Format version gating version-sensitive derivation rules.
	pub version: String,

	/// Outermost directory searched. Defaults to the target's filesystem root.
	pub root: Option<PathBuf>,
}

impl Default for ResolveOptions {
	fn default() -> Self {
		ResolveOptions {
			config_file_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
			version: LIBRARY_VERSION.to_string(),
			root: None,
		}
	}
}
