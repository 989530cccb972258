//! Value coercion during merge and derivation rules after it.

use crate::config::types::{EffectiveConfig, Section, Value};
use crate::version::{TAB_INDENT_SIZE_SINCE, at_least};
use semver::Version;

/// Properties whose string values are case-insensitive and stored lower-cased.
pub const KNOWN_PROPERTIES: &[&str] = &[
	"end_of_line",
	"indent_style",
	"indent_size",
	"insert_final_newline",
	"trim_trailing_whitespace",
	"charset",
];

/// Coerce a raw property value into a typed value.
///
/// JSON scalars (booleans, numbers, strings) are taken as parsed. `null`,
/// arrays, objects and anything unparseable stay raw strings, lower-cased
/// for known properties.
pub fn coerce_value(key: &str, raw: &str) -> Value {
	if let Some(value) = parse_scalar(raw) {
		return value;
	}

	if KNOWN_PROPERTIES.contains(&key) {
		Value::String(raw.to_lowercase())
	} else {
		Value::String(raw.to_string())
	}
}

fn parse_scalar(raw: &str) -> Option<Value> {
	match serde_json::from_str::<serde_json::Value>(raw) {
		Ok(serde_json::Value::Bool(b)) => Some(Value::Bool(b)),
		Ok(serde_json::Value::Number(n)) => n.as_f64().map(Value::Number),
		Ok(serde_json::Value::String(s)) => Some(Value::String(s)),
		Ok(_) => None,
		Err(_) => parse_zero_padded_integer(raw).map(Value::Number),
	}
}

/// Integers written with leading zeros (`007`), which strict JSON rejects.
fn parse_zero_padded_integer(raw: &str) -> Option<f64> {
	let digits = raw.strip_prefix('-').unwrap_or(raw);
	if digits.len() > 1 && digits.starts_with('0') && digits.chars().all(|c| c.is_ascii_digit()) {
		raw.parse().ok()
	} else {
		None
	}
}

/// Fold one matching section into the accumulator. Later keys win.
pub fn fold_section(config: EffectiveConfig, section: &Section) -> EffectiveConfig {
	section.properties.iter().fold(config, |config, (key, raw)| {
		let key = key.to_lowercase();
		let value = coerce_value(&key, raw);
		config.with(key, value)
	})
}

/// Apply the indentation derivation rules, in order.
///
/// 1. `indent_style = tab` without `indent_size` implies `indent_size = tab`
///    (only for versions at least 0.10.0)
/// 2. a non-`tab` `indent_size` without `tab_width` copies into `tab_width`
/// 3. `indent_size = tab` with a `tab_width` takes the `tab_width`
pub fn apply_derivation_rules(mut config: EffectiveConfig, version: &Version) -> EffectiveConfig {
	if config.get("indent_style").is_some_and(|v| v.is_str("tab"))
		&& !config.contains_key("indent_size")
		&& at_least(version, &TAB_INDENT_SIZE_SINCE)
	{
		config = config.with("indent_size", Value::from("tab"));
	}

	if let Some(indent_size) = config.get("indent_size").cloned()
		&& !indent_size.is_str("tab")
		&& !config.contains_key("tab_width")
	{
		config = config.with("tab_width", indent_size);
	}

	if config.get("indent_size").is_some_and(|v| v.is_str("tab"))
		&& let Some(tab_width) = config.get("tab_width").cloned()
	{
		config = config.with("indent_size", tab_width);
	}

	config
}
