use crate::config::types::{Document, Section};
use crate::error::{EditorConfigError, Result};

/// Parse document text into its ordered sections.
///
/// `label` names the document in syntax errors, usually its path.
pub fn parse_document(content: &str, label: &str) -> Result<Document> {
	let content = content.strip_prefix('\u{feff}').unwrap_or(content);
	let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

	let mut document = Document::default();

	for (idx, raw_line) in normalized.split('\n').enumerate() {
		let line = raw_line.trim();
		if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
			continue;
		}

		let error = |message: String| EditorConfigError::Syntax {
			label: label.to_string(),
			line: idx + 1,
			column: column_of(raw_line),
			message,
		};

		if let Some(header) = line.strip_prefix('[') {
			let pattern = header
				.strip_suffix(']')
				.ok_or_else(|| error(format!("unterminated section header {line:?}")))?;
			if pattern.is_empty() {
				return Err(error("empty section header".to_string()));
			}
			document.sections.push(Section::with_pattern(pattern));
			continue;
		}

		let Some((key, value)) = line.split_once(['=', ':']) else {
			return Err(error(format!(
				"expected a comment, section header or key = value pair, found {line:?}"
			)));
		};

		let key = key.trim();
		if key.is_empty() {
			return Err(error(format!("missing key in {line:?}")));
		}

		if let Some(section) = document.sections.last_mut() {
			section.set(key.to_lowercase(), unquote(value.trim()).to_string());
		}
	}

	Ok(document)
}

/// 1-based column of the first non-whitespace character.
fn column_of(raw_line: &str) -> usize {
	raw_line.chars().take_while(|c| c.is_whitespace()).count() + 1
}

/// Strip one pair of matching single or double quotes wrapping the whole value.
fn unquote(value: &str) -> &str {
	for quote in ['"', '\''] {
		if value.len() >= 2
			&& let Some(inner) = value
				.strip_prefix(quote)
				.and_then(|rest| rest.strip_suffix(quote))
		{
			return inner;
		}
	}
	value
}

#[cfg(test)]
mod tests {
	use super::*;

	fn props(section: &Section) -> Vec<(&str, &str)> {
		section
			.properties
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
			.collect()
	}

	#[test]
	fn test_parse_empty_document() {
		let document = parse_document("", "test").unwrap();

		assert_eq!(document.sections.len(), 1);
		assert!(document.sections[0].pattern.is_none());
		assert!(document.sections[0].properties.is_empty());
		assert!(!document.is_root());
	}

	#[test]
	fn test_parse_preamble_and_sections() {
		let content = r#"
# top-most EditorConfig file
root = true

[*]
end_of_line = lf
insert_final_newline = true

[*.{js,py}]
charset = utf-8
"#;
		let document = parse_document(content, "test").unwrap();

		assert_eq!(document.sections.len(), 3);
		assert!(document.is_root());
		assert_eq!(document.sections[1].pattern.as_deref(), Some("*"));
		assert_eq!(
			props(&document.sections[1]),
			vec![("end_of_line", "lf"), ("insert_final_newline", "true")]
		);
		assert_eq!(document.sections[2].pattern.as_deref(), Some("*.{js,py}"));
		assert_eq!(props(&document.sections[2]), vec![("charset", "utf-8")]);
	}

	#[test]
	fn test_keys_are_lowercased_values_are_not() {
		let document = parse_document("[*]\nIndent_Style = Tab\n", "test").unwrap();
		assert_eq!(props(&document.sections[1]), vec![("indent_style", "Tab")]);
	}

	#[test]
	fn test_colon_separator_and_whitespace() {
		let document = parse_document("[*]\n   key1:value1  \n\tkey2 =   value two\t\n", "test").unwrap();
		assert_eq!(
			props(&document.sections[1]),
			vec![("key1", "value1"), ("key2", "value two")]
		);
	}

	#[test]
	fn test_value_may_contain_separators() {
		let document = parse_document("[*]\nurl = http://example.com/?a=b\n", "test").unwrap();
		assert_eq!(props(&document.sections[1]), vec![("url", "http://example.com/?a=b")]);
	}

	#[test]
	fn test_empty_value() {
		let document = parse_document("[*]\nkey =\n", "test").unwrap();
		assert_eq!(props(&document.sections[1]), vec![("key", "")]);
	}

	#[test]
	fn test_quoted_values_are_unwrapped() {
		let content = "[*]\na = \"double\"\nb = 'single'\nc = \"mismatched'\nd = \"\n";
		let document = parse_document(content, "test").unwrap();
		assert_eq!(
			props(&document.sections[1]),
			vec![
				("a", "double"),
				("b", "single"),
				("c", "\"mismatched'"),
				("d", "\"")
			]
		);
	}

	#[test]
	fn test_repeated_key_last_wins() {
		let document = parse_document("[*]\nkey = one\nKEY = two\n", "test").unwrap();
		assert_eq!(props(&document.sections[1]), vec![("key", "two")]);
	}

	#[test]
	fn test_repeated_headers_stay_separate() {
		let document = parse_document("[*]\na = 1\n[*]\na = 2\n", "test").unwrap();
		assert_eq!(document.sections.len(), 3);
		assert_eq!(props(&document.sections[1]), vec![("a", "1")]);
		assert_eq!(props(&document.sections[2]), vec![("a", "2")]);
	}

	#[test]
	fn test_header_pattern_is_verbatim() {
		let document = parse_document("  [ \\[x\\]/*.c ]  \n", "test").unwrap();
		assert_eq!(document.sections[1].pattern.as_deref(), Some(" \\[x\\]/*.c "));
	}

	#[test]
	fn test_comments_are_skipped() {
		let content = "; comment\n  # indented comment\n[*]\n;key = value\n";
		let document = parse_document(content, "test").unwrap();
		assert!(document.sections[1].properties.is_empty());
	}

	#[test]
	fn test_crlf_and_bom() {
		let content = "\u{feff}root = true\r\n[*]\r\nkey = value\r\n";
		let document = parse_document(content, "test").unwrap();
		assert!(document.is_root());
		assert_eq!(props(&document.sections[1]), vec![("key", "value")]);
	}

	#[test]
	fn test_syntax_error_reports_position() {
		let content = "[*]\nkey = value\n   not a property\n";
		let result = parse_document(content, "/proj/.editorconfig");

		assert!(result.is_err());
		match result.unwrap_err() {
			EditorConfigError::Syntax {
				label,
				line,
				column,
				..
			} => {
				assert_eq!(label, "/proj/.editorconfig");
				assert_eq!(line, 3);
				assert_eq!(column, 4);
			}
			_ => panic!("Expected Syntax error"),
		}
	}

	#[test]
	fn test_syntax_error_display_includes_label() {
		let err = parse_document("[*", "/proj/.editorconfig").unwrap_err();
		assert!(err.to_string().starts_with("/proj/.editorconfig:1:1: "));
		assert!(err.to_string().contains("unterminated section header"));
	}

	#[test]
	fn test_missing_key_is_an_error() {
		assert!(parse_document("[*]\n= value\n", "test").is_err());
	}

	#[test]
	fn test_empty_header_is_an_error() {
		assert!(parse_document("[]\n", "test").is_err());
	}

	#[test]
	fn test_parsing_is_deterministic() {
		let content = "root = true\n[*.md]\ntrim_trailing_whitespace = false\n[Makefile]\nindent_style = tab\n";
		assert_eq!(
			parse_document(content, "a").unwrap(),
			parse_document(content, "b").unwrap()
		);
	}
}
