//! Translation of EditorConfig glob patterns into anchored regular expressions.
//!
//! The dialect differs from shell globbing in a few places that matter:
//! - `*` stops at `/`, `**` crosses directory boundaries
//! - `/**/` also matches a single `/`, so `a/**/b` matches `a/b`
//! - `{a,b}` alternates, `{1..10}` matches an integer inside the range
//! - `{word}` and unbalanced braces are literal text
//! - a bracket class that would contain `/` is literal text
//!
//! Everything that depends on these rules lives here so the regex engine
//! underneath can change without changing what a pattern means.

/// An inclusive integer range produced by a `{min..max}` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
	pub min: i64,
	pub max: i64,
}

impl NumericRange {
	pub fn contains(&self, value: i64) -> bool {
		self.min <= value && value <= self.max
	}

	/// Whether `text` spells an integer inside the range in canonical form.
	/// Leading zeros, a `+` sign and `-0` never match.
	pub fn matches_text(&self, text: &str) -> bool {
		text.parse::<i64>()
			.is_ok_and(|value| value.to_string() == text && self.contains(value))
	}
}

/// Regex source for a glob, without anchors.
///
/// Each numeric range corresponds, in order, to one capture group in
/// `regex`; no other capture groups are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
	pub regex: String,
	pub numeric_ranges: Vec<NumericRange>,
}

/// Regex fragment for `/**/`: zero or more intervening path segments.
const ANY_SEGMENTS: &str = "(?:/|/.*/)";

/// Translate a glob pattern into regex source.
pub fn translate(pattern: &str) -> Translation {
	let chars: Vec<char> = pattern.chars().collect();
	Translator::new(&chars).run()
}

struct Translator<'a> {
	chars: &'a [char],
	pos: usize,
	out: String,
	numeric_ranges: Vec<NumericRange>,
	brace_depth: usize,
	in_class: bool,
	braces_balanced: bool,
}

impl<'a> Translator<'a> {
	fn new(chars: &'a [char]) -> Self {
		Translator {
			chars,
			pos: 0,
			out: String::new(),
			numeric_ranges: Vec::new(),
			brace_depth: 0,
			in_class: false,
			braces_balanced: braces_balanced(chars),
		}
	}

	fn run(mut self) -> Translation {
		while let Some(c) = self.next() {
			match c {
				'\\' => match self.next() {
					Some(escaped) => self.push_literal(escaped),
					None => self.push_literal('\\'),
				},
				'*' if !self.in_class => {
					if self.peek() == Some('*') {
						self.pos += 1;
						self.out.push_str(".*");
					} else {
						self.out.push_str("[^/]*");
					}
				}
				'?' if !self.in_class => self.out.push_str("[^/]"),
				'[' if !self.in_class => self.open_class(),
				']' if self.in_class => {
					self.out.push(']');
					self.in_class = false;
				}
				'-' if self.in_class => self.out.push('-'),
				'{' if !self.in_class => self.open_brace(),
				',' if self.brace_depth > 0 && !self.in_class => self.out.push('|'),
				'}' if self.brace_depth > 0 && !self.in_class => {
					self.out.push(')');
					self.brace_depth -= 1;
				}
				'/' if !self.in_class && self.starts_with_at(self.pos, "**/") => {
					self.pos += 3;
					self.out.push_str(ANY_SEGMENTS);
				}
				other => self.push_literal(other),
			}
		}

		// An unterminated class never opens (see open_class), so no cleanup here.
		Translation {
			regex: self.out,
			numeric_ranges: self.numeric_ranges,
		}
	}

	fn next(&mut self) -> Option<char> {
		let c = self.chars.get(self.pos).copied();
		if c.is_some() {
			self.pos += 1;
		}
		c
	}

	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn starts_with_at(&self, at: usize, needle: &str) -> bool {
		let mut idx = at;
		for expected in needle.chars() {
			if self.chars.get(idx) != Some(&expected) {
				return false;
			}
			idx += 1;
		}
		true
	}

	fn push_literal(&mut self, c: char) {
		let mut buf = [0u8; 4];
		self.out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
	}

	/// Called after `[`. Opens a character class, or emits a literal `[`
	/// when the class is empty, unterminated, would contain a `/`, or
	/// holds a reversed range such as `z-a`.
	fn open_class(&mut self) {
		let mut idx = self.pos;
		if matches!(self.chars.get(idx), Some('!') | Some('^')) {
			idx += 1;
		}
		let body_start = idx;
		let mut escaped = false;
		let mut close = None;
		while let Some(&c) = self.chars.get(idx) {
			if escaped {
				escaped = false;
			} else if c == '\\' {
				escaped = true;
			} else if c == '/' {
				break;
			} else if c == ']' {
				close = Some(idx);
				break;
			}
			idx += 1;
		}

		match close {
			Some(close) if close > body_start && ranges_ascend(&self.chars[body_start..close]) => {
				if body_start > self.pos {
					self.pos = body_start;
					self.out.push_str("[^");
				} else {
					self.out.push('[');
				}
				self.in_class = true;
			}
			_ => self.push_literal('['),
		}
	}

	/// Called after `{`. Opens an alternation, emits a numeric range, or
	/// treats the brace group as literal text.
	fn open_brace(&mut self) {
		let mut idx = self.pos;
		let mut escaped = false;
		let mut has_comma = false;
		let mut close = None;
		while let Some(&c) = self.chars.get(idx) {
			if escaped {
				escaped = false;
			} else if c == '\\' {
				escaped = true;
			} else if c == ',' {
				has_comma = true;
				break;
			} else if c == '}' {
				close = Some(idx);
				break;
			}
			idx += 1;
		}

		if !has_comma && let Some(close) = close {
			let inner: String = self.chars[self.pos..close].iter().collect();
			self.pos = close + 1;
			if let Some(range) = parse_numeric_range(&inner) {
				self.numeric_ranges.push(range);
				self.out.push_str(r"([+\-]?\d+)");
			} else {
				let nested = translate(&inner);
				self.out.push_str(r"\{");
				self.out.push_str(&nested.regex);
				self.out.push_str(r"\}");
				self.numeric_ranges.extend(nested.numeric_ranges);
			}
		} else if self.braces_balanced {
			self.out.push_str("(?:");
			self.brace_depth += 1;
		} else {
			self.push_literal('{');
		}
	}
}

/// Parse the body of a `{min..max}` group.
fn parse_numeric_range(inner: &str) -> Option<NumericRange> {
	let (min, max) = inner.split_once("..")?;
	let is_integer = |s: &str| {
		let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
		!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
	};
	if !is_integer(min) || !is_integer(max) {
		return None;
	}
	Some(NumericRange {
		min: min.parse().ok()?,
		max: max.parse().ok()?,
	})
}

/// Whether every `a-b` range in a class body has `a <= b`.
fn ranges_ascend(body: &[char]) -> bool {
	// (char, escaped) pairs, so an escaped `-` is never a range operator.
	let mut items = Vec::with_capacity(body.len());
	let mut chars = body.iter().copied();
	while let Some(c) = chars.next() {
		match c {
			'\\' => items.push((chars.next().unwrap_or('\\'), true)),
			other => items.push((other, false)),
		}
	}

	let mut idx = 0;
	while idx < items.len() {
		if idx + 2 < items.len() && items[idx + 1] == ('-', false) {
			if items[idx].0 > items[idx + 2].0 {
				return false;
			}
			idx += 3;
		} else {
			idx += 1;
		}
	}
	true
}

/// Whether every unescaped `{` has a matching unescaped `}`.
fn braces_balanced(chars: &[char]) -> bool {
	let mut depth: i64 = 0;
	let mut escaped = false;
	for &c in chars {
		if escaped {
			escaped = false;
			continue;
		}
		match c {
			'\\' => escaped = true,
			'{' => depth += 1,
			'}' => {
				depth -= 1;
				if depth < 0 {
					return false;
				}
			}
			_ => {}
		}
	}
	depth == 0
}
