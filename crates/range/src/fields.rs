//! # Fields
//!
//! Record lines are sequences of fields separated by whitespace:
//!
//! ```text
//! line    = field* comment?
//! field   = quoted | bare
//! quoted  = '"' (escape | [^"\\])* '"'
//! escape  = '\' ('"' | '\' | 'n' | 'r' | 't')
//! bare    = [^ whitespace '#' ]+        (must not begin with '"')
//! comment = '#' .*
//! ```
//!
//! [`quote`] only wraps a field when reading it back bare would change it: when it
//! is empty, contains whitespace or `#`, or begins with `"`. A `#` inside a quoted
//! field is text, not a comment.

use std::borrow::Cow;

use crate::error::MalformedEntry;

/// Splits a raw line into unquoted fields, dropping any trailing comment.
///
/// Returns an empty vector for blank and comment-only lines.
pub fn split(line: &str) -> Result<Vec<String>, MalformedEntry> {
	let mut fields = Vec::new();
	let mut chars = line.char_indices().peekable();

	while let Some(&(column, ch)) = chars.peek() {
		if ch.is_whitespace() {
			chars.next();
			continue;
		}
		if ch == '#' {
			break;
		}

		if ch == '"' {
			chars.next();
			let mut field = String::new();
			loop {
				match chars.next() {
					None => return Err(MalformedEntry::UnterminatedQuote { column }),
					Some((_, '"')) => break,
					Some((_, '\\')) => match chars.next() {
						Some((_, '"')) => field.push('"'),
						Some((_, '\\')) => field.push('\\'),
						Some((_, 'n')) => field.push('\n'),
						Some((_, 'r')) => field.push('\r'),
						Some((_, 't')) => field.push('\t'),
						Some((_, other)) => return Err(MalformedEntry::InvalidEscape(other)),
						None => return Err(MalformedEntry::UnterminatedQuote { column }),
					},
					Some((_, c)) => field.push(c),
				}
			}

			if let Some(&(at, next)) = chars.peek()
				&& !next.is_whitespace()
				&& next != '#'
			{
				return Err(MalformedEntry::TrailingAfterQuote { column: at });
			}
			fields.push(field);
		} else {
			let mut field = String::new();
			while let Some(&(_, c)) = chars.peek() {
				if c.is_whitespace() || c == '#' {
					break;
				}
				field.push(c);
				chars.next();
			}
			fields.push(field);
		}
	}

	Ok(fields)
}

/// Quotes a field if it would not survive [`split`] bare.
pub fn quote(field: &str) -> Cow<'_, str> {
	let needs_quotes = field.is_empty()
		|| field.starts_with('"')
		|| field.chars().any(|c| c.is_whitespace() || c == '#');
	if !needs_quotes {
		return Cow::Borrowed(field);
	}

	let mut out = String::with_capacity(field.len() + 2);
	out.push('"');
	for ch in field.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c => out.push(c),
		}
	}
	out.push('"');
	Cow::Owned(out)
}

/// Quotes each field and joins them with single spaces.
pub fn join<I, S>(fields: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut out = String::new();
	for field in fields {
		if !out.is_empty() {
			out.push(' ');
		}
		out.push_str(&quote(field.as_ref()));
	}
	out
}

/// Checks that a record carries exactly `expected` fields.
pub(crate) fn expect_arity(kind: &str, fields: &[String], expected: usize) -> Result<(), MalformedEntry> {
	if fields.len() == expected {
		Ok(())
	} else {
		Err(MalformedEntry::Arity {
			kind: kind.to_string(),
			expected,
			found: fields.len(),
		})
	}
}

/// Parses an unsigned offset, length or index field.
pub(crate) fn parse_u32(field: &str) -> Result<u32, MalformedEntry> {
	field.parse().map_err(|_| MalformedEntry::InvalidNumber(field.to_string()))
}

/// Parses a `true`/`false` field.
pub(crate) fn parse_bool(field: &str) -> Result<bool, MalformedEntry> {
	match field {
		"true" => Ok(true),
		"false" => Ok(false),
		_ => Err(MalformedEntry::InvalidBool(field.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_bare_fields() {
		assert_eq!(split("method 10 3 foo a/B foo ()V").unwrap(), vec![
			"method", "10", "3", "foo", "a/B", "foo", "()V"
		]);
	}

	#[test]
	fn split_blank_and_comment_lines() {
		assert!(split("").unwrap().is_empty());
		assert!(split("   \t ").unwrap().is_empty());
		assert!(split("  # Start Class a/B").unwrap().is_empty());
	}

	#[test]
	fn split_strips_trailing_comment() {
		assert_eq!(split("end # done").unwrap(), vec!["end"]);
		assert_eq!(split("end#done").unwrap(), vec!["end"]);
	}

	#[test]
	fn hash_inside_quotes_is_text() {
		assert_eq!(split(r#"field_literal 1 2 "a # b" x"#).unwrap(), vec![
			"field_literal",
			"1",
			"2",
			"a # b",
			"x"
		]);
	}

	#[test]
	fn quoted_escapes() {
		assert_eq!(split(r#""\"hi\\\n""#).unwrap(), vec!["\"hi\\\n"]);
	}

	#[test]
	fn unterminated_quote() {
		assert_eq!(
			split(r#"class 1 2 "abc"#),
			Err(MalformedEntry::UnterminatedQuote { column: 10 })
		);
	}

	#[test]
	fn garbage_after_quote() {
		assert_eq!(
			split(r#""abc"def"#),
			Err(MalformedEntry::TrailingAfterQuote { column: 5 })
		);
	}

	#[test]
	fn invalid_escape() {
		assert_eq!(split(r#""a\qb""#), Err(MalformedEntry::InvalidEscape('q')));
	}

	#[test]
	fn quote_only_when_needed() {
		assert_eq!(quote("com/example/Foo"), "com/example/Foo");
		assert_eq!(quote("a\\b"), "a\\b");
		assert_eq!(quote(""), "\"\"");
		assert_eq!(quote("a b"), "\"a b\"");
		assert_eq!(quote("\"lit\""), r#""\"lit\"""#);
		assert_eq!(quote("x#y"), "\"x#y\"");
	}

	#[test]
	fn quote_then_split_is_identity() {
		let samples = ["", "plain", "two words", "\"quoted\"", "tab\there", "back\\slash \"q\"", "#"];
		let line = join(samples);
		assert_eq!(split(&line).unwrap(), samples);
	}

	#[test]
	fn numbers_and_bools() {
		assert_eq!(parse_u32("42"), Ok(42));
		assert_eq!(parse_u32("-1"), Err(MalformedEntry::InvalidNumber("-1".into())));
		assert_eq!(parse_bool("true"), Ok(true));
		assert_eq!(parse_bool("TRUE"), Err(MalformedEntry::InvalidBool("TRUE".into())));
	}
}
