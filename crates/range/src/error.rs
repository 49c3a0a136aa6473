//! Error types for decoding and validating range indices.

use thiserror::Error;

/// A single record could not be decoded from its fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEntry {
	/// The record carries the wrong number of fields for its type.
	#[error("{kind} expects {expected} fields, found {found}")]
	Arity {
		/// Record type token, e.g. `method` or `classdef`.
		kind: String,
		/// Number of fields the record type requires.
		expected: usize,
		/// Number of fields present on the line.
		found: usize,
	},

	/// A quoted field was not closed before the end of the line.
	#[error("unterminated quoted field starting at byte {column}")]
	UnterminatedQuote {
		/// Byte offset of the opening quote.
		column: usize,
	},

	/// A closing quote was followed by something other than whitespace.
	#[error("unexpected character after quoted field at byte {column}")]
	TrailingAfterQuote {
		/// Byte offset of the offending character.
		column: usize,
	},

	/// An unknown backslash escape inside a quoted field.
	#[error("invalid escape sequence '\\{0}'")]
	InvalidEscape(char),

	/// A numeric field did not parse as an unsigned integer.
	#[error("invalid number: {0:?}")]
	InvalidNumber(String),

	/// A boolean field was neither `true` nor `false`.
	#[error("invalid boolean: {0:?}")]
	InvalidBool(String),

	/// The record type token names no entry type.
	#[error("unknown entry type: {0:?}")]
	UnknownEntryType(String),

	/// The `...def` token names no structure type.
	#[error("unknown structure type: {0:?}")]
	UnknownStructureType(String),

	/// The `meta` record names no meta type.
	#[error("unknown meta type: {0:?}")]
	UnknownMetaType(String),

	/// The `start` line declares a format version this reader does not know.
	#[error("unsupported format spec: {0}")]
	UnsupportedSpec(String),
}

/// A `start`/`end` block boundary problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockError {
	/// A block opened on `start` was never closed.
	#[error("block opened on line #{start} has no end")]
	MissingEnd {
		/// Line number of the unclosed `start`.
		start: usize,
	},

	/// An `end` with no open block.
	#[error("end with no matching start")]
	StrayEnd,

	/// A record line appeared outside of any block.
	#[error("record outside of a start/end block")]
	OutsideBlock,
}

/// Errors produced while reading an index file.
#[derive(Debug, Error)]
pub enum CodecError {
	/// A line inside (or opening) a block could not be decoded.
	#[error("invalid range map line #{line}: {text}: {cause}")]
	MalformedLine {
		/// One-based line number.
		line: usize,
		/// The raw source line, comments included.
		text: String,
		/// What was wrong with it.
		#[source]
		cause: MalformedEntry,
	},

	/// Blocks are not properly delimited.
	#[error("invalid range map block at line #{line}: {kind}")]
	MalformedBlock {
		/// One-based line number where the problem was detected.
		line: usize,
		/// The boundary problem.
		kind: BlockError,
	},

	/// Reading the underlying stream failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// An index was built against different file content than is current.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("range map for {filename} is stale: indexed {expected}, current {actual}")]
pub struct StaleIndex {
	/// Project-relative filename of the index.
	pub filename: String,
	/// Hash stored in the index.
	pub expected: String,
	/// Hash of the content that was checked.
	pub actual: String,
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
