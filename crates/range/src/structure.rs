//! Declaration spans.
//!
//! Written as `<kind>def <start> <length> <name>`, with a trailing descriptor for
//! methods. The `def` suffix keeps span tokens apart from entry tokens of the same
//! name (`class` versus `classdef`).

use std::fmt;

use crate::codec::SPEC;
use crate::error::MalformedEntry;
use crate::fields::{expect_arity, parse_u32};

/// The kind of declaration a span covers.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	strum::EnumString,
	strum::IntoStaticStr,
	strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum StructureKind {
	Class,
	Method,
	Enum,
	Annotation,
	Interface,
	Record,
}

impl StructureKind {
	/// Human-readable label used in pretty-printed comments.
	pub fn label(self) -> &'static str {
		match self {
			Self::Class => "Class",
			Self::Method => "Method",
			Self::Enum => "Enum",
			Self::Annotation => "Annotation",
			Self::Interface => "Interface",
			Self::Record => "Record",
		}
	}

	/// On-disk token, e.g. `classdef`.
	pub fn token(self) -> String {
		let name: &'static str = self.into();
		format!("{name}def")
	}
}

/// The span of a whole declaration.
///
/// `desc` is present only for [`StructureKind::Method`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuralEntry {
	pub kind: StructureKind,
	pub start: u32,
	pub length: u32,
	/// Internal name for types, simple name for methods.
	pub name: String,
	pub desc: Option<String>,
}

impl StructuralEntry {
	/// A type declaration span.
	pub fn declaration(kind: StructureKind, start: u32, length: u32, name: impl Into<String>) -> Self {
		debug_assert!(kind != StructureKind::Method, "method spans carry a descriptor");
		Self {
			kind,
			start,
			length,
			name: name.into(),
			desc: None,
		}
	}

	/// A method declaration span.
	pub fn method(start: u32, length: u32, name: impl Into<String>, desc: impl Into<String>) -> Self {
		Self {
			kind: StructureKind::Method,
			start,
			length,
			name: name.into(),
			desc: Some(desc.into()),
		}
	}

	pub fn end(&self) -> u32 {
		self.start.saturating_add(self.length)
	}
}

impl fmt::Display for StructuralEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}{}", self.kind.label(), self.name, self.desc.as_deref().unwrap_or(""))
	}
}

/// Decodes a span from the fields following its `...def` token.
///
/// `kind` is the token with the `def` suffix already removed.
pub fn read(spec: u32, kind: &str, fields: &[String]) -> Result<StructuralEntry, MalformedEntry> {
	if spec != SPEC {
		return Err(MalformedEntry::UnsupportedSpec(spec.to_string()));
	}
	let kind: StructureKind = kind
		.parse()
		.map_err(|_| MalformedEntry::UnknownStructureType(kind.to_string()))?;
	let expected = if kind == StructureKind::Method { 4 } else { 3 };
	expect_arity(&kind.token(), fields, expected)?;

	Ok(StructuralEntry {
		kind,
		start: parse_u32(&fields[0])?,
		length: parse_u32(&fields[1])?,
		name: fields[2].clone(),
		desc: fields.get(3).cloned(),
	})
}

/// Encodes a span as the fields following its token; inverse of [`read`].
pub fn write(entry: &StructuralEntry) -> Vec<String> {
	let mut out = vec![entry.start.to_string(), entry.length.to_string(), entry.name.clone()];
	if entry.kind == StructureKind::Method {
		out.push(entry.desc.clone().unwrap_or_default());
	}
	out
}
