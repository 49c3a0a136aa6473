//! Leaf occurrence entries.
//!
//! Every entry records a `start`/`length` range and the literal `text` found
//! there, plus a per-type payload naming the symbol the text resolves to. On disk
//! an entry is one line:
//!
//! ```text
//! <type> <start> <length> <text> <payload...>
//! ```
//!
//! Payload field order per type:
//!
//! | type             | payload                                   |
//! |------------------|-------------------------------------------|
//! | `package`        |                                           |
//! | `class`          | `qualified internal_name`                 |
//! | `class_literal`  | `internal_name`                           |
//! | `field`          | `owner`                                   |
//! | `field_literal`  | `owner name`                              |
//! | `method`         | `owner name desc`                         |
//! | `method_literal` | `owner name desc`                         |
//! | `parameter`      | `owner name desc index`                   |
//! | `local_variable` | `owner name desc index var_type`          |

use std::fmt;

use crate::codec::SPEC;
use crate::error::MalformedEntry;
use crate::fields::{expect_arity, parse_bool, parse_u32};

/// Tag naming an entry variant; its snake_case form is the on-disk token.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	strum::Display,
	strum::EnumString,
	strum::IntoStaticStr,
	strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EntryType {
	Package,
	Class,
	ClassLiteral,
	Field,
	FieldLiteral,
	Method,
	MethodLiteral,
	Parameter,
	LocalVariable,
}

impl EntryType {
	/// Number of payload fields following `start length text`.
	pub fn payload_len(self) -> usize {
		match self {
			Self::Package => 0,
			Self::ClassLiteral | Self::Field => 1,
			Self::Class | Self::FieldLiteral => 2,
			Self::Method | Self::MethodLiteral => 3,
			Self::Parameter => 4,
			Self::LocalVariable => 5,
		}
	}
}

/// Per-variant payload of a [`RangeEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
	/// A package name occurrence.
	Package,
	/// A type reference.
	Class { internal_name: String, qualified: bool },
	/// A string literal naming a type.
	ClassLiteral { internal_name: String },
	/// A field access; the entry text is the field's simple name.
	Field { owner: String },
	/// A string literal naming a field.
	FieldLiteral { owner: String, name: String },
	/// A method or constructor call.
	Method { owner: String, name: String, desc: String },
	/// A string literal naming a method.
	MethodLiteral { owner: String, name: String, desc: String },
	/// A parameter use; `owner`/`name`/`desc` identify the enclosing method.
	Parameter {
		owner: String,
		name: String,
		desc: String,
		index: u32,
	},
	/// A local variable use inside the identified method.
	LocalVariable {
		owner: String,
		name: String,
		desc: String,
		index: u32,
		var_type: String,
	},
}

impl EntryKind {
	pub fn ty(&self) -> EntryType {
		match self {
			Self::Package => EntryType::Package,
			Self::Class { .. } => EntryType::Class,
			Self::ClassLiteral { .. } => EntryType::ClassLiteral,
			Self::Field { .. } => EntryType::Field,
			Self::FieldLiteral { .. } => EntryType::FieldLiteral,
			Self::Method { .. } => EntryType::Method,
			Self::MethodLiteral { .. } => EntryType::MethodLiteral,
			Self::Parameter { .. } => EntryType::Parameter,
			Self::LocalVariable { .. } => EntryType::LocalVariable,
		}
	}
}

/// A single recorded occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeEntry {
	/// Offset of the first unit of `text` in the original source.
	pub start: u32,
	/// Length of `text` in source units.
	pub length: u32,
	/// Literal source text at the range.
	pub text: String,
	/// Resolved target.
	pub kind: EntryKind,
}

impl RangeEntry {
	pub fn new(start: u32, length: u32, text: impl Into<String>, kind: EntryKind) -> Self {
		Self {
			start,
			length,
			text: text.into(),
			kind,
		}
	}

	pub fn ty(&self) -> EntryType {
		self.kind.ty()
	}

	/// Offset one past the last unit of the range.
	pub fn end(&self) -> u32 {
		self.start.saturating_add(self.length)
	}
}

impl fmt::Display for RangeEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}[{}:{}, {:?}", self.ty(), self.start, self.length, self.text)?;
		match &self.kind {
			EntryKind::Package => {}
			EntryKind::Class {
				internal_name,
				qualified,
			} => write!(f, ", Internal: {internal_name}, Qualified: {qualified}")?,
			EntryKind::ClassLiteral { internal_name } => write!(f, ", Internal: {internal_name}")?,
			EntryKind::Field { owner } => write!(f, ", Owner: {owner}")?,
			EntryKind::FieldLiteral { owner, name } => write!(f, ", Owner: {owner}, Name: {name}")?,
			EntryKind::Method { owner, name, desc } | EntryKind::MethodLiteral { owner, name, desc } => {
				write!(f, ", Owner: {owner}, Name: {name}, Descriptor: {desc}")?
			}
			EntryKind::Parameter {
				owner,
				name,
				desc,
				index,
			} => write!(f, ", Owner: {owner}, Name: {name}, Descriptor: {desc}, Index: {index}")?,
			EntryKind::LocalVariable {
				owner,
				name,
				desc,
				index,
				var_type,
			} => write!(
				f,
				", Owner: {owner}, Name: {name}, Descriptor: {desc}, Index: {index}, VarType: {var_type}"
			)?,
		}
		f.write_str("]")
	}
}

/// Decodes an entry from the fields following its type token.
///
/// `fields` must hold exactly `start length text` plus the type's payload.
pub fn read(spec: u32, ty: &str, fields: &[String]) -> Result<RangeEntry, MalformedEntry> {
	if spec != SPEC {
		return Err(MalformedEntry::UnsupportedSpec(spec.to_string()));
	}
	let ty: EntryType = ty.parse().map_err(|_| MalformedEntry::UnknownEntryType(ty.to_string()))?;
	expect_arity(ty.into(), fields, 3 + ty.payload_len())?;

	let start = parse_u32(&fields[0])?;
	let length = parse_u32(&fields[1])?;
	let text = fields[2].clone();
	let p = &fields[3..];

	let kind = match ty {
		EntryType::Package => EntryKind::Package,
		EntryType::Class => EntryKind::Class {
			qualified: parse_bool(&p[0])?,
			internal_name: p[1].clone(),
		},
		EntryType::ClassLiteral => EntryKind::ClassLiteral {
			internal_name: p[0].clone(),
		},
		EntryType::Field => EntryKind::Field { owner: p[0].clone() },
		EntryType::FieldLiteral => EntryKind::FieldLiteral {
			owner: p[0].clone(),
			name: p[1].clone(),
		},
		EntryType::Method => EntryKind::Method {
			owner: p[0].clone(),
			name: p[1].clone(),
			desc: p[2].clone(),
		},
		EntryType::MethodLiteral => EntryKind::MethodLiteral {
			owner: p[0].clone(),
			name: p[1].clone(),
			desc: p[2].clone(),
		},
		EntryType::Parameter => EntryKind::Parameter {
			owner: p[0].clone(),
			name: p[1].clone(),
			desc: p[2].clone(),
			index: parse_u32(&p[3])?,
		},
		EntryType::LocalVariable => EntryKind::LocalVariable {
			owner: p[0].clone(),
			name: p[1].clone(),
			desc: p[2].clone(),
			index: parse_u32(&p[3])?,
			var_type: p[4].clone(),
		},
	};

	Ok(RangeEntry {
		start,
		length,
		text,
		kind,
	})
}

/// Encodes an entry as the fields following its type token; inverse of [`read`].
pub fn write(entry: &RangeEntry) -> Vec<String> {
	let mut out = vec![entry.start.to_string(), entry.length.to_string(), entry.text.clone()];
	match &entry.kind {
		EntryKind::Package => {}
		EntryKind::Class {
			internal_name,
			qualified,
		} => {
			out.push(qualified.to_string());
			out.push(internal_name.clone());
		}
		EntryKind::ClassLiteral { internal_name } => out.push(internal_name.clone()),
		EntryKind::Field { owner } => out.push(owner.clone()),
		EntryKind::FieldLiteral { owner, name } => out.extend([owner.clone(), name.clone()]),
		EntryKind::Method { owner, name, desc } | EntryKind::MethodLiteral { owner, name, desc } => {
			out.extend([owner.clone(), name.clone(), desc.clone()])
		}
		EntryKind::Parameter {
			owner,
			name,
			desc,
			index,
		} => out.extend([owner.clone(), name.clone(), desc.clone(), index.to_string()]),
		EntryKind::LocalVariable {
			owner,
			name,
			desc,
			index,
			var_type,
		} => out.extend([
			owner.clone(),
			name.clone(),
			desc.clone(),
			index.to_string(),
			var_type.clone(),
		]),
	}
	out
}
