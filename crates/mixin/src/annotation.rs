//! Annotation input model.
//!
//! Front-ends translate their syntax trees into these types. Only the shapes
//! the mixin annotations use are modelled; anything else a front-end cannot map
//! becomes [`Value::Other`] and is rejected by the handlers that care.

use std::fmt;

use strum::IntoEnumIterator;

/// A string literal argument, with the source range it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
	pub start: u32,
	pub length: u32,
	/// Source text including quotes and escapes.
	pub escaped: String,
	/// Decoded value.
	pub value: String,
}

impl StringLiteral {
	pub fn new(start: u32, length: u32, escaped: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			start,
			length,
			escaped: escaped.into(),
			value: value.into(),
		}
	}

	/// A literal written as `"value"` with no escapes.
	pub fn quoted(start: u32, value: impl Into<String>) -> Self {
		let value = value.into();
		let escaped = format!("\"{value}\"");
		let length = u32::try_from(escaped.len()).unwrap_or(u32::MAX);
		Self {
			start,
			length,
			escaped,
			value,
		}
	}
}

/// A class literal argument (`Foo.class`), already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLiteral {
	pub internal_name: String,
}

impl TypeLiteral {
	pub fn new(internal_name: impl Into<String>) -> Self {
		Self {
			internal_name: internal_name.into(),
		}
	}
}

/// An annotation argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	Str(StringLiteral),
	Type(TypeLiteral),
	Array(Vec<Value>),
	/// Any other expression, kept as source text for diagnostics.
	Other(String),
}

impl Value {
	/// Flattens a single value or an array initializer into its elements.
	///
	/// Java lets single-element arrays drop their braces, so both spellings are
	/// handled the same way.
	pub fn elements(&self) -> &[Value] {
		match self {
			Self::Array(items) => items,
			single => std::slice::from_ref(single),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Str(lit) => f.write_str(&lit.escaped),
			Self::Type(ty) => write!(f, "{}.class", ty.internal_name),
			Self::Array(items) => {
				f.write_str("{")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("}")
			}
			Self::Other(text) => f.write_str(text),
		}
	}
}

/// The three syntactic forms an annotation can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationArgs {
	/// `@Shadow`
	Marker,
	/// `@Mixin(Foo.class)`
	Single(Value),
	/// `@Shadow(prefix = "x$")`
	Normal(Vec<(String, Value)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
	/// Internal name of the annotation type.
	pub type_name: String,
	/// Source offset of the `@`.
	pub start: u32,
	pub args: AnnotationArgs,
}

impl Annotation {
	pub fn new(type_name: impl Into<String>, start: u32, args: AnnotationArgs) -> Self {
		Self {
			type_name: type_name.into(),
			start,
			args,
		}
	}
}

/// The declaration an annotation is attached to, with resolved names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
	Type {
		name: String,
	},
	Method {
		owner: String,
		name: String,
		desc: String,
	},
	/// One field declaration may declare several variables of the same type.
	Field {
		owner: String,
		/// `(name, type descriptor)` per declared variable.
		fragments: Vec<(String, String)>,
	},
}

impl fmt::Display for Declaration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Type { name } => write!(f, "type {name}"),
			Self::Method { owner, name, desc } => write!(f, "method {owner}.{name}{desc}"),
			Self::Field { owner, fragments } => {
				write!(f, "field {owner}.")?;
				for (i, (name, _)) in fragments.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					f.write_str(name)?;
				}
				Ok(())
			}
		}
	}
}

const MIXIN_PACKAGE: &str = "org/spongepowered/asm/mixin/";

/// The annotations this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
pub enum MixinAnnotation {
	Mixin,
	Accessor,
	Invoker,
	Shadow,
	Overwrite,
	Interface,
}

impl MixinAnnotation {
	/// Internal name of the annotation type.
	pub fn type_name(self) -> String {
		let simple: &'static str = self.into();
		match self {
			Self::Accessor | Self::Invoker => format!("{MIXIN_PACKAGE}gen/{simple}"),
			_ => format!("{MIXIN_PACKAGE}{simple}"),
		}
	}

	pub fn from_type_name(type_name: &str) -> Option<Self> {
		let rest = type_name.strip_prefix(MIXIN_PACKAGE)?;
		Self::iter().find(|kind| {
			let simple: &'static str = (*kind).into();
			match kind {
				Self::Accessor | Self::Invoker => rest.strip_prefix("gen/") == Some(simple),
				_ => rest == simple,
			}
		})
	}
}

impl fmt::Display for MixinAnnotation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let simple: &'static str = (*self).into();
		write!(f, "@{simple}")
	}
}
