//! Accessor and invoker naming conventions.
//!
//! `@Accessor` and `@Invoker` methods name their target by convention unless an
//! explicit value is given:
//!
//! | Prefix | Role | Shape |
//! |---|---|---|
//! | `get`, `is` | [`AccessorType::Getter`] | no parameters, non-void return |
//! | `set` | [`AccessorType::Setter`] | one parameter, void return |
//! | `call`, `invoke` | [`AccessorType::Proxy`] | same descriptor as the target |
//! | `new`, `create` | [`AccessorType::Factory`] | constructor parameters, returns the target |
//!
//! A trailing `_$md...` suffix added by the mixin tooling is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::MethodDescriptor;

static ACCESSOR_NAME: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(get|is|set|call|invoke|new|create)(([A-Z])(.*?))(_\$md.*)?$")
		.expect("accessor name pattern is valid")
});

/// What an accessor method does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum AccessorType {
	Getter,
	Setter,
	Proxy,
	Factory,
}

impl AccessorType {
	pub fn prefixes(self) -> &'static [&'static str] {
		match self {
			Self::Getter => &["get", "is"],
			Self::Setter => &["set"],
			Self::Proxy => &["call", "invoke"],
			Self::Factory => &["new", "create"],
		}
	}

	fn from_prefix(prefix: &str) -> Option<Self> {
		[Self::Getter, Self::Setter, Self::Proxy, Self::Factory]
			.into_iter()
			.find(|ty| ty.prefixes().contains(&prefix))
	}

	/// Whether a method with `desc` has the shape this role requires.
	fn fits(self, desc: &MethodDescriptor) -> bool {
		match self {
			Self::Getter => desc.params().is_empty() && !desc.returns_void(),
			Self::Setter => desc.params().len() == 1 && desc.returns_void(),
			Self::Proxy | Self::Factory => true,
		}
	}
}

/// The resolved role and target of an accessor method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorName {
	pub ty: AccessorType,
	/// The accessor method's own name.
	pub method: String,
	/// Name of the targeted field or method.
	pub target: String,
	/// Convention prefix, empty when the role was inferred from the signature.
	pub prefix: String,
}

impl AccessorName {
	/// Derives the role and target from the method name.
	///
	/// An explicit `value` replaces the derived target name. Returns `None` if the
	/// name follows no convention or the descriptor does not fit the role.
	pub fn from(method: &str, value: Option<&str>, desc: &MethodDescriptor) -> Option<Self> {
		let caps = ACCESSOR_NAME.captures(method)?;
		let prefix = caps.get(1)?.as_str();
		let ty = AccessorType::from_prefix(prefix)?;
		if !ty.fits(desc) {
			return None;
		}

		let target = match value {
			Some(value) => value.to_string(),
			None => {
				let rest = caps.get(2)?.as_str();
				if ty != AccessorType::Factory && rest.chars().all(|c| !c.is_lowercase()) {
					rest.to_string()
				} else {
					let first = caps.get(3)?.as_str().to_lowercase();
					format!("{first}{}", caps.get(4).map_or("", |m| m.as_str()))
				}
			}
		};

		Some(Self {
			ty,
			method: method.to_string(),
			target,
			prefix: prefix.to_string(),
		})
	}

	/// Infers the role of an `@Accessor` with an explicit target from its shape.
	pub fn for_field(method: &str, value: &str, desc: &MethodDescriptor) -> Option<Self> {
		let ty = [AccessorType::Getter, AccessorType::Setter]
			.into_iter()
			.find(|ty| ty.fits(desc))?;
		Some(Self::explicit(ty, method, value))
	}

	/// Infers the role of an `@Invoker` with an explicit target.
	pub fn for_method(method: &str, value: &str) -> Self {
		let ty = if value == "<init>" {
			AccessorType::Factory
		} else {
			AccessorType::Proxy
		};
		Self::explicit(ty, method, value)
	}

	fn explicit(ty: AccessorType, method: &str, value: &str) -> Self {
		Self {
			ty,
			method: method.to_string(),
			target: value.to_string(),
			prefix: String::new(),
		}
	}
}
