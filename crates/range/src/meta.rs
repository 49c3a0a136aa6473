//! Meta entries: facts that are not tied to a source range.
//!
//! Written as `meta <type> <fields...>`.

use std::fmt;

use crate::codec::SPEC;
use crate::error::MalformedEntry;
use crate::fields::expect_arity;
use crate::member::MemberInfo;

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
pub enum MetaType {
	MixinAccessor,
}

/// Links a synthetic accessor/invoker method to the member it proxies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MixinAccessorMeta {
	/// The accessor method on the mixin type.
	pub owner: MemberInfo,
	/// The proxied field or method on the mixin target.
	pub target: MemberInfo,
	/// Naming-convention prefix the accessor name was derived with (`get`, `call`, ...).
	pub prefix: String,
}

impl fmt::Display for MixinAccessorMeta {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "MixinAccessor[{}, {} -> {}]", self.prefix, self.owner, self.target)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetaEntry {
	MixinAccessor(MixinAccessorMeta),
}

impl MetaEntry {
	pub fn ty(&self) -> MetaType {
		match self {
			Self::MixinAccessor(_) => MetaType::MixinAccessor,
		}
	}
}

/// Decodes a meta entry from the fields following `meta <type>`.
pub fn read(spec: u32, ty: &str, fields: &[String]) -> Result<MetaEntry, MalformedEntry> {
	if spec != SPEC {
		return Err(MalformedEntry::UnsupportedSpec(spec.to_string()));
	}
	let ty: MetaType = ty.parse().map_err(|_| MalformedEntry::UnknownMetaType(ty.to_string()))?;
	match ty {
		MetaType::MixinAccessor => {
			expect_arity("meta mixin_accessor", fields, 7)?;
			Ok(MetaEntry::MixinAccessor(MixinAccessorMeta {
				owner: MemberInfo::new(&fields[0], &fields[1], &fields[2]),
				target: MemberInfo::new(&fields[3], &fields[4], &fields[5]),
				prefix: fields[6].clone(),
			}))
		}
	}
}

/// Encodes a meta entry as the fields following `meta <type>`; inverse of [`read`].
pub fn write(entry: &MetaEntry) -> Vec<String> {
	match entry {
		MetaEntry::MixinAccessor(meta) => vec![
			meta.owner.owner.clone(),
			meta.owner.name.clone(),
			meta.owner.desc.clone(),
			meta.target.owner.clone(),
			meta.target.name.clone(),
			meta.target.desc.clone(),
			meta.prefix.clone(),
		],
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn accessor() -> MetaEntry {
		MetaEntry::MixinAccessor(MixinAccessorMeta {
			owner: MemberInfo::new("mixin/AMixin", "getFoo", "()I"),
			target: MemberInfo::new("com/Example", "foo", "I"),
			prefix: "get".into(),
		})
	}

	#[test]
	fn accessor_reads_back_what_it_writes() {
		let meta = accessor();
		assert_eq!(read(SPEC, "mixin_accessor", &write(&meta)).unwrap(), meta);
	}

	#[test]
	fn accessor_field_order() {
		assert_eq!(write(&accessor()), [
			"mixin/AMixin",
			"getFoo",
			"()I",
			"com/Example",
			"foo",
			"I",
			"get"
		]);
	}

	#[test]
	fn accessor_arity() {
		let fields: Vec<String> = ["a", "b", "c"].map(String::from).to_vec();
		assert!(matches!(
			read(SPEC, "mixin_accessor", &fields),
			Err(MalformedEntry::Arity {
				expected: 7,
				found: 3,
				..
			})
		));
	}

	#[test]
	fn unknown_meta() {
		assert_eq!(
			read(SPEC, "inject", &[]),
			Err(MalformedEntry::UnknownMetaType("inject".into()))
		);
	}
}
