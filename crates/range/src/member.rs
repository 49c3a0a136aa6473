use std::fmt;

/// A member identity: declaring type, simple name and descriptor.
///
/// Equality and hashing are structural, so values can key maps directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberInfo {
	/// Internal (slash-separated) name of the declaring type.
	pub owner: String,
	/// Simple member name; `<init>` for constructors.
	pub name: String,
	/// Field type signature or method descriptor.
	pub desc: String,
}

impl MemberInfo {
	pub fn new(owner: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
		Self {
			owner: owner.into(),
			name: name.into(),
			desc: desc.into(),
		}
	}
}

impl fmt::Display for MemberInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}{}", self.owner, self.name, self.desc)
	}
}
