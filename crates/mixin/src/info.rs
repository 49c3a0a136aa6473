//! What is known about one mixin type.

use std::fmt;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

/// A member declared `@Shadow` in a mixin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowInfo {
	pub name: String,
	pub desc: String,
	/// Prefix under which the member may also be referenced, e.g. `shadow$`.
	pub prefix: String,
}

impl fmt::Display for ShadowInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Shadow[{} {} {}]", self.name, self.desc, self.prefix)
	}
}

/// A soft-implemented interface declared with `@Implements`/`@Interface`.
///
/// Methods of the interface are implemented in the mixin under `prefix + name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
	pub prefix: String,
	/// Internal name of the interface.
	pub target: String,
	/// `name + desc` to the interface that declares it.
	methods: FxHashMap<String, String>,
}

impl InterfaceInfo {
	pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			target: target.into(),
			methods: FxHashMap::default(),
		}
	}

	/// Records that `owner` declares `name desc`. The first declaration wins, so
	/// add the interface's own methods before those of its super-interfaces.
	pub fn add_method(&mut self, name: &str, desc: &str, owner: impl Into<String>) {
		self.methods.entry(format!("{name}{desc}")).or_insert_with(|| owner.into());
	}

	/// Finds the interface declaring a (possibly prefixed) mixin method.
	pub fn find_owner(&self, name: &str, desc: &str) -> Option<&str> {
		let name = name.strip_prefix(self.prefix.as_str()).unwrap_or(name);
		self.methods.get(&format!("{name}{desc}")).map(String::as_str)
	}
}

impl fmt::Display for InterfaceInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Interface[{}, {}]", self.target, self.prefix)
	}
}

fn member_key(name: &str, desc: &str) -> String {
	format!("{name} {desc}")
}

/// Everything recorded for one mixin type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinInfo {
	owner: String,
	targets: IndexSet<String>,
	shadows: FxHashMap<String, ShadowInfo>,
	overwrites: FxHashSet<String>,
	interfaces: Vec<InterfaceInfo>,
}

impl MixinInfo {
	pub fn new(owner: impl Into<String>) -> Self {
		Self {
			owner: owner.into(),
			targets: IndexSet::new(),
			shadows: FxHashMap::default(),
			overwrites: FxHashSet::default(),
			interfaces: Vec::new(),
		}
	}

	/// Internal name of the mixin type itself.
	pub fn owner(&self) -> &str {
		&self.owner
	}

	/// A mixin with no targets has only seen member annotations such as
	/// `@Interface`.
	pub fn is_valid(&self) -> bool {
		!self.targets.is_empty()
	}

	pub fn targets(&self) -> &IndexSet<String> {
		&self.targets
	}

	/// The target class, only when there is exactly one.
	pub fn target(&self) -> Option<&str> {
		match self.targets.len() {
			1 => self.targets.first().map(String::as_str),
			_ => None,
		}
	}

	/// Replaces the target set.
	pub fn set_targets(&mut self, targets: impl IntoIterator<Item = String>) {
		self.targets = targets.into_iter().collect();
	}

	pub fn add_shadow(&mut self, name: impl Into<String>, desc: impl Into<String>, prefix: impl Into<String>) {
		let shadow = ShadowInfo {
			name: name.into(),
			desc: desc.into(),
			prefix: prefix.into(),
		};
		self.shadows.insert(member_key(&shadow.name, &shadow.desc), shadow);
	}

	pub fn get_shadow(&self, name: &str, desc: &str) -> Option<&ShadowInfo> {
		self.shadows.get(&member_key(name, desc))
	}

	/// Finds the shadow a reference resolves to, either by its declared name or
	/// by its prefixed form.
	pub fn find_shadow(&self, name: &str, desc: &str) -> Option<&ShadowInfo> {
		self.get_shadow(name, desc).or_else(|| {
			self.shadows.values().find(|s| {
				s.desc == desc && name.strip_prefix(s.prefix.as_str()).is_some_and(|rest| rest == s.name)
			})
		})
	}

	/// The target class a shadowed member really belongs to.
	pub fn shaded_owner(&self, name: &str, desc: &str) -> Option<&str> {
		self.find_shadow(name, desc).and(self.target())
	}

	pub fn shadows(&self) -> impl Iterator<Item = &ShadowInfo> {
		self.shadows.values()
	}

	pub fn add_overwrite(&mut self, name: &str, desc: &str) {
		self.overwrites.insert(format!("{name}{desc}"));
	}

	pub fn is_overwrite(&self, name: &str, desc: &str) -> bool {
		self.overwrites.contains(&format!("{name}{desc}"))
	}

	pub fn add_interface(&mut self, interface: InterfaceInfo) {
		self.interfaces.push(interface);
	}

	pub fn interfaces(&self) -> &[InterfaceInfo] {
		&self.interfaces
	}

	pub fn interfaces_mut(&mut self) -> &mut [InterfaceInfo] {
		&mut self.interfaces
	}

	/// Finds the interface declaring a soft-implemented method.
	pub fn find_interface_owner(&self, name: &str, desc: &str) -> Option<&str> {
		self.interfaces
			.iter()
			.filter(|iface| name.starts_with(iface.prefix.as_str()))
			.find_map(|iface| iface.find_owner(name, desc))
	}
}

impl fmt::Display for MixinInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Mixin[")?;
		for (i, target) in self.targets.iter().enumerate() {
			if i > 0 {
				f.write_str(",")?;
			}
			f.write_str(target)?;
		}
		f.write_str("]")
	}
}
