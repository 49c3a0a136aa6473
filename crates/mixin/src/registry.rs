//! Run-wide mixin registry.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::info::{MixinInfo, ShadowInfo};

/// Mixin facts shared by every file of a run, keyed by mixin owner.
///
/// Files may be processed on several threads; all access goes through one lock.
#[derive(Debug, Default)]
pub struct MixinRegistry {
	mixins: RwLock<FxHashMap<String, MixinInfo>>,
}

impl MixinRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// A snapshot of the info recorded for `owner`.
	pub fn get_info(&self, owner: &str) -> Option<MixinInfo> {
		self.mixins.read().get(owner).cloned()
	}

	pub fn contains(&self, owner: &str) -> bool {
		self.mixins.read().contains_key(owner)
	}

	pub fn len(&self) -> usize {
		self.mixins.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.mixins.read().is_empty()
	}

	pub fn get_shadow(&self, owner: &str, name: &str, desc: &str) -> Option<ShadowInfo> {
		self.mixins.read().get(owner)?.get_shadow(name, desc).cloned()
	}

	/// The mixin target that a shadowed member of `owner` belongs to.
	///
	/// `name` may be the declared name or its prefixed form. Returns `None` when
	/// `owner` is not a single-target mixin or the member is not shadowed.
	pub fn get_shaded_owner(&self, owner: &str, name: &str, desc: &str) -> Option<String> {
		self.mixins.read().get(owner)?.shaded_owner(name, desc).map(str::to_string)
	}

	pub fn is_overwrite(&self, owner: &str, name: &str, desc: &str) -> bool {
		self.mixins.read().get(owner).is_some_and(|info| info.is_overwrite(name, desc))
	}

	/// Runs `f` on the info for `owner` under the read lock.
	pub fn with_info<R>(&self, owner: &str, f: impl FnOnce(&MixinInfo) -> R) -> Option<R> {
		self.mixins.read().get(owner).map(f)
	}

	/// Mutates the info for `owner` if it has been declared a mixin with at
	/// least one target; returns `None` otherwise.
	///
	/// Entries created only by [`upsert`](Self::upsert), such as for
	/// `@Interface`, are left untouched.
	pub fn update<R>(&self, owner: &str, f: impl FnOnce(&mut MixinInfo) -> R) -> Option<R> {
		self.mixins.write().get_mut(owner).filter(|info| info.is_valid()).map(f)
	}

	/// Mutates the info for `owner`, creating an empty one first if needed.
	pub fn upsert<R>(&self, owner: &str, f: impl FnOnce(&mut MixinInfo) -> R) -> R {
		let mut mixins = self.mixins.write();
		let info = mixins
			.entry(owner.to_string())
			.or_insert_with(|| MixinInfo::new(owner));
		f(info)
	}
}
