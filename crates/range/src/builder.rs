//! Per-file accumulation of range entries.
//!
//! A front-end walks one source file and appends entries as it visits each
//! occurrence. Nothing is validated on append; [`RangeMapBuilder::build`] sorts,
//! checks for overlapping entries and freezes the result.

use tracing::{debug, warn};

use crate::entry::{EntryKind, RangeEntry};
use crate::map::RangeMap;
use crate::member::MemberInfo;
use crate::meta::{MetaEntry, MixinAccessorMeta};
use crate::structure::{StructuralEntry, StructureKind};


/// Two adjacent entries whose ranges intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap<'a> {
	pub first: &'a RangeEntry,
	pub second: &'a RangeEntry,
}

/// Finds every adjacent pair of entries where the first runs past the start of
/// the second.
///
/// `entries` must already be sorted by `start`. Touching ranges
/// (`a.start + a.length == b.start`) do not overlap.
pub fn check_overlaps(entries: &[RangeEntry]) -> Vec<Overlap<'_>> {
	entries
		.windows(2)
		.filter(|pair| pair[0].end() > pair[1].start)
		.map(|pair| Overlap {
			first: &pair[0],
			second: &pair[1],
		})
		.collect()
}

/// Accumulates entries for one source file.
#[derive(Debug, Clone)]
pub struct RangeMapBuilder {
	filename: String,
	hash: String,
	entries: Vec<RangeEntry>,
	structures: Vec<StructuralEntry>,
	meta: Vec<MetaEntry>,
}

impl RangeMapBuilder {
	/// Creates a builder for `filename` whose content hashes to `hash`.
	pub fn new(filename: impl Into<String>, hash: impl Into<String>) -> Self {
		Self {
			filename: filename.into(),
			hash: hash.into(),
			entries: Vec::new(),
			structures: Vec::new(),
			meta: Vec::new(),
		}
	}

	pub fn filename(&self) -> &str {
		&self.filename
	}

	pub fn hash(&self) -> &str {
		&self.hash
	}

	pub fn entries(&self) -> &[RangeEntry] {
		&self.entries
	}

	/// Seeds this builder from a previously built index of the same file.
	///
	/// Returns `false` and leaves the builder untouched if `cache` was built for a
	/// different file or different content. On `true` the caller can skip
	/// extracting the file.
	pub fn load_cache(&mut self, cache: &RangeMap) -> bool {
		if cache.filename() != self.filename || !cache.is_current(&self.hash) {
			debug!(filename = %self.filename, "range map cache miss");
			return false;
		}

		debug!(filename = %self.filename, entries = cache.entries().len(), "range map cache hit");
		self.entries = cache.entries().to_vec();
		self.structures = cache.structures().to_vec();
		self.meta = cache.meta().to_vec();
		true
	}

	/// Sorts, validates and freezes the accumulated entries.
	///
	/// Overlapping entries are logged and kept. The builder is not consumed, and
	/// repeated calls return equal maps.
	pub fn build(&self) -> RangeMap {
		let mut entries = self.entries.clone();
		let mut structures = self.structures.clone();
		entries.sort_by_key(|e| e.start);
		structures.sort_by_key(|s| s.start);

		for overlap in check_overlaps(&entries) {
			warn!(
				filename = %self.filename,
				first = %overlap.first,
				second = %overlap.second,
				"overlapping range entries"
			);
		}

		RangeMap::new(
			self.filename.clone(),
			self.hash.clone(),
			entries,
			structures,
			self.meta.clone(),
		)
	}

	pub fn add_entry(&mut self, entry: RangeEntry) {
		self.entries.push(entry);
	}

	pub fn add_structure(&mut self, structure: StructuralEntry) {
		self.structures.push(structure);
	}

	pub fn add_meta(&mut self, meta: MetaEntry) {
		self.meta.push(meta);
	}

	// Declarations

	pub fn add_class_declaration(&mut self, start: u32, length: u32, name: impl Into<String>) {
		self.add_structure(StructuralEntry::declaration(StructureKind::Class, start, length, name));
	}

	pub fn add_enum_declaration(&mut self, start: u32, length: u32, name: impl Into<String>) {
		self.add_structure(StructuralEntry::declaration(StructureKind::Enum, start, length, name));
	}

	pub fn add_annotation_declaration(&mut self, start: u32, length: u32, name: impl Into<String>) {
		self.add_structure(StructuralEntry::declaration(
			StructureKind::Annotation,
			start,
			length,
			name,
		));
	}

	pub fn add_interface_declaration(&mut self, start: u32, length: u32, name: impl Into<String>) {
		self.add_structure(StructuralEntry::declaration(
			StructureKind::Interface,
			start,
			length,
			name,
		));
	}

	pub fn add_record_declaration(&mut self, start: u32, length: u32, name: impl Into<String>) {
		self.add_structure(StructuralEntry::declaration(StructureKind::Record, start, length, name));
	}

	pub fn add_method_declaration(
		&mut self,
		start: u32,
		length: u32,
		name: impl Into<String>,
		desc: impl Into<String>,
	) {
		self.add_structure(StructuralEntry::method(start, length, name, desc));
	}

	// References

	pub fn add_package_reference(&mut self, start: u32, length: u32, text: impl Into<String>) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::Package));
	}

	pub fn add_class_reference(
		&mut self,
		start: u32,
		length: u32,
		text: impl Into<String>,
		internal_name: impl Into<String>,
		qualified: bool,
	) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::Class {
			internal_name: internal_name.into(),
			qualified,
		}));
	}

	pub fn add_class_literal(
		&mut self,
		start: u32,
		length: u32,
		text: impl Into<String>,
		internal_name: impl Into<String>,
	) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::ClassLiteral {
			internal_name: internal_name.into(),
		}));
	}

	pub fn add_field_reference(&mut self, start: u32, length: u32, text: impl Into<String>, owner: impl Into<String>) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::Field { owner: owner.into() }));
	}

	pub fn add_field_literal(
		&mut self,
		start: u32,
		length: u32,
		text: impl Into<String>,
		owner: impl Into<String>,
		name: impl Into<String>,
	) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::FieldLiteral {
			owner: owner.into(),
			name: name.into(),
		}));
	}

	pub fn add_method_reference(
		&mut self,
		start: u32,
		length: u32,
		text: impl Into<String>,
		owner: impl Into<String>,
		name: impl Into<String>,
		desc: impl Into<String>,
	) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::Method {
			owner: owner.into(),
			name: name.into(),
			desc: desc.into(),
		}));
	}

	pub fn add_method_literal(
		&mut self,
		start: u32,
		length: u32,
		text: impl Into<String>,
		owner: impl Into<String>,
		name: impl Into<String>,
		desc: impl Into<String>,
	) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::MethodLiteral {
			owner: owner.into(),
			name: name.into(),
			desc: desc.into(),
		}));
	}

	#[allow(clippy::too_many_arguments, reason = "mirrors the on-disk field list")]
	pub fn add_parameter_reference(
		&mut self,
		start: u32,
		length: u32,
		text: impl Into<String>,
		owner: impl Into<String>,
		name: impl Into<String>,
		desc: impl Into<String>,
		index: u32,
	) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::Parameter {
			owner: owner.into(),
			name: name.into(),
			desc: desc.into(),
			index,
		}));
	}

	#[allow(clippy::too_many_arguments, reason = "mirrors the on-disk field list")]
	pub fn add_local_variable_reference(
		&mut self,
		start: u32,
		length: u32,
		text: impl Into<String>,
		owner: impl Into<String>,
		name: impl Into<String>,
		desc: impl Into<String>,
		index: u32,
		var_type: impl Into<String>,
	) {
		self.add_entry(RangeEntry::new(start, length, text, EntryKind::LocalVariable {
			owner: owner.into(),
			name: name.into(),
			desc: desc.into(),
			index,
			var_type: var_type.into(),
		}));
	}

	// Meta

	pub fn add_mixin_accessor(&mut self, owner: MemberInfo, target: MemberInfo, prefix: impl Into<String>) {
		self.add_meta(MetaEntry::MixinAccessor(MixinAccessorMeta {
			owner,
			target,
			prefix: prefix.into(),
		}));
	}
}
