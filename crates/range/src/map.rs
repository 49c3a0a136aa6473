use crate::entry::RangeEntry;
use crate::error::StaleIndex;
use crate::hash::content_hash;
use crate::meta::MetaEntry;
use crate::structure::StructuralEntry;

/// The frozen index for one source file.
///
/// Produced by [`RangeMapBuilder::build`](crate::RangeMapBuilder::build) or by
/// reading an index file. Entries and structures are ordered by `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeMap {
	filename: String,
	hash: String,
	entries: Vec<RangeEntry>,
	structures: Vec<StructuralEntry>,
	meta: Vec<MetaEntry>,
}

impl RangeMap {
	pub(crate) fn new(
		filename: String,
		hash: String,
		entries: Vec<RangeEntry>,
		structures: Vec<StructuralEntry>,
		meta: Vec<MetaEntry>,
	) -> Self {
		Self {
			filename,
			hash,
			entries,
			structures,
			meta,
		}
	}

	/// Project-relative path with `/` separators.
	pub fn filename(&self) -> &str {
		&self.filename
	}

	/// Hash of the content this index was built against.
	pub fn hash(&self) -> &str {
		&self.hash
	}

	pub fn entries(&self) -> &[RangeEntry] {
		&self.entries
	}

	pub fn structures(&self) -> &[StructuralEntry] {
		&self.structures
	}

	pub fn meta(&self) -> &[MetaEntry] {
		&self.meta
	}

	/// Returns `true` if this index was built against content with `hash`.
	pub fn is_current(&self, hash: &str) -> bool {
		self.hash == hash
	}

	/// Checks this index against the current file content.
	///
	/// # Errors
	///
	/// Returns [`StaleIndex`] if the content hash no longer matches.
	pub fn verify(&self, content: impl AsRef<[u8]>) -> Result<(), StaleIndex> {
		let actual = content_hash(content);
		if self.is_current(&actual) {
			Ok(())
		} else {
			Err(StaleIndex {
				filename: self.filename.clone(),
				expected: self.hash.clone(),
				actual,
			})
		}
	}
}
