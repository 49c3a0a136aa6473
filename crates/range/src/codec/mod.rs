//! # Codec
//!
//! Line-oriented text format for a batch of range maps. One file holds any number
//! of blocks, one per source file:
//!
//! ```text
//! file    = (block | blank)*
//! block   = "start" spec filename hash NL record* "end" NL
//! record  = entry | def | meta
//! entry   = entrytype start length text payload*
//! def     = kind "def" start length name desc?
//! meta    = "meta" metatype field*
//! ```
//!
//! `#` starts a comment outside of quoted fields; blank lines are ignored. Field
//! quoting is described in [`crate::fields`].
//!
//! [`Style::Pretty`] indents records by declaration nesting and annotates where
//! each declaration opens and closes. [`Style::Compact`] writes the same records
//! bare. Both read back to an identical [`RangeMap`](crate::RangeMap).

mod reader;
mod writer;


pub use reader::{read_all, read_from};
pub use writer::write_all;

/// The only defined format version.
pub const SPEC: u32 = 1;

/// Output layout for written index files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
	/// Indented by nesting, with `# Start`/`# End` comments.
	#[default]
	Pretty,
	/// No indentation and no comments.
	Compact,
}
