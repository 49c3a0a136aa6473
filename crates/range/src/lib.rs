#![cfg_attr(test, allow(unused_crate_dependencies))]

//! Symbol range index for a source tree.
//!
//! A [`RangeMap`] records, for one source file, every identifier occurrence
//! ([`RangeEntry`]), every declaration span ([`StructuralEntry`]) and side-channel
//! facts ([`MetaEntry`]). Offsets are kept in whatever unit the producing front-end
//! used and are never recomputed.
//!
//! Maps are accumulated with a [`RangeMapBuilder`], frozen with
//! [`RangeMapBuilder::build`] and stored in a line-oriented text format handled
//! by the [`codec`] module:
//!
//! ```text
//! start 1 com/example/Foo.java 5d41402abc4b2a76b9719d911017c592
//! classdef 0 120 com/example/Foo
//!   class 13 3 Foo false com/example/Foo
//!   methoddef 40 60 bar ()V
//!     method 52 3 baz com/example/Foo baz ()V
//! end
//! ```

/// Accumulating builder and overlap validation.
pub mod builder;
/// Reading and writing the text index format.
pub mod codec;
/// Leaf occurrence entries.
pub mod entry;
/// Error types.
pub mod error;
/// Field splitting and quoting for record lines.
pub mod fields;
/// Content hashing used to detect stale indices.
pub mod hash;
/// The frozen per-file index.
pub mod map;
/// Owner/name/descriptor member identity.
pub mod member;
/// Side-channel meta entries.
pub mod meta;
/// Declaration span entries.
pub mod structure;

pub use builder::{Overlap, RangeMapBuilder, check_overlaps};
pub use codec::{SPEC, Style, read_all, read_from, write_all};
pub use entry::{EntryKind, EntryType, RangeEntry};
pub use error::{BlockError, CodecError, MalformedEntry, Result, StaleIndex};
pub use hash::content_hash;
pub use map::RangeMap;
pub use member::MemberInfo;
pub use meta::{MetaEntry, MetaType, MixinAccessorMeta};
pub use structure::{StructuralEntry, StructureKind};
