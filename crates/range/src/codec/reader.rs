use std::io::Read;

use indexmap::IndexMap;
use tracing::warn;

use super::SPEC;
use crate::entry::{self, RangeEntry};
use crate::error::{BlockError, CodecError, MalformedEntry, Result};
use crate::fields::{self, expect_arity};
use crate::map::RangeMap;
use crate::meta::{self, MetaEntry};
use crate::structure::{self, StructuralEntry};

/// An open `start` block being filled.
struct Block {
	line: usize,
	spec: u32,
	filename: String,
	hash: String,
	entries: Vec<RangeEntry>,
	structures: Vec<StructuralEntry>,
	meta: Vec<MetaEntry>,
}

impl Block {
	/// Opens a block from the fields after `start`.
	fn open(line: usize, fields: &[String]) -> std::result::Result<Self, MalformedEntry> {
		expect_arity("start", fields, 3)?;
		let spec = fields[0]
			.parse::<u32>()
			.ok()
			.filter(|&spec| spec == SPEC)
			.ok_or_else(|| MalformedEntry::UnsupportedSpec(fields[0].clone()))?;

		Ok(Self {
			line,
			spec,
			filename: fields[1].clone(),
			hash: fields[2].clone(),
			entries: Vec::new(),
			structures: Vec::new(),
			meta: Vec::new(),
		})
	}

	/// Decodes one record line into the block.
	fn push(&mut self, ty: &str, fields: &[String]) -> std::result::Result<(), MalformedEntry> {
		if ty == "meta" {
			let Some((meta_ty, rest)) = fields.split_first() else {
				return Err(MalformedEntry::Arity {
					kind: "meta".into(),
					expected: 1,
					found: 0,
				});
			};
			self.meta.push(meta::read(self.spec, meta_ty, rest)?);
		} else if let Some(kind) = ty.strip_suffix("def") {
			self.structures.push(structure::read(self.spec, kind, fields)?);
		} else {
			self.entries.push(entry::read(self.spec, ty, fields)?);
		}
		Ok(())
	}

	fn finish(self) -> RangeMap {
		RangeMap::new(self.filename, self.hash, self.entries, self.structures, self.meta)
	}
}

fn malformed(line: usize, text: &str, cause: MalformedEntry) -> CodecError {
	CodecError::MalformedLine {
		line,
		text: text.to_string(),
		cause,
	}
}

/// Parses every block in `input`, keyed by filename in file order.
///
/// Records keep the order they appear in. If two blocks name the same file the
/// later one wins.
///
/// # Errors
///
/// Returns [`CodecError::MalformedLine`] for any undecodable line and
/// [`CodecError::MalformedBlock`] for unbalanced `start`/`end` lines. Line numbers
/// are one-based.
pub fn read_all(input: &str) -> Result<IndexMap<String, RangeMap>> {
	let mut maps = IndexMap::new();
	let mut block: Option<Block> = None;

	for (idx, raw) in input.lines().enumerate() {
		let line = idx + 1;
		let fields = fields::split(raw).map_err(|cause| malformed(line, raw, cause))?;
		let Some((head, rest)) = fields.split_first() else {
			continue;
		};

		match head.as_str() {
			"start" => {
				if let Some(open) = &block {
					return Err(CodecError::MalformedBlock {
						line,
						kind: BlockError::MissingEnd { start: open.line },
					});
				}
				block = Some(Block::open(line, rest).map_err(|cause| malformed(line, raw, cause))?);
			}
			"end" => {
				let Some(done) = block.take() else {
					return Err(CodecError::MalformedBlock {
						line,
						kind: BlockError::StrayEnd,
					});
				};
				expect_arity("end", rest, 0).map_err(|cause| malformed(line, raw, cause))?;
				let map = done.finish();
				if maps.contains_key(map.filename()) {
					warn!(filename = map.filename(), line, "duplicate range map block, keeping the later one");
				}
				maps.insert(map.filename().to_string(), map);
			}
			ty => {
				let Some(open) = block.as_mut() else {
					return Err(CodecError::MalformedBlock {
						line,
						kind: BlockError::OutsideBlock,
					});
				};
				open.push(ty, rest).map_err(|cause| malformed(line, raw, cause))?;
			}
		}
	}

	if let Some(open) = block {
		return Err(CodecError::MalformedBlock {
			line: open.line,
			kind: BlockError::MissingEnd { start: open.line },
		});
	}

	Ok(maps)
}

/// Reads a whole UTF-8 stream and parses it with [`read_all`].
pub fn read_from(mut reader: impl Read) -> Result<IndexMap<String, RangeMap>> {
	let mut input = String::new();
	reader.read_to_string(&mut input)?;
	read_all(&input)
}
