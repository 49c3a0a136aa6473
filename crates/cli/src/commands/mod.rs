pub mod check;
pub mod fmt;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use xrefmap_range::{RangeMap, read_from};

/// Reads an index file, or stdin for `-`.
pub fn read_index(path: &Path) -> anyhow::Result<IndexMap<String, RangeMap>> {
	if path == Path::new("-") {
		return read_from(io::stdin().lock()).context("reading index from stdin");
	}
	let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
	read_from(BufReader::new(file)).with_context(|| format!("reading {}", path.display()))
}
