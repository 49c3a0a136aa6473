use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::Context;
use tracing::info;
use xrefmap_range::{RangeMap, RangeMapBuilder, Style, write_all};

use super::read_index;
use crate::cli::FmtArgs;
use crate::config::Config;

/// Rebuilds a map so its entries are sorted and overlaps are reported.
fn normalize(map: &RangeMap) -> RangeMap {
	let mut builder = RangeMapBuilder::new(map.filename(), map.hash());
	builder.load_cache(map);
	builder.build()
}

pub fn style(args: &FmtArgs, config: &Config) -> Style {
	if args.compact {
		Style::Compact
	} else if args.pretty || config.output.pretty {
		Style::Pretty
	} else {
		Style::Compact
	}
}

/// Reads `args.input`, sorts blocks by filename and entries by offset, and
/// writes the result.
pub fn run(args: &FmtArgs, config: &Config) -> anyhow::Result<()> {
	let index = read_index(&args.input)?;
	let mut maps: Vec<RangeMap> = index.values().map(normalize).collect();
	maps.sort_by(|a, b| a.filename().cmp(b.filename()));
	let style = style(args, config);

	match &args.output {
		Some(path) => {
			let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
			write_all(&maps, BufWriter::new(file), style).with_context(|| format!("writing {}", path.display()))?;
			info!(files = maps.len(), output = %path.display(), "formatted index");
		}
		None => write_all(&maps, io::stdout().lock(), style).context("writing to stdout")?,
	}
	Ok(())
}
