use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use tracing::{info, warn};

use super::read_index;
use crate::cli::CheckArgs;
use crate::config::Config;

/// Outcome of checking one indexed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
	/// The file content no longer matches the indexed hash.
	Stale { filename: String, expected: String, actual: String },
	/// The indexed file does not exist under the root.
	Missing { filename: String },
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
	pub checked: usize,
	pub problems: Vec<Problem>,
}

impl CheckReport {
	pub fn is_clean(&self) -> bool {
		self.problems.is_empty()
	}
}

fn resolve_root(args: &CheckArgs, config: &Config) -> anyhow::Result<PathBuf> {
	match args.root.as_ref().or(config.check.root.as_ref()) {
		Some(root) => Ok(root.clone()),
		None => bail!("no source root: pass --root or set check.root in the configuration"),
	}
}

fn check_file(root: &Path, map: &xrefmap_range::RangeMap) -> anyhow::Result<Option<Problem>> {
	let path = root.join(map.filename());
	let content = match std::fs::read(&path) {
		Ok(content) => content,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			return Ok(Some(Problem::Missing {
				filename: map.filename().to_string(),
			}));
		}
		Err(err) => return Err(err).with_context(|| format!("reading {}", path.display())),
	};

	Ok(map.verify(&content).err().map(|stale| Problem::Stale {
		filename: stale.filename,
		expected: stale.expected,
		actual: stale.actual,
	}))
}

/// Recomputes the content hash of every indexed file under the source root.
pub fn run(args: &CheckArgs, config: &Config) -> anyhow::Result<CheckReport> {
	let root = resolve_root(args, config)?;
	let fail_fast = args.fail_fast || config.check.fail_fast;
	let index = read_index(&args.input)?;

	let mut report = CheckReport::default();
	for map in index.values() {
		report.checked += 1;
		let Some(problem) = check_file(&root, map)? else {
			continue;
		};
		match &problem {
			Problem::Stale { filename, expected, actual } => {
				warn!(%filename, %expected, %actual, "stale index");
			}
			Problem::Missing { filename } => warn!(%filename, "indexed file is missing"),
		}
		report.problems.push(problem);
		if fail_fast {
			break;
		}
	}

	info!(
		checked = report.checked,
		problems = report.problems.len(),
		root = %root.display(),
		"check finished"
	);
	Ok(report)
}
