use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "xrefmap")]
#[command(about = "Inspect and maintain range map index files")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to ./xrefmap.toml when present)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Parse an index file and write it back sorted and normalized
	Fmt(FmtArgs),
	/// Verify that every indexed source file is unchanged
	Check(CheckArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct FmtArgs {
	/// Index file to read, or `-` for stdin
	pub input: PathBuf,

	/// Where to write the result (stdout if omitted)
	#[arg(short, long, value_name = "PATH")]
	pub output: Option<PathBuf>,

	/// Write without indentation or comments
	#[arg(long, conflicts_with = "pretty")]
	pub compact: bool,

	/// Write indented with declaration comments
	#[arg(long)]
	pub pretty: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
	/// Index file to verify, or `-` for stdin
	pub input: PathBuf,

	/// Source tree the indexed filenames are relative to
	#[arg(long, value_name = "DIR")]
	pub root: Option<PathBuf>,

	/// Stop at the first stale or missing file
	#[arg(long)]
	pub fail_fast: bool,
}
