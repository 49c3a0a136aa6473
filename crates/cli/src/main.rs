//! `xrefmap` command-line tool.

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use tracing::error;

fn main() -> ExitCode {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(err) => {
			error!("{err:#}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
	let config = Config::load(cli.config.as_deref())?;

	match cli.command {
		Command::Fmt(args) => {
			commands::fmt::run(&args, &config)?;
			Ok(ExitCode::SUCCESS)
		}
		Command::Check(args) => {
			let report = commands::check::run(&args, &config)?;
			Ok(if report.is_clean() {
				ExitCode::SUCCESS
			} else {
				ExitCode::from(2)
			})
		}
	}
}

/// Logs to stderr, filtered by `RUST_LOG` when set.
fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
