//! Optional TOML configuration.
//!
//! ```toml
//! [output]
//! pretty = false
//!
//! [check]
//! root = "src/main/java"
//! fail_fast = true
//! ```
//!
//! Command-line flags override anything set here.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "xrefmap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid configuration.
	#[error("invalid configuration in {path}: {error}")]
	Toml {
		path: PathBuf,
		#[source]
		error: toml::de::Error,
	},
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub output: OutputConfig,
	pub check: CheckConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
	/// Indent and comment written index files.
	pub pretty: bool,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self { pretty: true }
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
	/// Source tree that indexed filenames are relative to.
	pub root: Option<PathBuf>,
	/// Stop at the first stale or missing file.
	pub fail_fast: bool,
}

impl Config {
	pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
		toml::from_str(text).map_err(|error| ConfigError::Toml {
			path: path.to_path_buf(),
			error,
		})
	}

	/// Loads `path`, or [`DEFAULT_CONFIG`] if it exists, or the defaults.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let path = match path {
			Some(path) => path,
			None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
			None => {
				debug!("no configuration file, using defaults");
				return Ok(Self::default());
			}
		};

		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::parse(path, &text)?;
		debug!(path = %path.display(), ?config, "loaded configuration");
		Ok(config)
	}
}
