//! CLI configuration.
//!
//! Layered, lowest precedence first: built-in defaults, an optional
//! `scoreboard.toml` (or the file passed with `--config`), then
//! `SCOREBOARD_*` environment variables. A `.env` file is loaded into the
//! environment before layering.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wmt_scoreboard_report::{io, Source};

/// Default configuration file stem, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "scoreboard";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SCOREBOARD";

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardConfig {
    /// Directory the `report` command writes to.
    pub output_dir: PathBuf,
    /// JSON file of raw tables used instead of the built-in catalog.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Built-in source used when no data file is given.
    pub default_source: Source,
}

impl ScoreboardConfig {
    /// Load configuration, reading `path` if given (it must then exist).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .set_default("output_dir", io::OUTPUT_DIR)?
            .set_default("log_level", "info")?
            .set_default("default_source", Source::Visualizations.name())?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "output_dir = \"out\"\nlog_level = \"debug\"\ndefault_source = \"tasks\"\ndata_file = \"tables.json\"\n",
        )
        .unwrap();

        let config = ScoreboardConfig::load(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_source, Source::Tasks);
        assert_eq!(config.data_file, Some(PathBuf::from("tables.json")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(ScoreboardConfig::load(Some(&path)).is_err());
    }
}
