//! Configuration loading for the mcstat CLI.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. TOML config file (explicit `--config` path, or `mcstat.toml` in cwd)
//! 3. Defaults (lowest priority)
//!
//! The library itself takes all paths explicitly; this module only serves
//! the binary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{McstatError, Result};

/// Main configuration struct for mcstat.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The server installation to query.
    pub server: ServerConfig,
}

/// One server installation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Server version, e.g. `1.19.2`. Required.
    pub version: String,
    /// Server language code, e.g. `en_us` or `es_es`.
    pub language: String,
    /// Server logs directory.
    pub logs_path: PathBuf,
    /// Server stats directory.
    pub stats_path: PathBuf,
    /// Directory where catalogs and registries are persisted.
    pub storage_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: String::new(),
            language: "en_us".to_string(),
            logs_path: PathBuf::from("logs"),
            stats_path: PathBuf::from("stats"),
            storage_path: default_storage_dir(),
        }
    }
}

/// Default storage directory: `~/.mcstat`, or `./.mcstat` without a home.
pub fn default_storage_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".mcstat"))
        .unwrap_or_else(|| PathBuf::from(".mcstat"))
}

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// An explicit path must exist and parse; the implicit `mcstat.toml` is
    /// optional and silently skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let implicit = Path::new("mcstat.toml");
                if implicit.is_file() {
                    Self::load_from_file(implicit)?
                } else {
                    Config::default()
                }
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load config from a specific file path.
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| McstatError::storage(path, e))?;
        toml::from_str(&content)
            .map_err(|e| McstatError::invalid_configuration(path, format!("invalid TOML: {e}")))
    }

    /// Apply `MCSTAT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("MCSTAT_VERSION") {
            self.server.version = val;
        }
        if let Ok(val) = env::var("MCSTAT_LANGUAGE") {
            self.server.language = val;
        }
        if let Ok(val) = env::var("MCSTAT_LOGS_PATH") {
            self.server.logs_path = PathBuf::from(val);
        }
        if let Ok(val) = env::var("MCSTAT_STATS_PATH") {
            self.server.stats_path = PathBuf::from(val);
        }
        if let Ok(val) = env::var("MCSTAT_STORAGE_PATH") {
            self.server.storage_path = PathBuf::from(val);
        }
    }

    /// Check that the fields without usable defaults are set.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.server.version.is_empty() {
            return Err(McstatError::invalid_configuration(
                "mcstat.toml",
                "server.version is required (set it in the config file or MCSTAT_VERSION)",
            ));
        }
        Ok(())
    }
}
