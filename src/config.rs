//! Configuration file support
//!
//! Looked up in order:
//! - an explicit `--config` path
//! - the `HORNLITE_CONFIG` environment variable
//! - `hornlite.toml` in the current directory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use hornlite::SearchLimits;

pub const CONFIG_ENV: &str = "HORNLITE_CONFIG";
pub const CONFIG_FILE: &str = "hornlite.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where answers are written
    pub output: PathBuf,

    /// Proof-tree depth at which goals fail; unbounded when absent
    pub max_depth: Option<usize>,

    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("output.txt"),
            max_depth: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Environment variable, then working directory, then defaults.
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::load(local);
        }
        Ok(Self::default())
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits { max_depth: self.max_depth }
    }
}
