//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::params::ConfigParams;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load a TOML file and flatten it into dotted parameters.
pub fn load_config(path: &Path) -> Result<ConfigParams, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse TOML text into dotted parameters.
pub fn parse_config(content: &str) -> Result<ConfigParams, LoadError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(ConfigParams::from_toml(&table))
}
