#[cfg(test)]
pub mod config_test;

use std::io;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents all possible errors loading a [Config]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
}

/// Format used when printing decoded reports
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human readable summary
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Options for printing decoded reports
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Output format
    pub format: OutputFormat,
    /// Print only the changes between reports instead of every full state
    pub events: bool,
    /// Print the raw report bytes alongside the decoded state
    pub raw: bool,
    /// Drop reports whose D-pad reading is impossible
    pub skip_invalid: bool,
}

impl Config {
    /// Load a [Config] from the given YAML string
    pub fn from_yaml(content: String) -> Result<Config, LoadError> {
        let config: Config = serde_yaml::from_str(content.as_str())?;
        Ok(config)
    }

    /// Load a [Config] from the given YAML file
    pub fn from_yaml_path<P: AsRef<Path>>(path: P) -> Result<Config, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: Config = serde_yaml::from_reader(file)?;
        Ok(config)
    }
}
