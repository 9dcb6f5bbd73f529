//! Shell configuration.
//!
//! Loaded from an optional YAML file passed with `--config`.
//!
//! # Example YAML
//!
//! ```yaml
//! prompt: "cmdsh> "
//! banner: "type \"help -c\" to list commands"
//! disabled_builtins:
//!   - clear
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or saving a [`ShellConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Host loop settings. Every field is optional in the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Written before every input line.
    pub prompt: String,
    /// Printed once when an interactive session starts.
    pub banner: Option<String>,
    /// Built-in commands to unregister (e.g. `clear`).
    pub disabled_builtins: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            banner: None,
            disabled_builtins: Vec::new(),
        }
    }
}

impl ShellConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns `true` if the built-in `name` should not be registered.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_builtins.iter().any(|b| b == name)
    }
}
