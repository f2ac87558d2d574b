use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Tool configuration, loaded from `audit.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the data directory holding the catalog, rule documents, and
    /// prerequisite scrape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Whether course codes absent from the catalog abort a check.
    ///
    /// When `false`, unknown codes are dropped with a warning and the
    /// evaluation proceeds on the remainder.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            strict: default_strict(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

const fn default_strict() -> bool {
    true
}
