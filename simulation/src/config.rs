//! Run configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. The binary layers CLI flags on top.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::persistence::SaveFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub initial_population: usize,
    pub years: u32,
    pub seed: u64,
    pub log_level: String,
    /// Number of biographies printed after the run
    pub inspect: usize,
    pub save: Option<SaveConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    pub dir: PathBuf,
    pub name: String,
    pub format: SaveFormat,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_population: 100,
            years: 200,
            seed: 12345,
            log_level: "info".to_string(),
            inspect: 0,
            save: None,
        }
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("saves"),
            name: "population".to_string(),
            format: SaveFormat::Json,
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// `tracing` level for the configured name, `INFO` if unrecognised.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
