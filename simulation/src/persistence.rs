//! Persistence module for save/load of population state
//!
//! Serializes the registry together with the living set, archive, couples and
//! clock. Relationships are already ids, so no reference fix-up is needed on
//! load. The random stream is not part of a save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::components::{Calendar, Couple, PersonId};
use crate::error::{Result, SimError};
use crate::population::Population;
use crate::registry::Registry;

/// Schema version for forward compatibility
pub const EXPORT_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    #[default]
    Json,
    Bincode,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Json => "json",
            SaveFormat::Bincode => "bin",
        }
    }

    fn from_path(path: &Path) -> SaveFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") => SaveFormat::Bincode,
            _ => SaveFormat::Json,
        }
    }
}

/// Complete population state for persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub version: u8,
    pub saved_at: DateTime<Utc>,
    pub calendar: Calendar,
    pub registry: Registry,
    pub living: Vec<PersonId>,
    pub archive: Vec<PersonId>,
    pub couples: Vec<Couple>,
}

/// Result of a save
#[derive(Debug, Clone)]
pub struct SaveStats {
    pub path: PathBuf,
    pub population: u32,
    pub archived: u32,
    pub file_bytes: u64,
}

impl Population {
    pub fn export_data(&self) -> ExportData {
        ExportData {
            version: EXPORT_VERSION,
            saved_at: Utc::now(),
            calendar: self.calendar,
            registry: self.registry.clone(),
            living: self.living.clone(),
            archive: self.archive.clone(),
            couples: self.couples.clone(),
        }
    }

    /// Rebuild a population from exported data, rejecting unknown versions
    /// and states that break the population invariants.
    pub fn from_export(data: ExportData) -> Result<Population> {
        if data.version != EXPORT_VERSION {
            return Err(SimError::UnsupportedVersion(data.version));
        }
        let population = Population {
            registry: data.registry,
            calendar: data.calendar,
            living: data.living,
            archive: data.archive,
            couples: data.couples,
        };
        population.check_invariants()?;
        Ok(population)
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.export_data())?)
    }

    pub fn import_json(json: &str) -> Result<Population> {
        let data: ExportData = serde_json::from_str(json)?;
        Population::from_export(data)
    }

    /// Write the population to `dir/name.<ext>` and return what was written.
    pub fn save(&self, dir: &Path, name: &str, format: SaveFormat) -> Result<SaveStats> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.{}", name, format.extension()));

        let bytes = match format {
            SaveFormat::Json => serde_json::to_vec_pretty(&self.export_data())?,
            SaveFormat::Bincode => bincode::serialize(&self.export_data())?,
        };
        fs::write(&path, &bytes)?;

        let stats = SaveStats {
            path,
            population: self.living.len() as u32,
            archived: self.archive.len() as u32,
            file_bytes: bytes.len() as u64,
        };
        info!(
            "Saved year {} to {} ({} living, {} archived, {} bytes)",
            self.calendar.year,
            stats.path.display(),
            stats.population,
            stats.archived,
            stats.file_bytes
        );
        Ok(stats)
    }

    /// Load a save written by [`Population::save`]; the format follows the
    /// file extension.
    pub fn load(path: &Path) -> Result<Population> {
        let bytes = fs::read(path)?;
        let data: ExportData = match SaveFormat::from_path(path) {
            SaveFormat::Json => serde_json::from_slice(&bytes)?,
            SaveFormat::Bincode => bincode::deserialize(&bytes)?,
        };
        let population = Population::from_export(data)?;
        info!(
            "Loaded year {} from {} ({} living)",
            population.year(),
            path.display(),
            population.living_count()
        );
        Ok(population)
    }
}
