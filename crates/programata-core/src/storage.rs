//! JSON document storage behind a capability trait.
//!
//! The serving layer reads and writes every document (channels, catalog,
//! blacklist, per-day programs) through [`Storage`], so a cloud-object
//! backend only has to implement these five operations. Reads tolerate
//! missing or corrupt files by returning `None`; schedule fetching must keep
//! working when a data file goes bad.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub trait Storage: Send + Sync {
    fn read_value(&self, path: &Path) -> Option<Value>;
    fn write_value(&self, path: &Path, value: &Value) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn delete(&self, path: &Path) -> Result<()>;
    /// Names of the `.json` files directly under `dir`, sorted.
    fn list(&self, dir: &Path) -> Vec<String>;
}

/// Typed wrappers over the object-safe [`Storage`] surface.
pub trait StorageExt: Storage {
    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let value = self.read_value(path)?;
        match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Unexpected document shape in {:?}: {}", path, e);
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let value = serde_json::to_value(data)
            .map_err(|e| anyhow!("Failed to serialize document for {:?}: {}", path, e))?;
        self.write_value(path, &value)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// Local-filesystem backend. Writes pretty JSON and creates parent
/// directories on demand.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    fn read_value(&self, path: &Path) -> Option<Value> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Cannot read {:?}: {}", path, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Corrupt JSON in {:?}: {}", path, e);
                None
            }
        }
    }

    fn write_value(&self, path: &Path, value: &Value) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn delete(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path)?;
        Ok(())
    }

    fn list(&self, dir: &Path) -> Vec<String> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".json"))
            .collect();
        names.sort();
        names
    }
}

/// File name of a saved day inside the programs directory.
pub fn program_file(programs_dir: &Path, date: NaiveDate) -> PathBuf {
    programs_dir.join(format!("{}.json", date))
}

/// The rolling window: today and the six days before it, oldest first.
pub fn last_seven_days(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7)
        .rev()
        .filter_map(|offset| today.checked_sub_days(chrono::Days::new(offset)))
        .collect()
}

/// Delete day files that have fallen out of the 7-day window.
/// Files whose stems are not dates are left alone.
pub fn cleanup_old_programs(storage: &dyn Storage, programs_dir: &Path, today: NaiveDate) -> usize {
    let cutoff = match today.checked_sub_days(chrono::Days::new(7)) {
        Some(cutoff) => cutoff,
        None => return 0,
    };
    let mut removed = 0;
    for name in storage.list(programs_dir) {
        let stem = name.trim_end_matches(".json");
        let Ok(file_date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") else {
            continue;
        };
        if file_date < cutoff {
            match storage.delete(&programs_dir.join(&name)) {
                Ok(()) => {
                    debug!("Deleted old program file: {}", name);
                    removed += 1;
                }
                Err(e) => warn!("Failed to delete old program file {}: {}", name, e),
            }
        }
    }
    removed
}
