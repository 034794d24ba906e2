//! Configuration for storage paths
//!
//! This module provides runtime configuration loading from a JSON file.
//! Only the filesystem layout is configurable: where the record collection
//! lives and where resolved uploads are stored. Advisory thresholds are
//! deliberately fixed constants (see `analysis::advisor`) so analysis
//! behavior stays reproducible across deployments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
}

/// Filesystem layout for persisted state
///
/// Two logical directories: one holding the record collection, one holding
/// one stable audio file per resolved project slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted record collection
    pub data_dir: PathBuf,
    /// Directory holding one stable audio file per project slot
    pub uploads_dir: PathBuf,
    /// Record collection filename inside `data_dir`
    pub records_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("user_data"),
            uploads_dir: PathBuf::from("uploads"),
            records_file: "all_feedbacks.json".to_string(),
        }
    }
}

impl StorageConfig {
    /// Full path of the record collection file
    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(&self.records_file)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file is missing
    /// or invalid (a warning is logged either way).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}
