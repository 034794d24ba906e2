// Store module - whole-collection JSON record persistence
//
// The record collection is one JSON array of flat records, loaded in full
// and rewritten in full on every upsert. That is acceptable at this write
// volume (one human submitting forms) and is deliberately last-write-wins:
// two concurrent writers race and the later rewrite discards the earlier
// one. No locking is added.
//
// An unreadable or wrongly-shaped collection is treated as empty and heals
// on the next write, trading durability of malformed state for
// availability.

pub mod record;

pub use record::{ProjectRecord, RecordPatch};

use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::PathBuf;

use crate::error::PipelineError;

/// Whether an upsert created a new record or updated an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// JSON-array-backed record store addressed by `(email, file_hash)`
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    /// Create a store backed by the given collection file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the full record collection
    ///
    /// A missing file is an empty collection; an unreadable or
    /// wrongly-shaped file is logged and also treated as empty.
    pub fn load(&self) -> Vec<ProjectRecord> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "record store unreadable, treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "record store malformed, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Persist the full collection, replacing the file atomically
    pub fn save(&self, records: &[ProjectRecord]) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| PipelineError::io("creating record store directory", err))?;
        }

        let json = serde_json::to_string_pretty(records).map_err(|err| {
            PipelineError::io(
                "serializing record collection",
                std::io::Error::new(std::io::ErrorKind::InvalidData, err),
            )
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|err| PipelineError::io("writing record collection", err))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|err| PipelineError::io("replacing record collection", err))?;
        Ok(())
    }

    /// Insert or update one record
    ///
    /// A patch carrying a `file_hash` matches on `(email, file_hash)` and
    /// shallow-merges into the existing record (present fields overwrite,
    /// absent fields survive). A patch without a hash cannot dedupe and
    /// always appends. Insertion order of untouched records is preserved.
    pub fn upsert(&self, patch: RecordPatch) -> Result<UpsertOutcome, PipelineError> {
        let mut records = self.load();
        let now = now_iso();

        let index = patch.file_hash.as_deref().and_then(|hash| {
            records
                .iter()
                .position(|r| r.email == patch.email && r.file_hash.as_deref() == Some(hash))
        });

        let outcome = match index {
            Some(i) => {
                records[i].merge(patch);
                records[i].updated_at = Some(now);
                UpsertOutcome::Updated
            }
            None => {
                records.push(ProjectRecord::from_patch(patch, &now));
                UpsertOutcome::Created
            }
        };

        self.save(&records)?;
        tracing::debug!(
            path = %self.path.display(),
            total = records.len(),
            ?outcome,
            "record collection rewritten"
        );
        Ok(outcome)
    }

    /// Find one record by identity key
    pub fn find(&self, email: &str, file_hash: &str) -> Option<ProjectRecord> {
        self.load()
            .into_iter()
            .find(|r| r.email == email && r.file_hash.as_deref() == Some(file_hash))
    }

    /// All records belonging to one user, in insertion order
    pub fn records_for(&self, email: &str) -> Vec<ProjectRecord> {
        self.load()
            .into_iter()
            .filter(|r| r.email == email)
            .collect()
    }
}

/// Current time as an ISO-8601 string for record timestamps
fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
