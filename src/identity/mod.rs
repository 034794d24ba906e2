// Identity module - content fingerprinting and project slot resolution
//
// Decides whether an upload is a new "project" or a re-upload of content
// this user has sent before, and assigns the stable on-disk identity
// either way. The tie-break is strictly content-hash equality: the same
// bytes re-uploaded under any name land in the same slot, different bytes
// always allocate a new slot.
//
// The resolver also owns getting the raw bytes onto disk at the resolved
// stable path, via write-temp-then-rename so a failed write never leaves a
// half-written file at the canonical location.

pub mod email;

pub use email::is_valid_email;

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::store::{JsonRecordStore, ProjectRecord};

/// Hex characters kept from the content digest
pub const FINGERPRINT_LEN: usize = 10;

/// Upper bound on the sanitized user prefix in stored filenames
const MAX_PREFIX_LEN: usize = 64;

/// Legacy records carry the project number only in the filename
static PROJECT_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__project_(\d+)\.").unwrap());

/// The stable identity resolved for one upload
#[derive(Debug, Clone)]
pub struct ResolvedSlot {
    /// Content fingerprint of the uploaded bytes
    pub file_hash: String,
    /// Stable filename inside the uploads directory
    pub filename: String,
    /// Full path the bytes were written to
    pub stored_path: PathBuf,
    /// Per-user monotonically increasing project number
    pub project_number: u32,
    /// Whether this content was seen for the first time for this user
    pub is_new_project: bool,
}

/// Resolves uploads to stable project slots and writes them to disk
pub struct IdentityResolver {
    uploads_dir: PathBuf,
}

impl IdentityResolver {
    /// Create a resolver writing into the given uploads directory
    pub fn new(uploads_dir: PathBuf) -> Self {
        Self { uploads_dir }
    }

    /// Compute the content fingerprint of raw upload bytes
    ///
    /// Truncated hex SHA-256: deterministic, content-addressed, and short
    /// enough to live comfortably in every persisted record.
    pub fn fingerprint(bytes: &[u8]) -> String {
        let digest = Sha256::digest(bytes);
        let hex = format!("{:x}", digest);
        hex[..FINGERPRINT_LEN].to_string()
    }

    /// Resolve the stable slot for an upload and write the bytes there
    ///
    /// Looks up `(email, fingerprint)` in the store:
    /// - hit: reuse the recorded filename (re-upload updates in place);
    ///   a record that lost its filename falls back to a fresh allocation
    /// - miss: allocate the next project number for this user and derive
    ///   a stable filename from the sanitized email prefix
    ///
    /// # Arguments
    /// * `store` - Record store used for the identity lookup
    /// * `email` - Validated user identifier
    /// * `bytes` - Raw upload content
    /// * `original_name` - Name the file was uploaded under (extension source)
    pub fn resolve(
        &self,
        store: &JsonRecordStore,
        email: &str,
        bytes: &[u8],
        original_name: &str,
    ) -> Result<ResolvedSlot, PipelineError> {
        let file_hash = Self::fingerprint(bytes);
        let records = store.load();

        let existing = records
            .iter()
            .find(|r| r.email == email && r.file_hash.as_deref() == Some(file_hash.as_str()));

        let (filename, project_number, is_new_project) = match existing {
            Some(record) => {
                match record.filename.clone().filter(|name| !name.is_empty()) {
                    Some(name) => {
                        let number = record
                            .project_number
                            .or_else(|| parse_project_number(&name))
                            .unwrap_or(0);
                        (name, number, false)
                    }
                    None => {
                        // Record survived but its filename did not; allocate
                        // a fresh slot rather than fail the upload
                        let number = next_project_number(&records, email);
                        tracing::warn!(
                            email = %email,
                            file_hash = %file_hash,
                            "existing record has no filename, allocating a new slot"
                        );
                        (
                            build_project_filename(email, number, original_name),
                            number,
                            false,
                        )
                    }
                }
            }
            None => {
                let number = next_project_number(&records, email);
                (
                    build_project_filename(email, number, original_name),
                    number,
                    true,
                )
            }
        };

        let stored_path = self.uploads_dir.join(&filename);
        self.write_atomic(&stored_path, bytes)?;

        tracing::info!(
            email = %email,
            file_hash = %file_hash,
            filename = %filename,
            project_number,
            is_new_project,
            "resolved upload slot"
        );

        Ok(ResolvedSlot {
            file_hash,
            filename,
            stored_path,
            project_number,
            is_new_project,
        })
    }

    /// Write bytes to the stable path, replacing prior content atomically
    fn write_atomic(&self, final_path: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
        fs::create_dir_all(&self.uploads_dir)
            .map_err(|err| PipelineError::io("creating uploads directory", err))?;

        let tmp_path = self.uploads_dir.join("__upload.tmp");
        fs::write(&tmp_path, bytes)
            .map_err(|err| PipelineError::io("writing upload to temp file", err))?;
        fs::rename(&tmp_path, final_path)
            .map_err(|err| PipelineError::io("moving upload into place", err))?;
        Ok(())
    }
}

/// Replace everything outside ASCII letters, digits, '_', '-', '.' and cap
/// the length so hostile names cannot cause path or filesystem trouble
pub fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_PREFIX_LEN)
        .collect()
}

/// Build the stable filename for a project slot:
/// `<sanitizedUserPrefix>__project_<N>.<ext>`
fn build_project_filename(email: &str, project_number: u32, original_name: &str) -> String {
    let local_part = email.split('@').next().unwrap_or("");
    let prefix = if local_part.is_empty() {
        "anon".to_string()
    } else {
        sanitize_filename(local_part)
    };

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", sanitize_filename(&e.to_lowercase())))
        .unwrap_or_default();

    format!("{}__project_{}{}", prefix, project_number, ext)
}

/// Next project number for a user: 1 + the highest number on record
fn next_project_number(records: &[ProjectRecord], email: &str) -> u32 {
    let max_existing = records
        .iter()
        .filter(|r| r.email == email)
        .filter_map(|r| {
            r.project_number
                .or_else(|| r.filename.as_deref().and_then(parse_project_number))
        })
        .max()
        .unwrap_or(0);
    max_existing + 1
}

/// Recover a project number from a legacy stored filename
fn parse_project_number(filename: &str) -> Option<u32> {
    PROJECT_NUMBER_PATTERN
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
