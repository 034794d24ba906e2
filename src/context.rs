// AppContext: dependency injection container
//
// Centralizes the pipeline's collaborators (config, store, resolver,
// extractor) so nothing lives in ambient globals. Per-user session state
// (who is logged in, which slot the last analysis resolved) travels in an
// explicit Session value passed into each pipeline call.

use std::path::PathBuf;

use crate::analysis::FeatureExtractor;
use crate::config::AppConfig;
use crate::identity::IdentityResolver;
use crate::store::JsonRecordStore;

/// Dependency container for the analysis pipeline
///
/// One instance per hosting shell. All pipeline operations
/// (`register_user`, `analyze`, `submit_feedback`) are methods on this
/// context; see `pipeline`.
pub struct AppContext {
    config: AppConfig,
    store: JsonRecordStore,
    resolver: IdentityResolver,
    extractor: FeatureExtractor,
}

impl AppContext {
    /// Build a context from configuration
    pub fn new(config: AppConfig) -> Self {
        let store = JsonRecordStore::new(config.storage.records_path());
        let resolver = IdentityResolver::new(config.storage.uploads_dir.clone());
        Self {
            config,
            store,
            resolver,
            extractor: FeatureExtractor::new(),
        }
    }

    /// The record store (read access for hosting shells)
    pub fn store(&self) -> &JsonRecordStore {
        &self.store
    }

    /// Directory resolved uploads are written to
    pub fn uploads_dir(&self) -> &PathBuf {
        &self.config.storage.uploads_dir
    }

    pub(crate) fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    pub(crate) fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }
}

/// The slot the current session's last analysis resolved to
///
/// Feedback submission uses this to update the same record the analysis
/// wrote, instead of creating a duplicate.
#[derive(Debug, Clone)]
pub struct ActiveSlot {
    pub file_hash: String,
    pub filename: String,
}

/// Explicit per-user session state
///
/// Created by `register_user` after the email gate passes; carries the
/// validated identifier and, after an analysis, the active slot.
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub current: Option<ActiveSlot>,
}

impl Session {
    pub(crate) fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            current: None,
        }
    }
}
