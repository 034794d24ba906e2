// Record types - the persisted flat record and its update patch
//
// Records serialize to the flat JSON-object shape the collection has always
// used: scalar/string values only, absent fields omitted. A schema_version
// field is written defensively; legacy records without one still parse via
// the serde default.

use serde::{Deserialize, Serialize};

/// Version written into new records
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// One persisted analysis/feedback record
///
/// Identity key is `(email, file_hash)`; uniqueness is enforced by the
/// upsert logic, not by any external constraint. The identity-gate "touch"
/// record carries only `email` and timestamps, so everything else is
/// optional and omitted from JSON when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub email: String,

    // Identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_number: Option<u32>,

    // Metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lufs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crest_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_freq: Option<f64>,

    // Advisory output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,

    // Free-form metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_stage: Option<String>,

    // Feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_purpose_free: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_hardest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_hardest_free: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q3: Option<String>,

    // Lifecycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial record used as upsert input
///
/// Fields set to `Some` overwrite the stored value; `None` fields leave the
/// stored value untouched. A patch without `file_hash` cannot be matched to
/// an existing record and always appends (the identity-gate touch record).
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub email: String,
    pub file_hash: Option<String>,
    pub filename: Option<String>,
    pub project_number: Option<u32>,
    pub duration: Option<f64>,
    pub lufs: Option<f64>,
    pub peak: Option<f64>,
    pub crest_factor: Option<f64>,
    pub centroid: Option<f64>,
    pub dominant_freq: Option<f64>,
    pub main_tip: Option<String>,
    pub tips: Option<String>,
    pub genre: Option<String>,
    pub project_stage: Option<String>,
    pub feedback_purpose: Option<String>,
    pub feedback_purpose_free: Option<String>,
    pub self_rating: Option<u8>,
    pub feedback_hardest: Option<String>,
    pub feedback_hardest_free: Option<String>,
    pub reference: Option<String>,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
}

impl RecordPatch {
    /// Minimal patch recording that a user passed the identity gate
    pub fn touch(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Default::default()
        }
    }
}

impl ProjectRecord {
    /// Create a fresh record from a patch at the given timestamp
    pub fn from_patch(patch: RecordPatch, now: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            email: patch.email,
            file_hash: patch.file_hash,
            filename: patch.filename,
            project_number: patch.project_number,
            duration: patch.duration,
            lufs: patch.lufs,
            peak: patch.peak,
            crest_factor: patch.crest_factor,
            centroid: patch.centroid,
            dominant_freq: patch.dominant_freq,
            main_tip: patch.main_tip,
            tips: patch.tips,
            genre: patch.genre,
            project_stage: patch.project_stage,
            feedback_purpose: patch.feedback_purpose,
            feedback_purpose_free: patch.feedback_purpose_free,
            self_rating: patch.self_rating,
            feedback_hardest: patch.feedback_hardest,
            feedback_hardest_free: patch.feedback_hardest_free,
            reference: patch.reference,
            q1: patch.q1,
            q2: patch.q2,
            q3: patch.q3,
            created_at: Some(now.to_string()),
            updated_at: Some(now.to_string()),
        }
    }

    /// Shallow-merge a patch: present fields overwrite, absent fields keep
    /// their stored value
    pub fn merge(&mut self, patch: RecordPatch) {
        self.email = patch.email;
        if patch.file_hash.is_some() {
            self.file_hash = patch.file_hash;
        }
        if patch.filename.is_some() {
            self.filename = patch.filename;
        }
        if patch.project_number.is_some() {
            self.project_number = patch.project_number;
        }
        if patch.duration.is_some() {
            self.duration = patch.duration;
        }
        if patch.lufs.is_some() {
            self.lufs = patch.lufs;
        }
        if patch.peak.is_some() {
            self.peak = patch.peak;
        }
        if patch.crest_factor.is_some() {
            self.crest_factor = patch.crest_factor;
        }
        if patch.centroid.is_some() {
            self.centroid = patch.centroid;
        }
        if patch.dominant_freq.is_some() {
            self.dominant_freq = patch.dominant_freq;
        }
        if patch.main_tip.is_some() {
            self.main_tip = patch.main_tip;
        }
        if patch.tips.is_some() {
            self.tips = patch.tips;
        }
        if patch.genre.is_some() {
            self.genre = patch.genre;
        }
        if patch.project_stage.is_some() {
            self.project_stage = patch.project_stage;
        }
        if patch.feedback_purpose.is_some() {
            self.feedback_purpose = patch.feedback_purpose;
        }
        if patch.feedback_purpose_free.is_some() {
            self.feedback_purpose_free = patch.feedback_purpose_free;
        }
        if patch.self_rating.is_some() {
            self.self_rating = patch.self_rating;
        }
        if patch.feedback_hardest.is_some() {
            self.feedback_hardest = patch.feedback_hardest;
        }
        if patch.feedback_hardest_free.is_some() {
            self.feedback_hardest_free = patch.feedback_hardest_free;
        }
        if patch.reference.is_some() {
            self.reference = patch.reference;
        }
        if patch.q1.is_some() {
            self.q1 = patch.q1;
        }
        if patch.q2.is_some() {
            self.q2 = patch.q2;
        }
        if patch.q3.is_some() {
            self.q3 = patch.q3;
        }
    }
}
