// Pipeline - the core operations in their strict order
//
// One logical session runs: register_user -> analyze -> submit_feedback.
// Inside analyze the order is fixed: resolve identity -> decode stored
// file -> extract metrics -> advise -> upsert record. No step interleaves
// with another and every interaction fails independently.

use serde::{Deserialize, Serialize};

use crate::analysis::{advise, Metrics};
use crate::audio;
use crate::context::{ActiveSlot, AppContext, Session};
use crate::error::{log_pipeline_error, PipelineError};
use crate::identity::is_valid_email;
use crate::store::{RecordPatch, UpsertOutcome};

/// Why the user uploaded this file (fixed choice list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FeedbackPurpose {
    JustChecking,
    SubmitToClient,
    StreamingUpload,
    DemoPhase,
    ProfessionalConsultation,
    ContestPrize,
    Other,
}

impl FeedbackPurpose {
    /// Label persisted into the record
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackPurpose::JustChecking => "Just checking",
            FeedbackPurpose::SubmitToClient => "Submit to client",
            FeedbackPurpose::StreamingUpload => "Streaming upload",
            FeedbackPurpose::DemoPhase => "Demo phase",
            FeedbackPurpose::ProfessionalConsultation => "Professional consultation",
            FeedbackPurpose::ContestPrize => "Contest/Prize",
            FeedbackPurpose::Other => "Other (please specify)",
        }
    }
}

/// What bothers the user most about their mix (multi-select)
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PainPoint {
    Bass,
    Highs,
    Dynamics,
    OverallLoudness,
    UnclearSound,
    NoDepth,
    NoLiveFeeling,
    DistortionClipping,
    Other,
}

impl PainPoint {
    pub fn label(&self) -> &'static str {
        match self {
            PainPoint::Bass => "Bass",
            PainPoint::Highs => "Highs",
            PainPoint::Dynamics => "Dynamics",
            PainPoint::OverallLoudness => "Overall loudness",
            PainPoint::UnclearSound => "Unclear sound",
            PainPoint::NoDepth => "No depth",
            PainPoint::NoLiveFeeling => "No live feeling",
            PainPoint::DistortionClipping => "Distortion/Clipping",
            PainPoint::Other => "Other (please specify)",
        }
    }
}

/// Were the recommendations relevant?
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Relevance {
    Yes,
    No,
    Partially,
}

impl Relevance {
    pub fn label(&self) -> &'static str {
        match self {
            Relevance::Yes => "Yes",
            Relevance::No => "No",
            Relevance::Partially => "Partially",
        }
    }
}

/// Structured feedback submitted after an analysis
#[derive(Debug, Clone)]
pub struct FeedbackForm {
    pub purpose: FeedbackPurpose,
    pub purpose_detail: Option<String>,
    pub pain_points: Vec<PainPoint>,
    pub pain_points_detail: Option<String>,
    /// Satisfaction rating, 1 (not satisfied) to 10 (completely satisfied)
    pub self_rating: u8,
    pub reference: Option<String>,
    pub relevance: Relevance,
    /// What would you like to improve in this analysis?
    pub improvement: Option<String>,
    /// Any comments/requests
    pub comments: Option<String>,
}

/// Everything one analysis returns to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metrics: Metrics,
    pub main_tip: String,
    pub tips: Vec<String>,
    pub explanations: Vec<String>,
    pub file_hash: String,
    pub filename: String,
    pub project_number: u32,
    /// true if this analysis created the record, false if it updated one
    pub record_created: bool,
    pub genre: Option<String>,
    pub project_stage: Option<String>,
}

impl AppContext {
    /// Validate a user identifier and open a session
    ///
    /// Writes the minimal identity-gate touch record (email + timestamps);
    /// touch records carry no content fingerprint and therefore always
    /// append.
    ///
    /// # Errors
    /// * `InvalidEmail` - the identifier is not email-shaped; re-prompt
    pub fn register_user(&self, email: &str) -> Result<Session, PipelineError> {
        if !is_valid_email(email) {
            let err = PipelineError::InvalidEmail {
                email: email.to_string(),
            };
            log_pipeline_error(&err, "register_user");
            return Err(err);
        }

        self.store().upsert(RecordPatch::touch(email))?;
        tracing::info!(email = %email, "session opened");
        Ok(Session::new(email))
    }

    /// Analyze an upload and persist the resulting record
    ///
    /// Strict order: resolve identity (writes the bytes to the stable
    /// path) -> decode -> extract -> advise -> upsert. Re-uploading the
    /// same content updates the existing record in place; new content
    /// creates the next project for this user.
    ///
    /// # Arguments
    /// * `session` - Open session; its active slot is updated on success
    /// * `original_name` - Name the file was uploaded under
    /// * `bytes` - Raw upload content
    /// * `genre`, `project_stage` - Optional free-form metadata
    ///
    /// # Errors
    /// * `UnsupportedFile` - decoding failed or yielded no samples; no
    ///   record is written for the attempt
    /// * `Io` - upload or store write failure
    pub fn analyze(
        &self,
        session: &mut Session,
        original_name: &str,
        bytes: &[u8],
        genre: Option<&str>,
        project_stage: Option<&str>,
    ) -> Result<AnalysisReport, PipelineError> {
        let slot = self
            .resolver()
            .resolve(self.store(), &session.email, bytes, original_name)
            .inspect_err(|err| log_pipeline_error(err, "analyze/resolve"))?;

        let clip = audio::decode_file(&slot.stored_path)
            .inspect_err(|err| log_pipeline_error(err, "analyze/decode"))?;

        let metrics = self
            .extractor()
            .extract(&clip.samples, clip.sample_rate)
            .inspect_err(|err| log_pipeline_error(err, "analyze/extract"))?;

        let advice = advise(&metrics);

        let patch = RecordPatch {
            email: session.email.clone(),
            file_hash: Some(slot.file_hash.clone()),
            filename: Some(slot.filename.clone()),
            project_number: Some(slot.project_number),
            duration: Some(metrics.duration),
            lufs: Some(metrics.lufs),
            peak: Some(metrics.peak),
            crest_factor: Some(metrics.crest_factor),
            centroid: Some(metrics.centroid),
            dominant_freq: Some(metrics.dominant_freq),
            main_tip: Some(advice.main_tip.clone()),
            tips: Some(advice.tips.join("; ")),
            genre: genre.map(str::to_string),
            project_stage: project_stage.map(str::to_string),
            ..Default::default()
        };
        let outcome = self
            .store()
            .upsert(patch)
            .inspect_err(|err| log_pipeline_error(err, "analyze/upsert"))?;

        session.current = Some(ActiveSlot {
            file_hash: slot.file_hash.clone(),
            filename: slot.filename.clone(),
        });

        tracing::info!(
            email = %session.email,
            file_hash = %slot.file_hash,
            project_number = slot.project_number,
            created = outcome == UpsertOutcome::Created,
            "analysis recorded"
        );

        Ok(AnalysisReport {
            metrics,
            main_tip: advice.main_tip,
            tips: advice.tips,
            explanations: advice.explanations,
            file_hash: slot.file_hash,
            filename: slot.filename,
            project_number: slot.project_number,
            record_created: outcome == UpsertOutcome::Created,
            genre: genre.map(str::to_string),
            project_stage: project_stage.map(str::to_string),
        })
    }

    /// Merge feedback into the record of this session's last analysis
    ///
    /// # Errors
    /// * `InvalidInput` - no analysis has run in this session, or the
    ///   rating is outside 1..=10 (both are caller contract violations)
    pub fn submit_feedback(
        &self,
        session: &Session,
        form: &FeedbackForm,
    ) -> Result<(), PipelineError> {
        let slot = session.current.as_ref().ok_or_else(|| {
            let err = PipelineError::InvalidInput {
                reason: "no analyzed upload in this session".to_string(),
            };
            log_pipeline_error(&err, "submit_feedback");
            err
        })?;

        if !(1..=10).contains(&form.self_rating) {
            let err = PipelineError::InvalidInput {
                reason: format!("self_rating {} outside 1..=10", form.self_rating),
            };
            log_pipeline_error(&err, "submit_feedback");
            return Err(err);
        }

        let pain_points = form
            .pain_points
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join("/");

        let patch = RecordPatch {
            email: session.email.clone(),
            file_hash: Some(slot.file_hash.clone()),
            filename: Some(slot.filename.clone()),
            feedback_purpose: Some(form.purpose.label().to_string()),
            feedback_purpose_free: form.purpose_detail.clone(),
            self_rating: Some(form.self_rating),
            feedback_hardest: Some(pain_points),
            feedback_hardest_free: form.pain_points_detail.clone(),
            reference: form.reference.clone(),
            q1: Some(form.relevance.label().to_string()),
            q2: form.improvement.clone(),
            q3: form.comments.clone(),
            ..Default::default()
        };
        self.store()
            .upsert(patch)
            .inspect_err(|err| log_pipeline_error(err, "submit_feedback/upsert"))?;

        tracing::info!(
            email = %session.email,
            file_hash = %slot.file_hash,
            "feedback merged"
        );
        Ok(())
    }
}

/// Plain-text copy/share summary of one analysis
pub fn summary_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str("Auto Summary:\n");
    out.push_str(&format!("Loudness (LUFS): {:.2}\n", report.metrics.lufs));
    out.push_str(&format!("Peak: {:.2}\n", report.metrics.peak));
    out.push_str(&format!(
        "Crest Factor: {:.2}\n",
        report.metrics.crest_factor
    ));
    out.push_str(&format!(
        "Dominant Frequency: {:.0}Hz\n",
        report.metrics.dominant_freq
    ));
    out.push_str(&format!("Centroid: {:.0}Hz\n", report.metrics.centroid));
    if let Some(genre) = &report.genre {
        out.push_str(&format!("Genre: {}\n", genre));
    }
    if let Some(stage) = &report.project_stage {
        out.push_str(&format!("Project Stage: {}\n", stage));
    }
    out.push_str("\nMain Tip:\n");
    out.push_str(&report.main_tip);
    out.push_str("\n\nAdditional Recommendations:\n");
    for tip in &report.tips {
        out.push_str(&format!("- {}\n", tip));
    }
    out
}
