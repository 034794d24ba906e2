//! Integration tests for the full analysis pipeline
//!
//! These tests drive the complete flow over real temp directories:
//! - email gate -> upload analysis -> persisted record
//! - re-upload reconciliation (same content updates, new content creates)
//! - feedback merging into the same record
//! - error isolation for unusable uploads

use std::io::Cursor;

use mixcheck::config::{AppConfig, StorageConfig};
use mixcheck::pipeline::{FeedbackForm, FeedbackPurpose, PainPoint, Relevance};
use mixcheck::{AppContext, PipelineError};

fn test_context(dir: &tempfile::TempDir) -> AppContext {
    AppContext::new(AppConfig {
        storage: StorageConfig {
            data_dir: dir.path().join("user_data"),
            uploads_dir: dir.path().join("uploads"),
            records_file: "all_feedbacks.json".to_string(),
        },
    })
}

/// Synthesize a sine-wave WAV entirely in memory
fn wav_bytes(frequency: f64, amplitude: f64, seconds: f64, sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        let total = (seconds * sample_rate as f64) as usize;
        for i in 0..total {
            let t = i as f64 / sample_rate as f64;
            let value = amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin();
            writer.write_sample((value * i16::MAX as f64) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn default_form(rating: u8) -> FeedbackForm {
    FeedbackForm {
        purpose: FeedbackPurpose::StreamingUpload,
        purpose_detail: None,
        pain_points: vec![PainPoint::Bass, PainPoint::OverallLoudness],
        pain_points_detail: None,
        self_rating: rating,
        reference: Some("that one track".to_string()),
        relevance: Relevance::Partially,
        improvement: None,
        comments: Some("more detail please".to_string()),
    }
}

#[test]
fn test_first_analysis_creates_project_record() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    let mut session = ctx.register_user("alice@example.com").unwrap();
    let bytes = wav_bytes(440.0, 0.5, 0.5, 44100);

    let report = ctx
        .analyze(&mut session, "my mix.wav", &bytes, Some("Techno"), Some("demo"))
        .unwrap();

    assert!(report.record_created);
    assert_eq!(report.project_number, 1);
    assert_eq!(report.filename, "alice__project_1.wav");
    assert!((report.metrics.duration - 0.5).abs() < 0.01);
    assert!((report.metrics.peak - 0.5).abs() < 0.01);
    assert_eq!(report.tips.len(), 5);

    // Stable file exists in the uploads dir
    assert!(dir.path().join("uploads").join("alice__project_1.wav").exists());

    // Touch record plus the project record
    let records = ctx.store().records_for("alice@example.com");
    assert_eq!(records.len(), 2);
    let project = records.iter().find(|r| r.file_hash.is_some()).unwrap();
    assert_eq!(project.genre.as_deref(), Some("Techno"));
    assert_eq!(project.project_stage.as_deref(), Some("demo"));
    assert_eq!(project.main_tip.as_deref(), Some(report.main_tip.as_str()));
}

#[test]
fn test_reupload_same_content_updates_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    let bytes = wav_bytes(440.0, 0.5, 0.5, 44100);

    let mut session = ctx.register_user("alice@example.com").unwrap();
    let first = ctx
        .analyze(&mut session, "mix.wav", &bytes, None, None)
        .unwrap();

    // Fresh session, same content, different upload name
    let mut session = ctx.register_user("alice@example.com").unwrap();
    let second = ctx
        .analyze(&mut session, "renamed mix.wav", &bytes, None, None)
        .unwrap();

    assert!(!second.record_created);
    assert_eq!(second.file_hash, first.file_hash);
    assert_eq!(second.filename, first.filename);
    assert_eq!(second.project_number, 1);

    // Exactly one project record for the content
    let projects: Vec<_> = ctx
        .store()
        .records_for("alice@example.com")
        .into_iter()
        .filter(|r| r.file_hash.is_some())
        .collect();
    assert_eq!(projects.len(), 1);
}

#[test]
fn test_new_content_allocates_next_project() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    let mut session = ctx.register_user("alice@example.com").unwrap();
    let first = ctx
        .analyze(&mut session, "a.wav", &wav_bytes(440.0, 0.5, 0.5, 44100), None, None)
        .unwrap();
    let second = ctx
        .analyze(&mut session, "b.wav", &wav_bytes(880.0, 0.3, 0.5, 44100), None, None)
        .unwrap();

    assert!(second.record_created);
    assert_ne!(second.file_hash, first.file_hash);
    assert_eq!(second.project_number, 2);
    assert_eq!(second.filename, "alice__project_2.wav");
}

#[test]
fn test_feedback_merges_and_survives_reanalysis() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    let bytes = wav_bytes(440.0, 0.5, 0.5, 44100);
    let mut session = ctx.register_user("alice@example.com").unwrap();
    let report = ctx
        .analyze(&mut session, "mix.wav", &bytes, None, None)
        .unwrap();

    ctx.submit_feedback(&session, &default_form(9)).unwrap();

    let record = ctx
        .store()
        .find("alice@example.com", &report.file_hash)
        .unwrap();
    assert_eq!(record.self_rating, Some(9));
    assert_eq!(record.feedback_purpose.as_deref(), Some("Streaming upload"));
    assert_eq!(
        record.feedback_hardest.as_deref(),
        Some("Bass/Overall loudness")
    );
    assert_eq!(record.q1.as_deref(), Some("Partially"));

    // Re-upload the identical bytes: metrics overwrite, feedback survives
    let mut session = ctx.register_user("alice@example.com").unwrap();
    ctx.analyze(&mut session, "mix.wav", &bytes, None, None)
        .unwrap();

    let record = ctx
        .store()
        .find("alice@example.com", &report.file_hash)
        .unwrap();
    assert_eq!(record.self_rating, Some(9));
    assert_eq!(record.reference.as_deref(), Some("that one track"));
    assert!(record.updated_at >= record.created_at);
}

#[test]
fn test_unusable_upload_writes_no_record() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    let mut session = ctx.register_user("alice@example.com").unwrap();
    let result = ctx.analyze(&mut session, "noise.wav", b"definitely not audio", None, None);

    assert!(matches!(result, Err(PipelineError::UnsupportedFile { .. })));
    // Only the identity-gate touch record exists
    let records = ctx.store().records_for("alice@example.com");
    assert_eq!(records.len(), 1);
    assert!(records[0].file_hash.is_none());
    // And the failed attempt left no active slot
    assert!(session.current.is_none());
}

#[test]
fn test_users_partition_independently() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    let bytes = wav_bytes(440.0, 0.5, 0.5, 44100);

    let mut alice = ctx.register_user("alice@example.com").unwrap();
    let alice_report = ctx.analyze(&mut alice, "mix.wav", &bytes, None, None).unwrap();

    let mut bob = ctx.register_user("bob@example.com").unwrap();
    let bob_report = ctx.analyze(&mut bob, "mix.wav", &bytes, None, None).unwrap();

    // Same content, different users: both are new first projects
    assert!(alice_report.record_created);
    assert!(bob_report.record_created);
    assert_eq!(alice_report.project_number, 1);
    assert_eq!(bob_report.project_number, 1);
    assert_eq!(alice_report.file_hash, bob_report.file_hash);
    assert_ne!(alice_report.filename, bob_report.filename);
}

#[test]
fn test_silent_upload_reports_low_loudness_headline() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    let mut session = ctx.register_user("alice@example.com").unwrap();
    let report = ctx
        .analyze(&mut session, "silence.wav", &wav_bytes(440.0, 0.0, 0.5, 44100), None, None)
        .unwrap();

    assert_eq!(report.metrics.rms, 0.0);
    assert_eq!(report.metrics.peak, 0.0);
    assert!(report.metrics.crest_factor.is_finite());
    assert_eq!(
        report.main_tip,
        "Loudness is low – mix won't stand out compared to others."
    );
}

#[test]
fn test_corrupted_store_self_heals_on_next_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    std::fs::create_dir_all(dir.path().join("user_data")).unwrap();
    std::fs::write(
        dir.path().join("user_data").join("all_feedbacks.json"),
        "[{broken",
    )
    .unwrap();

    let mut session = ctx.register_user("alice@example.com").unwrap();
    let report = ctx
        .analyze(&mut session, "mix.wav", &wav_bytes(440.0, 0.5, 0.5, 44100), None, None)
        .unwrap();

    assert!(report.record_created);
    assert_eq!(report.project_number, 1);
    // The collection is valid JSON again
    let records = ctx.store().load();
    assert_eq!(records.len(), 2);
}
