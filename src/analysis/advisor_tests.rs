// Advisor rule tests
//
// The advisory rules are pure functions of Metrics, so every branch and the
// first-match-wins headline policy can be pinned down with synthetic metric
// values.

use super::*;

/// Metrics with every value inside its healthy range
fn balanced_metrics() -> Metrics {
    Metrics {
        duration: 180.0,
        rms: 0.25,
        peak: 0.85,
        crest_factor: 4.0,
        lufs: -13.0,
        centroid: 2500.0,
        dominant_freq: 440.0,
    }
}

#[test]
fn test_balanced_mix_gets_balanced_headline() {
    let advice = advise(&balanced_metrics());

    assert_eq!(advice.main_tip, BALANCED_HEADLINE);
    // One tip per metric, in evaluation order
    assert_eq!(advice.tips.len(), 5);
    assert!(advice.tips[0].contains("Average loudness is normal"));
    assert!(advice.tips[1].contains("Peak level is within a healthy range"));
    assert!(advice.tips[2].contains("Crest Factor is within normal range"));
    assert!(advice.tips[3].contains("Dominant frequency is within a healthy range"));
    assert!(advice.tips[4].contains("Spectral centroid is balanced"));
}

#[test]
fn test_first_match_wins_loudness_over_peak() {
    // Both loudness (high) and peak (high) fire; loudness is evaluated
    // first and owns the headline even though clipping may be more severe.
    let mut metrics = balanced_metrics();
    metrics.lufs = -10.0;
    metrics.peak = 0.99;

    let advice = advise(&metrics);

    assert_eq!(
        advice.main_tip,
        "Loudness is too high – possible distortion/volume reduction."
    );
    assert!(advice.tips.iter().any(|t| t.contains("High peak value")));
}

#[test]
fn test_peak_headline_when_loudness_in_range() {
    let mut metrics = balanced_metrics();
    metrics.peak = 0.99;

    let advice = advise(&metrics);
    assert_eq!(advice.main_tip, "High peak – risk of clipping/distortion.");
}

#[test]
fn test_low_loudness_headline() {
    let mut metrics = balanced_metrics();
    metrics.lufs = -20.0;

    let advice = advise(&metrics);
    assert_eq!(
        advice.main_tip,
        "Loudness is low – mix won't stand out compared to others."
    );
    assert!(advice.tips[0].contains("Low loudness"));
}

#[test]
fn test_over_compressed_headline() {
    let mut metrics = balanced_metrics();
    metrics.crest_factor = 1.5;

    let advice = advise(&metrics);
    assert_eq!(advice.main_tip, "Mix is over-compressed – loss of dynamics.");
}

#[test]
fn test_every_out_of_range_branch_can_headline() {
    // Each later rule claims the headline when all earlier rules stay quiet
    let cases: Vec<(fn(&mut Metrics), &str)> = vec![
        (|m| m.peak = 0.5, "Low peak – available headroom going unused."),
        (
            |m| m.crest_factor = 8.0,
            "Mix is very dynamic – may need light compression.",
        ),
        (
            |m| m.dominant_freq = 50.0,
            "Bass is overpowering – check the low end.",
        ),
        (
            |m| m.dominant_freq = 5000.0,
            "High end is dominant – risk of harshness.",
        ),
        (
            |m| m.centroid = 900.0,
            "Mix sounds dark – consider adding brightness.",
        ),
        (
            |m| m.centroid = 6000.0,
            "Mix sounds sharp or thin – tame the high end.",
        ),
    ];

    for (mutate, expected) in cases {
        let mut metrics = balanced_metrics();
        mutate(&mut metrics);
        let advice = advise(&metrics);
        assert_eq!(advice.main_tip, expected);
    }
}

#[test]
fn test_silence_reports_low_loudness() {
    // Silence: rms 0, epsilon-guarded lufs far below the low threshold
    let metrics = Metrics {
        duration: 1.0,
        rms: 0.0,
        peak: 0.0,
        crest_factor: 0.0,
        lufs: -240.0,
        centroid: 0.0,
        dominant_freq: 0.0,
    };

    let advice = advise(&metrics);
    assert_eq!(
        advice.main_tip,
        "Loudness is low – mix won't stand out compared to others."
    );
}

#[test]
fn test_square_wave_flags_peak_and_crest() {
    // Full-scale square wave: lufs 0 (fires first and takes the headline),
    // peak 1.0 and crest ~1.0 both flagged in the tips
    let metrics = Metrics {
        duration: 1.0,
        rms: 1.0,
        peak: 1.0,
        crest_factor: 1.0,
        lufs: 0.0,
        centroid: 300.0,
        dominant_freq: 100.0,
    };

    let advice = advise(&metrics);
    assert_eq!(
        advice.main_tip,
        "Loudness is too high – possible distortion/volume reduction."
    );
    assert!(advice.tips.iter().any(|t| t.contains("High peak value")));
    assert!(advice.tips.iter().any(|t| t.contains("Low Crest Factor")));
}

#[test]
fn test_thresholds_are_boundaries_not_inclusive() {
    // Values exactly at a threshold do not fire the rule
    let mut metrics = balanced_metrics();
    metrics.lufs = LUFS_HIGH;
    metrics.peak = PEAK_HIGH;
    metrics.crest_factor = CREST_LOW;

    let advice = advise(&metrics);
    assert_eq!(advice.main_tip, BALANCED_HEADLINE);
}

#[test]
fn test_output_is_deterministic() {
    let mut metrics = balanced_metrics();
    metrics.centroid = 6000.0;

    let first = advise(&metrics);
    let second = advise(&metrics);
    assert_eq!(first.main_tip, second.main_tip);
    assert_eq!(first.tips, second.tips);
    assert_eq!(first.explanations, second.explanations);
}

#[test]
fn test_explanation_counts_follow_branches() {
    // Balanced mix: loudness always explains itself, the quiet branches of
    // the other rules do not
    let advice = advise(&balanced_metrics());
    assert_eq!(advice.explanations.len(), 1);

    // All five rules firing: one explanation each
    let metrics = Metrics {
        duration: 1.0,
        rms: 0.9,
        peak: 0.99,
        crest_factor: 1.1,
        lufs: -0.9,
        centroid: 900.0,
        dominant_freq: 20.0,
    };
    let advice = advise(&metrics);
    assert_eq!(advice.explanations.len(), 5);
}
