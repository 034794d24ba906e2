// Advisor - heuristic rule-based mixing feedback
//
// This module maps extracted metrics to human-readable mixing tips and a
// single headline verdict. Each metric is checked against a fixed low/high
// threshold pair, in a fixed order:
//
//   loudness -> peak -> crest factor -> dominant frequency -> centroid
//
// Every metric contributes exactly one tip (out-of-range or in-range
// wording). The headline is taken from the FIRST rule, in that order, that
// fires on either branch; later, possibly more severe violations still get
// a tip but not the headline. If nothing fires the headline is the
// "balanced" message.
//
// Thresholds are deliberately hardcoded (not runtime-configurable) so the
// advisory output stays reproducible. They were tuned against the
// simplified loudness proxy in `Metrics::lufs`, not true BS.1770 loudness.

use crate::analysis::features::Metrics;

/// Loudness proxy below this is flagged as too quiet (dB-like)
pub const LUFS_LOW: f64 = -15.5;
/// Loudness proxy above this is flagged as too hot (dB-like)
pub const LUFS_HIGH: f64 = -11.5;

/// Peak amplitude below this leaves headroom unused
pub const PEAK_LOW: f64 = 0.70;
/// Peak amplitude above this risks clipping
pub const PEAK_HIGH: f64 = 0.98;

/// Crest factor below this indicates over-compression
pub const CREST_LOW: f64 = 3.0;
/// Crest factor above this indicates a very dynamic mix
pub const CREST_HIGH: f64 = 6.0;

/// Dominant frequency below this suggests overpowering bass (Hz)
pub const DOMINANT_FREQ_LOW: f64 = 80.0;
/// Dominant frequency above this suggests too much high end (Hz)
pub const DOMINANT_FREQ_HIGH: f64 = 3000.0;

/// Spectral centroid below this reads as a dark mix (Hz)
pub const CENTROID_LOW: f64 = 1400.0;
/// Spectral centroid above this reads as a sharp/thin mix (Hz)
pub const CENTROID_HIGH: f64 = 4800.0;

/// Headline used when no rule fires
pub const BALANCED_HEADLINE: &str = "Your mix is balanced and excellent! Keep it up.";

/// Advisory output for one analysis
///
/// `tips` and `explanations` are ordered by rule evaluation order and are
/// deterministic given the metrics.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Advice {
    /// Single headline verdict (first firing rule, or the balanced message)
    pub main_tip: String,
    /// One tip per metric, in evaluation order
    pub tips: Vec<String>,
    /// Detailed explanations for flagged or notable metrics
    pub explanations: Vec<String>,
}

/// Set the headline slot if no earlier rule claimed it
fn claim_headline(slot: &mut Option<String>, message: &str) {
    if slot.is_none() {
        *slot = Some(message.to_string());
    }
}

/// Produce mixing advice from extracted metrics
///
/// Deterministic: no randomness, no external state.
pub fn advise(metrics: &Metrics) -> Advice {
    let mut tips = Vec::new();
    let mut explanations = Vec::new();
    let mut main_tip: Option<String> = None;

    // Rule 1: loudness proxy
    if metrics.lufs > LUFS_HIGH {
        tips.push(format!(
            "High loudness ({:.2} LUFS). It's recommended to reduce master volume/limiter to about -13~-14 LUFS to avoid distortion and automatic volume reduction on streaming platforms.",
            metrics.lufs
        ));
        claim_headline(
            &mut main_tip,
            "Loudness is too high – possible distortion/volume reduction.",
        );
        explanations.push(
            "LUFS represents perceived loudness. Too high values will cause platforms like Spotify to reduce volume automatically, possibly causing distortion.".to_string(),
        );
    } else if metrics.lufs < LUFS_LOW {
        tips.push(format!(
            "Low loudness ({:.2} LUFS). Consider raising volume or remastering to make the mix stand out.",
            metrics.lufs
        ));
        claim_headline(
            &mut main_tip,
            "Loudness is low – mix won't stand out compared to others.",
        );
        explanations.push(
            "Low LUFS means the track sounds weak compared to others, especially in playlists."
                .to_string(),
        );
    } else {
        tips.push(format!(
            "Average loudness is normal ({:.2} LUFS) – great!",
            metrics.lufs
        ));
        explanations.push(
            "Loudness is within normal range, but make sure other parameters are good too."
                .to_string(),
        );
    }

    // Rule 2: peak level
    if metrics.peak > PEAK_HIGH {
        tips.push(format!(
            "High peak value ({:.2}). Recommended to lower to -0.5dBFS to avoid clipping or distortion.",
            metrics.peak
        ));
        claim_headline(&mut main_tip, "High peak – risk of clipping/distortion.");
        explanations.push(
            "High peak values mean audio signal touches upper limit, risking digital distortion."
                .to_string(),
        );
    } else if metrics.peak < PEAK_LOW {
        tips.push(format!(
            "Low peak value ({:.2}). Consider increasing gain to utilize dynamic range.",
            metrics.peak
        ));
        claim_headline(&mut main_tip, "Low peak – available headroom going unused.");
        explanations.push(
            "Low peak means mix isn't utilizing full dynamic range – master gain can be raised."
                .to_string(),
        );
    } else {
        tips.push(format!(
            "Peak level is within a healthy range ({:.2}).",
            metrics.peak
        ));
    }

    // Rule 3: crest factor
    if metrics.crest_factor < CREST_LOW {
        tips.push(format!(
            "Low Crest Factor ({:.2}). Mix is too compressed – try reducing compression/limiter.",
            metrics.crest_factor
        ));
        claim_headline(&mut main_tip, "Mix is over-compressed – loss of dynamics.");
        explanations.push(
            "Low Crest Factor indicates small difference between peaks and noise floor, meaning heavy compression.".to_string(),
        );
    } else if metrics.crest_factor > CREST_HIGH {
        tips.push(format!(
            "High Crest Factor ({:.2}). Mix is very dynamic – might need compression.",
            metrics.crest_factor
        ));
        claim_headline(&mut main_tip, "Mix is very dynamic – may need light compression.");
        explanations.push(
            "High Crest Factor is typical for classical or soundtrack music; if not, mix might be too soft.".to_string(),
        );
    } else {
        tips.push(format!(
            "Crest Factor is within normal range ({:.2}).",
            metrics.crest_factor
        ));
    }

    // Rule 4: dominant frequency
    if metrics.dominant_freq < DOMINANT_FREQ_LOW {
        tips.push(format!(
            "Bass dominant frequency ({:.1}Hz). Check for muddy build-up in 20–80Hz range.",
            metrics.dominant_freq
        ));
        claim_headline(&mut main_tip, "Bass is overpowering – check the low end.");
        explanations.push(
            "Very low dominant frequency suggests bass is overpowering. Use headphones and EQ to check.".to_string(),
        );
    } else if metrics.dominant_freq > DOMINANT_FREQ_HIGH {
        tips.push(format!(
            "High frequency dominant ({:.1}Hz). Possibly too much high-end boost.",
            metrics.dominant_freq
        ));
        claim_headline(&mut main_tip, "High end is dominant – risk of harshness.");
        explanations.push(
            "High dominant frequency can cause harshness and listener fatigue. Balance highs and lows.".to_string(),
        );
    } else {
        tips.push(format!(
            "Dominant frequency is within a healthy range ({:.1}Hz).",
            metrics.dominant_freq
        ));
    }

    // Rule 5: spectral centroid
    if metrics.centroid < CENTROID_LOW {
        tips.push(format!(
            "Low spectral centroid ({:.1}Hz). Consider adding brightness (EQ around 2kHz-7kHz).",
            metrics.centroid
        ));
        claim_headline(&mut main_tip, "Mix sounds dark – consider adding brightness.");
        explanations.push(
            "Low centroid results in a 'dark' mix; sometimes a bit of brightness is desired for modern sound.".to_string(),
        );
    } else if metrics.centroid > CENTROID_HIGH {
        tips.push(format!(
            "High spectral centroid ({:.1}Hz). High-end is dominant – consider EQ adjustments.",
            metrics.centroid
        ));
        claim_headline(&mut main_tip, "Mix sounds sharp or thin – tame the high end.");
        explanations.push(
            "Too high centroid makes mix sound 'sharp' or 'thin', which can be unpleasant for long listening.".to_string(),
        );
    } else {
        tips.push(format!(
            "Spectral centroid is balanced ({:.1}Hz).",
            metrics.centroid
        ));
    }

    Advice {
        main_tip: main_tip.unwrap_or_else(|| BALANCED_HEADLINE.to_string()),
        tips,
        explanations,
    }
}

#[cfg(test)]
#[path = "advisor_tests.rs"]
mod tests;
