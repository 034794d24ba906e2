// Types module - Data structures for audio metrics
//
// This module defines the metrics struct produced by the feature
// extraction pipeline. Every field is a pure function of the input
// samples: re-analyzing identical audio yields identical values.

/// Acoustic metrics extracted from a full audio clip
///
/// These metrics drive the mixing-quality advisory rules (loudness, peak,
/// dynamics, spectral balance). Each captures a different property of the
/// uploaded mix.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metrics {
    /// Clip duration in seconds (sample count / sample rate)
    pub duration: f64,

    /// Root-mean-square amplitude
    pub rms: f64,

    /// Maximum absolute amplitude
    pub peak: f64,

    /// Peak / RMS ratio (epsilon-guarded)
    ///
    /// Indicates dynamic range: low values mean heavy compression,
    /// high values mean a very dynamic mix.
    pub crest_factor: f64,

    /// Simplified loudness proxy: 20 * log10(rms + epsilon)
    ///
    /// NOT an ITU-R BS.1770 loudness measurement; no frequency weighting
    /// or gating is applied. The advisory thresholds are tuned against
    /// this proxy, not the true standard.
    pub lufs: f64,

    /// Spectral centroid in Hz (energy-weighted mean frequency)
    ///
    /// Perceptual brightness indicator. Higher values indicate more
    /// high-frequency content.
    pub centroid: f64,

    /// Frequency of the strongest spectral bin in Hz
    pub dominant_freq: f64,
}
