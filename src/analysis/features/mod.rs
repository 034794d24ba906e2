// FeatureExtractor - acoustic metrics for mixing-quality analysis
//
// This module turns a mono clip into the fixed set of scalar metrics the
// advisory rules consume. Metrics are computed from time-domain and
// frequency-domain representations of the whole clip.
//
// Module organization:
// - types: Data structures (Metrics struct)
// - fft: full-signal magnitude spectrum
// - spectral: frequency-domain metrics (centroid, dominant frequency)
// - temporal: time-domain metrics (RMS, peak)
// - mod.rs: Coordinator (FeatureExtractor)
//
// Metrics extracted:
// 1. Duration: sample count / sample rate
// 2. RMS: root-mean-square amplitude
// 3. Peak: maximum absolute amplitude
// 4. Crest Factor: peak / RMS ratio (dynamics / compression amount)
// 5. Loudness proxy: 20 * log10(rms), a simplified non-standard estimate
// 6. Spectral Centroid: energy-weighted mean frequency (brightness)
// 7. Dominant Frequency: strongest spectral bin

mod fft;
mod spectral;
mod temporal;
mod types;

pub use types::Metrics;

use crate::error::PipelineError;
use fft::FftProcessor;

/// Guard added to denominators and log arguments so silent input yields
/// finite metrics instead of dividing by zero or taking log(0)
pub const EPSILON: f64 = 1e-12;

/// FeatureExtractor coordinates the metric extraction pipeline
///
/// All metrics are pure functions of the input samples: identical audio
/// produces identical metrics (up to floating-point determinism).
pub struct FeatureExtractor {
    fft_processor: FftProcessor,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    pub fn new() -> Self {
        Self {
            fft_processor: FftProcessor::new(),
        }
    }

    /// Extract all metrics from a mono clip
    ///
    /// # Arguments
    /// * `samples` - Mono time-domain signal (multi-channel input must be
    ///   downmixed by the caller before this call)
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Returns
    /// * `Ok(Metrics)` - Extracted metrics
    /// * `Err(PipelineError::InvalidInput)` - Empty buffer or zero sample
    ///   rate; upstream decoding is expected to rule both out
    pub fn extract(&self, samples: &[f32], sample_rate: u32) -> Result<Metrics, PipelineError> {
        if samples.is_empty() {
            return Err(PipelineError::InvalidInput {
                reason: "empty sample buffer".to_string(),
            });
        }
        if sample_rate == 0 {
            return Err(PipelineError::InvalidInput {
                reason: "sample rate must be positive".to_string(),
            });
        }

        let duration = samples.len() as f64 / sample_rate as f64;
        let rms = temporal::compute_rms(samples);
        let peak = temporal::compute_peak(samples);
        let crest_factor = peak / (rms + EPSILON);
        let lufs = 20.0 * (rms + EPSILON).log10();

        let spectrum = self.fft_processor.compute_magnitude_spectrum(samples);
        let bin_width_hz = sample_rate as f64 / samples.len() as f64;
        let centroid = spectral::compute_centroid(&spectrum, bin_width_hz);
        let dominant_freq = spectral::dominant_frequency(&spectrum, bin_width_hz);

        log::debug!(
            "[Features] duration {:.2}s rms {:.4} peak {:.4} crest {:.2} lufs {:.2} centroid {:.1} dominant {:.1}",
            duration,
            rms,
            peak,
            crest_factor,
            lufs,
            centroid,
            dominant_freq
        );

        Ok(Metrics {
            duration,
            rms,
            peak,
            crest_factor,
            lufs,
            centroid,
            dominant_freq,
        })
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
