// FFT module - full-signal spectrum computation
//
// Computes the one-sided magnitude spectrum of an entire clip in one
// transform (no framing, no windowing). Spectral metrics here describe the
// overall tonal balance of a mix, so the whole signal is transformed at its
// natural length and bin k maps to frequency k * sample_rate / N.

use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::{Arc, Mutex};

/// FFT processor that computes magnitude spectra from full audio clips
pub struct FftProcessor {
    fft_planner: Arc<Mutex<FftPlanner<f32>>>,
}

impl FftProcessor {
    /// Create a new FFT processor
    pub fn new() -> Self {
        Self {
            fft_planner: Arc::new(Mutex::new(FftPlanner::new())),
        }
    }

    /// Compute the one-sided magnitude spectrum of a real-valued signal
    ///
    /// Transforms the signal at its full length and returns magnitudes for
    /// the non-negative frequencies only (N/2 + 1 bins), exploiting the
    /// symmetry of real-input FFTs.
    ///
    /// # Arguments
    /// * `audio` - Full time-domain signal (must be non-empty)
    ///
    /// # Returns
    /// Magnitude spectrum (size = len / 2 + 1)
    pub fn compute_magnitude_spectrum(&self, audio: &[f32]) -> Vec<f32> {
        let n = audio.len();

        let mut buffer: Vec<Complex<f32>> = audio
            .iter()
            .map(|&sample| Complex::new(sample, 0.0))
            .collect();

        let fft = {
            let mut planner = self.fft_planner.lock().unwrap();
            planner.plan_fft_forward(n)
        };
        fft.process(&mut buffer);

        buffer[..n / 2 + 1].iter().map(|c| c.norm()).collect()
    }
}

impl Default for FftProcessor {
    fn default() -> Self {
        Self::new()
    }
}
