// Temporal module - time-domain amplitude metrics
//
// RMS and peak are computed in a single pass each over the full clip,
// accumulating in f64 so long files do not lose precision.

/// Compute root-mean-square amplitude
///
/// Formula: rms = sqrt(mean(x^2))
///
/// # Arguments
/// * `audio` - Time-domain signal (must be non-empty)
pub fn compute_rms(audio: &[f32]) -> f64 {
    let sum_squares: f64 = audio
        .iter()
        .map(|&sample| (sample as f64) * (sample as f64))
        .sum();
    (sum_squares / audio.len() as f64).sqrt()
}

/// Compute maximum absolute amplitude
///
/// # Arguments
/// * `audio` - Time-domain signal
pub fn compute_peak(audio: &[f32]) -> f64 {
    audio
        .iter()
        .map(|&sample| sample.abs() as f64)
        .fold(0.0_f64, f64::max)
}
