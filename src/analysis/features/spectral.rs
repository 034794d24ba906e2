// Spectral module - frequency-domain metrics
//
// Computes spectral balance metrics from a one-sided magnitude spectrum.
// Bin frequencies are bin_width_hz = sample_rate / signal_len, supplied by
// the caller since the transform length varies with clip length.

use super::EPSILON;

/// Compute the spectral centroid (energy-weighted mean frequency)
///
/// Formula: centroid = sum(f_i * |X[i]|) / (sum|X[i]| + epsilon)
///
/// The centroid is the "center of mass" of the spectrum and tracks the
/// perceived brightness of a mix. The epsilon guard keeps the value finite
/// for silent input.
///
/// # Arguments
/// * `spectrum` - One-sided magnitude spectrum
/// * `bin_width_hz` - Frequency width of one bin (sample_rate / signal_len)
///
/// # Returns
/// Spectral centroid in Hz
pub fn compute_centroid(spectrum: &[f32], bin_width_hz: f64) -> f64 {
    let mut weighted_sum = 0.0_f64;
    let mut magnitude_sum = 0.0_f64;

    for (i, &mag) in spectrum.iter().enumerate() {
        weighted_sum += i as f64 * bin_width_hz * mag as f64;
        magnitude_sum += mag as f64;
    }

    weighted_sum / (magnitude_sum + EPSILON)
}

/// Find the frequency of the strongest spectral bin
///
/// Ties resolve to the lowest bin; an all-zero spectrum therefore reports
/// bin 0 (DC).
///
/// # Arguments
/// * `spectrum` - One-sided magnitude spectrum (must be non-empty)
/// * `bin_width_hz` - Frequency width of one bin
///
/// # Returns
/// Dominant frequency in Hz
pub fn dominant_frequency(spectrum: &[f32], bin_width_hz: f64) -> f64 {
    let mut max_index = 0_usize;
    let mut max_magnitude = spectrum[0];

    for (i, &mag) in spectrum.iter().enumerate().skip(1) {
        if mag > max_magnitude {
            max_magnitude = mag;
            max_index = i;
        }
    }

    max_index as f64 * bin_width_hz
}
