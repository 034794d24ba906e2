// Audio module - decoding uploads into analyzable samples
//
// Uploads arrive as raw container bytes (WAV or MP3); the decoder turns the
// stored file into a mono f32 clip plus its sample rate. Multi-channel
// audio is reduced to mono by per-frame arithmetic mean before any metric
// is computed.

pub mod decoder;

pub use decoder::decode_file;

/// A decoded mono clip
///
/// Ephemeral: exists only for the duration of one analysis call and is not
/// persisted beyond the metrics it yields.
#[derive(Debug, Clone)]
pub struct AudioSample {
    /// Mono amplitudes (multi-channel input already averaged down)
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}
