// Decoder - Symphonia-based audio decoding
//
// Decodes an uploaded audio file to PCM and downmixes to mono. All decode
// failures surface as a single UnsupportedFile error at the pipeline
// boundary; a file that decodes to zero samples is treated the same way.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::AudioSample;
use crate::error::PipelineError;

/// Decode an audio file to a mono clip
///
/// # Arguments
/// * `path` - Path to the stored upload
///
/// # Returns
/// * `Ok(AudioSample)` - Mono samples and sample rate
/// * `Err(PipelineError::UnsupportedFile)` - Unknown container, decode
///   failure, or no usable samples
/// * `Err(PipelineError::Io)` - The stored file could not be opened
pub fn decode_file(path: &Path) -> Result<AudioSample, PipelineError> {
    let src = File::open(path)
        .map_err(|err| PipelineError::io(format!("opening audio file {:?}", path), err))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| PipelineError::UnsupportedFile {
            details: format!("unrecognized container: {}", err),
        })?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| PipelineError::UnsupportedFile {
            details: "no supported audio tracks".to_string(),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|err| PipelineError::UnsupportedFile {
            details: format!("unsupported codec: {}", err),
        })?;

    let track_id = track.id;
    let mut samples: Vec<f32> = Vec::new();
    let mut sample_rate = 0_u32;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream
            Err(SymphoniaError::IoError(_)) => break,
            Err(err) => {
                return Err(PipelineError::UnsupportedFile {
                    details: format!("packet read failed: {}", err),
                })
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;

                let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                sample_buf.copy_interleaved_ref(decoded);
                let buf_samples = sample_buf.samples();

                let channels = spec.channels.count();
                if channels == 1 {
                    samples.extend_from_slice(buf_samples);
                } else {
                    // Interleaved frames -> arithmetic mean across channels
                    for frame in buf_samples.chunks(channels) {
                        let sum: f32 = frame.iter().sum();
                        samples.push(sum / channels as f32);
                    }
                }
            }
            Err(SymphoniaError::IoError(_)) => break,
            // Skip corrupt packets, keep whatever decodes
            Err(SymphoniaError::DecodeError(_)) => (),
            Err(err) => {
                return Err(PipelineError::UnsupportedFile {
                    details: format!("decode failed: {}", err),
                })
            }
        }
    }

    if samples.is_empty() || sample_rate == 0 {
        return Err(PipelineError::UnsupportedFile {
            details: "no usable samples".to_string(),
        });
    }

    log::debug!(
        "[Decoder] {:?}: {} mono samples at {} Hz",
        path,
        samples.len(),
        sample_rate
    );

    Ok(AudioSample {
        samples,
        sample_rate,
    })
}
