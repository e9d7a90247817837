//! Audio decode and resample for the speech modality
//!
//! Decodes fetched audio bytes to mono f32 PCM with symphonia and resamples
//! to the fixed transcription rate with rubato.

use rubato::{FastFixedIn, PolynomialDegree, Resampler};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Audio decode errors
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to probe audio format: {0}")]
    Probe(String),

    #[error("No audio track found")]
    NoTrack,

    #[error("Decode failed: {0}")]
    Decode(String),

    #[error("Resample failed: {0}")]
    Resample(String),
}

/// Decoded mono audio
#[derive(Debug)]
pub struct DecodedAudio {
    /// Mono samples in [-1.0, 1.0]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Decode audio bytes to mono f32 PCM.
///
/// Multi-channel input is averaged down to mono.
pub fn decode_to_mono(bytes: Vec<u8>) -> Result<DecodedAudio, DecodeError> {
    let cursor = std::io::Cursor::new(bytes);
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::Probe(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.ok_or(DecodeError::NoTrack)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Decode(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(DecodeError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| DecodeError::Decode(e.to_string()))?;

        let spec = *decoded.spec();
        let channels = spec.channels.count();
        if channels == 0 {
            return Err(DecodeError::Decode("stream reports zero channels".to_string()));
        }

        if sample_buf.is_none() {
            sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
        }

        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            for frame in buf.samples().chunks_exact(channels) {
                samples.push(frame.iter().sum::<f32>() / channels as f32);
            }
        }
    }

    tracing::debug!(
        total_samples = samples.len(),
        sample_rate,
        "Audio decoding complete"
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
    })
}

/// Resample mono samples to the target rate.
///
/// Returns the input unchanged when the rates already match.
pub fn resample(samples: Vec<f32>, input_rate: u32, output_rate: u32) -> Result<Vec<f32>, DecodeError> {
    if input_rate == output_rate || samples.is_empty() {
        return Ok(samples);
    }

    let input_frames = samples.len();
    let mut resampler = FastFixedIn::<f32>::new(
        output_rate as f64 / input_rate as f64,
        1.0,
        PolynomialDegree::Septic,
        input_frames,
        1,
    )
    .map_err(|e| DecodeError::Resample(e.to_string()))?;

    let mut output = resampler
        .process(&[samples], None)
        .map_err(|e| DecodeError::Resample(e.to_string()))?;

    tracing::debug!(
        input_frames,
        output_frames = output[0].len(),
        input_rate,
        output_rate,
        "Resampling complete"
    );

    Ok(output.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_garbage_bytes() {
        let result = decode_to_mono(vec![0x00, 0x01, 0x02, 0x03]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resample_same_rate_is_identity() {
        let input = vec![0.1, 0.2, 0.3];
        let output = resample(input.clone(), 16_000, 16_000).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_resample_empty_input() {
        let output = resample(vec![], 44_100, 16_000).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_resample_halves_sample_count() {
        let input: Vec<f32> = (0..32_000).map(|i| (i as f32 * 0.001).sin()).collect();
        let output = resample(input, 32_000, 16_000).unwrap();
        // one second of audio stays roughly one second long
        assert!((output.len() as i64 - 16_000).abs() < 200, "got {}", output.len());
    }
}
