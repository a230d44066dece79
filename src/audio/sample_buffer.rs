use std::path::Path;

use crate::error::{ConvertError, Result};

// Bit depth and encoding a buffer was read with; the single cycle
// files are written back out with the same values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub sample_format: hound::SampleFormat,
}

impl WavFormat {
    pub fn float32(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        }
    }

    pub fn int(sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        }
    }

    fn spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: self.sample_format,
        }
    }
}

/// A decoded, mono mixdown of one wave file
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub samples: Vec<f32>, // always mono, normalized to [-1, 1]
    pub format: WavFormat,
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    // Load a WAV file from disk, summing every channel down to mono
    pub fn load_wav(path: &Path) -> Result<Self> {
        let decode_err = |source| ConvertError::Decode { path: path.to_path_buf(), source };

        let mut reader = hound::WavReader::open(path).map_err(decode_err)?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader // float, just pass it through
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(decode_err)?,
            hound::SampleFormat::Int => { // int, scale down to float
                let max = int_scale(spec.bits_per_sample);
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(decode_err)?
            }
        };

        let channels = spec.channels.max(1) as usize;
        let samples = if channels == 1 {
            interleaved
        } else {
            // mix: average all channels of a frame
            interleaved
                .chunks_exact(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                .collect()
        };

        Ok(Self {
            samples,
            format: WavFormat {
                sample_rate: spec.sample_rate,
                bits_per_sample: spec.bits_per_sample,
                sample_format: spec.sample_format,
            },
        })
    }
}

// Write mono float samples to disk using the requested encoding
pub fn save_wav(samples: &[f32], path: &Path, format: &WavFormat) -> Result<()> {
    let encode_err = |source| ConvertError::Encode { path: path.to_path_buf(), source };

    let mut writer = hound::WavWriter::create(path, format.spec()).map_err(encode_err)?;
    match format.sample_format {
        hound::SampleFormat::Float => {
            if format.bits_per_sample != 32 {
                return Err(ConvertError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    detail: format!("{}-bit float", format.bits_per_sample),
                });
            }
            for &s in samples {
                writer.write_sample(s).map_err(encode_err)?;
            }
        }
        hound::SampleFormat::Int => {
            let max = int_scale(format.bits_per_sample);
            for &s in samples {
                // clamp before scaling so full-scale input can't wrap
                let v = (s.clamp(-1.0, 1.0) * max).round().clamp(-max, max - 1.0) as i32;
                let written = match format.bits_per_sample {
                    8 => writer.write_sample(v as i8),
                    16 => writer.write_sample(v as i16),
                    _ => writer.write_sample(v),
                };
                written.map_err(encode_err)?;
            }
        }
    }
    writer.finalize().map_err(encode_err)?;
    Ok(())
}

fn int_scale(bits_per_sample: u16) -> f32 {
    (1i64 << (bits_per_sample.clamp(1, 32) - 1)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_wav_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.wav");
        let samples: Vec<f32> = (0..64).map(|i| i as f32 / 64.0 - 0.5).collect();

        save_wav(&samples, &path, &WavFormat::float32(44100)).unwrap();
        let loaded = SampleBuffer::load_wav(&path).unwrap();

        assert_eq!(loaded.samples, samples);
        assert_eq!(loaded.format, WavFormat::float32(44100));
    }

    #[test]
    fn int16_wav_keeps_format_and_rough_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("half.wav");
        let samples = vec![0.5f32, -0.5, 0.0, 1.0];

        save_wav(&samples, &path, &WavFormat::int(48000, 16)).unwrap();
        let loaded = SampleBuffer::load_wav(&path).unwrap();

        assert_eq!(loaded.format, WavFormat::int(48000, 16));
        for (a, b) in loaded.samples.iter().zip(&samples) {
            assert!((a - b).abs() < 1e-3, "{a} vs {b}");
        }
    }

    #[test]
    fn stereo_is_mixed_down_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for (l, r) in [(1.0f32, 0.0f32), (0.5, 0.5), (-1.0, 0.0)] {
            writer.write_sample(l).unwrap();
            writer.write_sample(r).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = SampleBuffer::load_wav(&path).unwrap();
        assert_eq!(loaded.samples, vec![0.5, 0.5, -0.5]);
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = SampleBuffer::load_wav(Path::new("/nonexistent/nothing.wav")).unwrap_err();
        assert!(matches!(err, ConvertError::Decode { .. }));
    }
}
