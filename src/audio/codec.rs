use std::path::Path;

use super::sample_buffer::{save_wav, SampleBuffer, WavFormat};
use crate::error::Result;

// The pipeline never touches audio files directly; it is handed a codec.
// Implementations must be shareable across worker threads.
pub trait AudioCodec: Send + Sync {
    fn decode(&self, path: &Path) -> Result<SampleBuffer>;
    fn encode(&self, samples: &[f32], path: &Path, format: &WavFormat) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WavCodec;

impl AudioCodec for WavCodec {
    fn decode(&self, path: &Path) -> Result<SampleBuffer> {
        SampleBuffer::load_wav(path)
    }

    fn encode(&self, samples: &[f32], path: &Path, format: &WavFormat) -> Result<()> {
        save_wav(samples, path, format)
    }
}
