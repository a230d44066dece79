mod codec;
mod cycle;
mod resample;
mod sample_buffer;

pub use codec::{AudioCodec, WavCodec};
pub use cycle::{split_cycles, Cycle};
pub use resample::{resample, to_waveform};
pub use sample_buffer::{save_wav, SampleBuffer, WavFormat};
