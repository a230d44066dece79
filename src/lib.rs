//! Wavetable assembly: split a multi-cycle recording into single cycle
//! waveforms, canonicalize them to 128 samples, spread them over a 16 slot
//! grid, morph the gaps and write the grid out as an oscillator preset.
//!
//! ```text
//! wave file -> split_cycles -> to_waveform -> distribute -> grid -> morph -> preset
//! ```

pub mod audio;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod shared;
pub mod wavetable;

pub use error::{ConvertError, Result};
