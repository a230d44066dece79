mod distribution;
mod grid;
mod morph;

pub use distribution::{distribute, Distribution};
pub use grid::{NeutralWaveform, Slot, Waveform, WavetableGrid};
pub use morph::{morph, try_morph};
