// The 16 slot wavetable and the frames that live in it

use serde::{Deserialize, Serialize};

use crate::shared::{NUM_SLOTS, WAVEFORM_LEN};

/// One canonical single-cycle frame, always `WAVEFORM_LEN` samples
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform {
    samples: [f32; WAVEFORM_LEN],
}

impl Waveform {
    pub fn new(samples: [f32; WAVEFORM_LEN]) -> Self {
        Self { samples }
    }

    pub fn silence() -> Self {
        Self { samples: [0.0; WAVEFORM_LEN] }
    }

    // one period of sin, starting at zero phase
    pub fn sine() -> Self {
        Self {
            samples: std::array::from_fn(|i| {
                (std::f32::consts::TAU * i as f32 / WAVEFORM_LEN as f32).sin()
            }),
        }
    }

    pub fn samples(&self) -> &[f32; WAVEFORM_LEN] {
        &self.samples
    }

    // sample-wise cross-fade, t = 0 is all `self`, t = 1 is all `other`
    pub fn blend(&self, other: &Waveform, t: f32) -> Waveform {
        Waveform {
            samples: std::array::from_fn(|i| self.samples[i] * (1.0 - t) + other.samples[i] * t),
        }
    }
}

// Reference frame used as the far end of the morph when a file only has one cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeutralWaveform {
    #[default]
    Sine,
    Flat,
}

impl NeutralWaveform {
    pub fn waveform(self) -> Waveform {
        match self {
            NeutralWaveform::Sine => Waveform::sine(),
            NeutralWaveform::Flat => Waveform::silence(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slot {
    pub waveform: Option<Waveform>,
    pub enabled: bool, // set only for slots holding a real (or morphed) frame
}

impl Slot {
    pub fn filled(waveform: Waveform) -> Self {
        Self { waveform: Some(waveform), enabled: true }
    }

    // empty slots read back as silence
    pub fn samples(&self) -> [f32; WAVEFORM_LEN] {
        self.waveform
            .as_ref()
            .map(|w| *w.samples())
            .unwrap_or([0.0; WAVEFORM_LEN])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WavetableGrid {
    pub slots: [Slot; NUM_SLOTS],
}

impl Default for WavetableGrid {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::default()),
        }
    }
}

impl WavetableGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: usize, waveform: Waveform) {
        self.slots[index] = Slot::filled(waveform);
    }

    pub fn enabled_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.enabled)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.enabled).count()
    }

    // bit i set = slot i enabled
    pub fn enabled_mask(&self) -> u16 {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.enabled)
            .fold(0u16, |mask, (i, _)| mask | (1 << i))
    }

    pub fn is_fully_enabled(&self) -> bool {
        self.slots.iter().all(|s| s.enabled && s.waveform.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty_and_silent() {
        let grid = WavetableGrid::new();
        assert_eq!(grid.enabled_count(), 0);
        assert_eq!(grid.enabled_mask(), 0);
        assert!(grid.slots.iter().all(|s| s.samples() == [0.0; WAVEFORM_LEN]));
    }

    #[test]
    fn mask_tracks_enabled_slots() {
        let mut grid = WavetableGrid::new();
        grid.set(0, Waveform::sine());
        grid.set(15, Waveform::silence());
        assert_eq!(grid.enabled_indices(), vec![0, 15]);
        assert_eq!(grid.enabled_mask(), 0b1000_0000_0000_0001);
    }

    #[test]
    fn blend_endpoints_match_inputs() {
        let a = Waveform::sine();
        let b = Waveform::silence();
        assert_eq!(a.blend(&b, 0.0), a);
        assert_eq!(a.blend(&b, 1.0), b);
        let half = a.blend(&b, 0.5);
        assert_eq!(half.samples()[32], a.samples()[32] * 0.5);
    }

    #[test]
    fn sine_starts_at_zero_and_peaks_at_quarter() {
        let sine = Waveform::sine();
        assert_eq!(sine.samples()[0], 0.0);
        assert!((sine.samples()[WAVEFORM_LEN / 4] - 1.0).abs() < 1e-6);
    }
}
