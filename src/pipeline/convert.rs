// One wave file in, single cycle waves and two presets out.

use std::fmt;
use std::path::{Path, PathBuf};

use super::config::ConversionConfig;
use super::preset::{serialize, PresetMeta};
use crate::audio::{split_cycles, to_waveform, AudioCodec, Cycle, WavFormat};
use crate::error::{ConvertError, Result};
use crate::loader::{key_for, MappingEntry, MappingTable, WaveSource};
use crate::shared::{sanitize_file_name, NUM_SLOTS};
use crate::wavetable::{distribute, try_morph, Distribution, NeutralWaveform, Waveform, WavetableGrid};

// Why a file was passed over. None of these are failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoCycleLength,
    NotMapped(String),
    UnnamedEntry(String),
    TooShort { samples: usize, cycle_length: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCycleLength => write!(f, "no usable cycle length"),
            SkipReason::NotMapped(key) => write!(f, "no mapping entry for {key}"),
            SkipReason::UnnamedEntry(key) => write!(f, "mapping entry for {key} has no group or file name"),
            SkipReason::TooShort { samples, cycle_length } => {
                write!(f, "{samples} samples is shorter than one {cycle_length} sample cycle")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionReport {
    pub cycles: usize,
    pub truncated: usize, // cycles that didn't fit in the grid
    pub single_cycle_files: Vec<PathBuf>,
    pub presets: Vec<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum JobOutcome {
    Converted(ConversionReport),
    Skipped(SkipReason),
}

/// The two grids made from one file's waveforms
#[derive(Clone, Debug)]
pub struct Grids {
    pub distribution: Distribution,
    pub sound: WavetableGrid, // only real waveforms, the rest silent
    pub morph: WavetableGrid, // every slot filled
}

/// Place canonical waveforms on the grid and morph the gaps.
///
/// Waveforms past the sixteenth are left out and counted in
/// `distribution.truncated`. A lone waveform gets `neutral` in the last slot of
/// the morph grid so the sweep has somewhere to go.
pub fn build_grids(waveforms: &[Waveform], neutral: NeutralWaveform) -> Result<Grids> {
    let distribution = distribute(waveforms.len(), NUM_SLOTS);

    let mut sound = WavetableGrid::new();
    for (&slot, wave) in distribution.anchors.iter().zip(waveforms) {
        sound.set(slot, wave.clone());
    }

    let mut morph_source = sound.clone();
    if waveforms.len() == 1 {
        morph_source.set(NUM_SLOTS - 1, neutral.waveform());
    }
    let morph = try_morph(&morph_source)?;

    Ok(Grids { distribution, sound, morph })
}

/// Everything a conversion needs besides the file itself
pub struct Converter<'a> {
    pub codec: &'a dyn AudioCodec,
    pub config: &'a ConversionConfig,
    pub mapping: &'a MappingTable,
    pub input_root: &'a Path,
    pub output_root: &'a Path,
}

impl Converter<'_> {
    pub fn convert(&self, source: &WaveSource) -> Result<JobOutcome> {
        let Some(cycle_length) = source.cycle_length else {
            return Ok(JobOutcome::Skipped(SkipReason::NoCycleLength));
        };

        let key = key_for(&source.wav_path, self.input_root)
            .unwrap_or_else(|| source.wav_path.to_string_lossy().into_owned());
        let Some(entry) = self.mapping.get(&key) else {
            return Ok(JobOutcome::Skipped(SkipReason::NotMapped(key)));
        };
        if !entry.is_usable() {
            return Ok(JobOutcome::Skipped(SkipReason::UnnamedEntry(key)));
        }

        let buffer = self.codec.decode(&source.wav_path)?;
        let cycles = split_cycles(&buffer.samples, cycle_length);
        if cycles.is_empty() {
            return Ok(JobOutcome::Skipped(SkipReason::TooShort {
                samples: buffer.len(),
                cycle_length,
            }));
        }

        let mut report = ConversionReport {
            cycles: cycles.len(),
            ..ConversionReport::default()
        };

        if self.config.write_single_cycles {
            report.single_cycle_files = self.write_single_cycles(entry, &cycles, &buffer.format)?;
        }

        if self.config.write_presets {
            let waveforms: Vec<Waveform> = cycles.iter().map(to_waveform).collect();
            let grids = build_grids(&waveforms, self.config.neutral_waveform)?;
            report.truncated = grids.distribution.truncated;
            if report.truncated > 0 {
                log::warn!(
                    "{}: {} waveforms found, only {} fit the grid; dropping {}",
                    source.wav_path.display(),
                    waveforms.len(),
                    NUM_SLOTS,
                    report.truncated
                );
            }
            report.presets = self.write_presets(entry, &grids)?;
        }

        Ok(JobOutcome::Converted(report))
    }

    // <out>/<dir>/<group>, created if absent; safe to race from several jobs
    fn group_dir(&self, dir_name: &str, entry: &MappingEntry) -> Result<PathBuf> {
        let dir = self
            .output_root
            .join(dir_name)
            .join(sanitize_file_name(&entry.group_name));
        std::fs::create_dir_all(&dir).map_err(|e| ConvertError::io(&dir, e))?;
        Ok(dir)
    }

    fn write_single_cycles(
        &self,
        entry: &MappingEntry,
        cycles: &[Cycle],
        format: &WavFormat,
    ) -> Result<Vec<PathBuf>> {
        let dir = self.group_dir(&self.config.single_cycle_dir, entry)?;
        let stem = entry.output_stem();

        let mut written = Vec::with_capacity(cycles.len());
        for (n, cycle) in cycles.iter().enumerate() {
            let name = sanitize_file_name(&format!("{stem}_{}.wav", n + 1));
            let path = dir.join(name);
            log::info!("Creating file {}", path.display());
            self.codec.encode(&cycle.samples, &path, format)?;
            written.push(path);
        }
        Ok(written)
    }

    fn write_presets(&self, entry: &MappingEntry, grids: &Grids) -> Result<Vec<PathBuf>> {
        let dir = self.group_dir(&self.config.preset_dir, entry)?;
        let stem = entry.output_stem();
        let ext = &self.config.preset_extension;

        let outputs = [
            (format!("{stem}.{ext}"), &grids.sound, stem.clone()),
            (format!("{stem}_Morph.{ext}"), &grids.morph, format!("{stem}_Morph")),
        ];

        let mut written = Vec::with_capacity(outputs.len());
        for (file_name, grid, description) in outputs {
            let path = dir.join(sanitize_file_name(&file_name));
            let meta = PresetMeta::new(&entry.group_name, &self.config.author, &description);
            log::info!("Creating preset {}", path.display());
            std::fs::write(&path, serialize(grid, &meta)).map_err(|e| ConvertError::io(&path, e))?;
            written.push(path);
        }
        Ok(written)
    }
}
