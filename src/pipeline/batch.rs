// Drive a whole extracted content directory through the converter.
//
// Every wave file is an independent job. A job that fails is logged with its
// path and counted; it never stops the files around it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use super::config::ConversionConfig;
use super::convert::{Converter, JobOutcome};
use crate::audio::AudioCodec;
use crate::error::Result;
use crate::loader::{find_wave_sources, MappingTable, WaveSource};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub truncated_files: usize,
    pub single_cycle_files: usize,
    pub presets: usize,
}

impl BatchSummary {
    fn record(&mut self, path: &Path, result: Result<JobOutcome>) {
        match result {
            Ok(JobOutcome::Converted(report)) => {
                self.converted += 1;
                self.single_cycle_files += report.single_cycle_files.len();
                self.presets += report.presets.len();
                if report.truncated > 0 {
                    self.truncated_files += 1;
                }
            }
            Ok(JobOutcome::Skipped(reason)) => {
                log::debug!("skipping {}: {reason}", path.display());
                self.skipped += 1;
            }
            Err(e) => {
                log::error!("failed to convert {}: {e}", path.display());
                self.failed += 1;
            }
        }
    }
}

pub struct BatchInput<'a> {
    pub input_dir: &'a Path,
    pub output_dir: &'a Path,
    pub mapping: &'a MappingTable,
    pub config: &'a ConversionConfig,
}

/// Convert every wave table found under `<input>/<wavetable_subdir>`.
///
/// Returns an error only when the tables directory itself is missing; per
/// file problems end up in the summary.
pub fn convert_directory(input: &BatchInput, codec: &dyn AudioCodec) -> anyhow::Result<BatchSummary> {
    let tables_dir = input.input_dir.join(&input.config.wavetable_subdir);
    anyhow::ensure!(
        tables_dir.is_dir(),
        "extracted wavetable content not found at {}",
        tables_dir.display()
    );
    std::fs::create_dir_all(input.output_dir)
        .with_context(|| format!("could not create {}", input.output_dir.display()))?;

    let sources = find_wave_sources(&tables_dir, &input.config.metadata_file_name);
    log::info!("found {} wave files under {}", sources.len(), tables_dir.display());

    let converter = Converter {
        codec,
        config: input.config,
        mapping: input.mapping,
        input_root: input.input_dir,
        output_root: input.output_dir,
    };
    let results = run_jobs(&converter, &sources, input.config.parallel);

    let mut summary = BatchSummary::default();
    for (path, result) in results {
        summary.record(&path, result);
    }
    log::info!(
        "converted {} files ({} single cycles, {} presets), skipped {}, failed {}",
        summary.converted,
        summary.single_cycle_files,
        summary.presets,
        summary.skipped,
        summary.failed
    );
    if summary.truncated_files > 0 {
        log::warn!("{} files had more waveforms than grid slots", summary.truncated_files);
    }
    Ok(summary)
}

fn run_jobs(
    converter: &Converter,
    sources: &[WaveSource],
    parallel: bool,
) -> Vec<(PathBuf, Result<JobOutcome>)> {
    let job = |source: &WaveSource| (source.wav_path.clone(), converter.convert(source));
    if parallel {
        sources.par_iter().map(job).collect()
    } else {
        sources.iter().map(job).collect()
    }
}
