//! wavecycle - split multi-cycle wavetable exports into single cycle waves
//! and 16 slot Zebra 2 oscillator presets.
//!
//! ```bash
//! wavecycle <extracted-content> <output-dir>
//! RUST_LOG=debug wavecycle ./massive ./converted --sequential
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use wavecycle::audio::WavCodec;
use wavecycle::loader::MappingTable;
use wavecycle::pipeline::{self, BatchInput, ConversionConfig};

/// Convert wavetable exports into single cycle waveforms and Zebra 2 wavetables
#[derive(Parser, Debug)]
#[command(name = "wavecycle")]
#[command(version)]
struct Cli {
    /// Extracted synth content (must contain the wavetable directory, `wt` by default)
    input: PathBuf,

    /// Where the single cycle waves and presets are written
    output: PathBuf,

    /// Mapping table CSV (defaults to the configured mapping file)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// JSON file overriding conversion settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to this JSON file and continue
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Convert one file at a time
    #[arg(long)]
    sequential: bool,

    /// Don't write single cycle wave files
    #[arg(long)]
    no_single_cycles: bool,

    /// Don't write presets
    #[arg(long)]
    no_presets: bool,
}

impl Cli {
    fn conversion_config(&self) -> anyhow::Result<ConversionConfig> {
        let mut config = match &self.config {
            Some(path) => pipeline::load_config(path)?,
            None => ConversionConfig::default(),
        };
        if self.sequential {
            config.parallel = false;
        }
        if self.no_single_cycles {
            config.write_single_cycles = false;
        }
        if self.no_presets {
            config.write_presets = false;
        }
        Ok(config)
    }
}

fn main() {
    // set RUST_LOG=debug to see skipped files
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.conversion_config()?;
    if let Some(path) = &cli.write_config {
        pipeline::save_config(path, &config)
            .with_context(|| format!("could not write config to {}", path.display()))?;
    }

    let mapping_path = cli
        .mapping
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.mapping_file));
    let mapping = MappingTable::load(&mapping_path)
        .with_context(|| format!("could not read mapping table {}", mapping_path.display()))?;
    log::info!("loaded {} mapping entries from {}", mapping.len(), mapping_path.display());
    if mapping.is_empty() {
        log::warn!("mapping table is empty, every wave will be skipped");
    }

    let codec = WavCodec;
    let batch = BatchInput {
        input_dir: &cli.input,
        output_dir: &cli.output,
        mapping: &mapping,
        config: &config,
    };
    let summary = pipeline::convert_directory(&batch, &codec)?;
    if summary.failed > 0 {
        log::warn!("{} files could not be converted, see errors above", summary.failed);
    }
    Ok(())
}
