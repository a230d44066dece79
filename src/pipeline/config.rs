// Conversion settings. Everything has a default; a JSON file can override any
// subset of the fields and the command line overrides the file.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::wavetable::NeutralWaveform;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub write_single_cycles: bool,
    pub write_presets: bool,
    pub parallel: bool, // one rayon task per wave file

    // far end of the morph when a file holds a single cycle
    pub neutral_waveform: NeutralWaveform,

    pub preset_extension: String,
    pub single_cycle_dir: String,
    pub preset_dir: String,

    // layout of the extracted synth content
    pub wavetable_subdir: String,
    pub metadata_file_name: String,
    pub mapping_file: String,

    pub author: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            write_single_cycles: true,
            write_presets: true,
            parallel: true,
            neutral_waveform: NeutralWaveform::Sine,
            preset_extension: "h2p".to_string(),
            single_cycle_dir: "Single Cycle Waveforms".to_string(),
            preset_dir: "Zebra2 Wavetables".to_string(),
            wavetable_subdir: "wt".to_string(),
            metadata_file_name: "wtinfo.txt".to_string(),
            mapping_file: "massive_map.csv".to_string(),
            author: "wavecycle".to_string(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<ConversionConfig> {
    let data = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    serde_json::from_str(&data).map_err(|source| ConvertError::Config {
        path: path.to_path_buf(),
        source,
    })
}

// Write the config as pretty JSON, making the parent directory if needed
pub fn save_config(path: &Path, config: &ConversionConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "parallel": false, "neutral_waveform": "flat" }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.parallel);
        assert_eq!(config.neutral_waveform, NeutralWaveform::Flat);
        assert_eq!(config.preset_extension, "h2p");
        assert_eq!(config.metadata_file_name, "wtinfo.txt");
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = ConversionConfig {
            author: "someone".to_string(),
            write_single_cycles: false,
            ..ConversionConfig::default()
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config(&path), Err(ConvertError::Config { .. })));
    }
}
