use std::path::PathBuf;

/// Errors raised while turning a multi-cycle wave into cycles and presets
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("unsupported wave format in {path}: {detail}")]
    UnsupportedFormat { path: PathBuf, detail: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A logic defect, never bad input: the distributor and morpher disagree
    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("malformed preset: {0}")]
    PresetFormat(String),

    #[error("mapping table line {line}: {detail}")]
    Mapping { line: usize, detail: String },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
