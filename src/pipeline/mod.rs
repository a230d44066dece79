pub mod batch;
pub mod config;
pub mod convert;
pub mod preset;

pub use batch::{convert_directory, BatchInput, BatchSummary};
pub use config::{load_config, save_config, ConversionConfig};
