pub mod mapping;
pub mod metadata;
pub mod scan;

pub use mapping::{key_for, MappingEntry, MappingTable};
pub use metadata::{parse_cycle_length, read_cycle_length};
pub use scan::{find_wave_sources, WaveSource};
