use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ConvertError, Result};

const SINGLE_WAV_KEY: &str = "SingleWAV=";

fn single_wav_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^SingleWAV=([0-9]+)$").unwrap_or_else(|e| panic!("bad SingleWAV pattern: {e}"))
    })
}

/// Cycle length declared by a `wtinfo.txt` sidecar, if any.
///
/// Only the first `SingleWAV=` line counts; a malformed or zero value on it
/// means the table has no usable cycle length.
pub fn parse_cycle_length(text: &str) -> Option<usize> {
    let line = text
        .lines()
        .filter(|l| !l.is_empty())
        .find(|l| l.starts_with(SINGLE_WAV_KEY))?;

    let caps = single_wav_pattern().captures(line)?;
    let length: usize = caps[1].parse().ok()?;
    (length > 0).then_some(length)
}

pub fn read_cycle_length(path: &Path) -> Result<Option<usize>> {
    let bytes = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    // sidecars come from a windows tool, don't insist on utf-8
    Ok(parse_cycle_length(&String::from_utf8_lossy(&bytes)))
}
