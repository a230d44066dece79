// Zebra 2 style oscillator preset text.
//
// The file is a comment meta block, a short header naming the OSC1 section
// and its enabled mask, then one line per slot:
//
//   Wv<n>=<flag>:<s0>,<s1>,...,<s127>
//
// n counts from 1, flag is 0 or 1 and must agree with bit n-1 of WMask.
// Samples are printed with the shortest text that parses back to the same
// f32, so a parse of our own output gives the grid back bit for bit.

use std::fmt::Write as _;

use crate::error::{ConvertError, Result};
use crate::shared::{NUM_SLOTS, WAVEFORM_LEN};
use crate::wavetable::{Slot, Waveform, WavetableGrid};

const HEADER_MAGIC: &str = "#AM=Zebra2";
const VERSION_LINE: &str = "#Vers=20000";
const SECTION_LINE: &str = "#cm=OSC1";
const WAVE_MODE_LINE: &str = "Wave=2";
const MASK_KEY: &str = "WMask=";
const TABLE_MARKER: &str = "$$$$wavetable";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresetMeta {
    pub bank: String,
    pub author: String,
    pub description: String,
}

impl PresetMeta {
    pub fn new(bank: &str, author: &str, description: &str) -> Self {
        Self {
            bank: bank.to_string(),
            author: author.to_string(),
            description: description.to_string(),
        }
    }
}

// the meta block is single-quoted text, so quotes and newlines can't survive
fn meta_text(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\'' || c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

/// Encode a grid. Disabled slots are written as silence so the table is
/// always 16 x 128.
pub fn serialize(grid: &WavetableGrid, meta: &PresetMeta) -> Vec<u8> {
    let mut out = String::with_capacity(NUM_SLOTS * WAVEFORM_LEN * 12);

    out.push_str("/*@Meta\n");
    let _ = writeln!(out, "Bank:\n'{}'", meta_text(&meta.bank));
    let _ = writeln!(out, "Author:\n'{}'", meta_text(&meta.author));
    let _ = writeln!(out, "Description:\n'{}'", meta_text(&meta.description));
    out.push_str("*/\n\n");

    out.push_str(HEADER_MAGIC);
    out.push('\n');
    out.push_str(VERSION_LINE);
    out.push_str("\n#Endian=little\n");
    out.push_str(SECTION_LINE);
    out.push('\n');
    out.push_str(WAVE_MODE_LINE);
    out.push('\n');
    let _ = writeln!(out, "{MASK_KEY}{}", grid.enabled_mask());
    out.push_str(TABLE_MARKER);
    out.push('\n');

    for (i, slot) in grid.slots.iter().enumerate() {
        let _ = write!(out, "Wv{}={}:", i + 1, u8::from(slot.enabled));
        for (j, s) in slot.samples().iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            let _ = write!(out, "{s}");
        }
        out.push('\n');
    }

    out.into_bytes()
}

/// Read back a preset written by `serialize`.
///
/// Enabled slots come back with their samples; disabled slots come back empty,
/// matching the sound grid they were written from.
pub fn parse(bytes: &[u8]) -> Result<WavetableGrid> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ConvertError::PresetFormat(format!("not utf-8: {e}")))?;

    let mut lines = text.lines().map(str::trim);
    if !lines.any(|l| l == HEADER_MAGIC) {
        return Err(ConvertError::PresetFormat("missing Zebra2 header".into()));
    }

    let mut mask: Option<u16> = None;
    for line in lines.by_ref() {
        if let Some(v) = line.strip_prefix(MASK_KEY) {
            mask = Some(v.parse().map_err(|_| {
                ConvertError::PresetFormat(format!("bad wave mask '{v}'"))
            })?);
        } else if line == TABLE_MARKER {
            break;
        }
    }
    let mask = mask.ok_or_else(|| ConvertError::PresetFormat("missing wave mask".into()))?;

    let mut grid = WavetableGrid::new();
    let mut seen = 0usize;
    for line in lines.filter(|l| !l.is_empty()) {
        if seen == NUM_SLOTS {
            return Err(ConvertError::PresetFormat("more than 16 wave lines".into()));
        }
        let (index, enabled, samples) = parse_wave_line(line)?;
        if index != seen {
            return Err(ConvertError::PresetFormat(format!(
                "expected Wv{} but found Wv{}",
                seen + 1,
                index + 1
            )));
        }
        if enabled != (mask & (1 << index) != 0) {
            return Err(ConvertError::PresetFormat(format!(
                "Wv{} flag disagrees with wave mask",
                index + 1
            )));
        }
        if enabled {
            grid.slots[index] = Slot::filled(Waveform::new(samples));
        }
        seen += 1;
    }
    if seen != NUM_SLOTS {
        return Err(ConvertError::PresetFormat(format!("found {seen} of 16 wave lines")));
    }

    Ok(grid)
}

fn parse_wave_line(line: &str) -> Result<(usize, bool, [f32; WAVEFORM_LEN])> {
    let bad = |what: &str| ConvertError::PresetFormat(format!("{what} in '{}'", truncate(line)));

    let rest = line.strip_prefix("Wv").ok_or_else(|| bad("expected wave line"))?;
    let (number, rest) = rest.split_once('=').ok_or_else(|| bad("missing '='"))?;
    let number: usize = number.parse().map_err(|_| bad("bad slot number"))?;
    if !(1..=NUM_SLOTS).contains(&number) {
        return Err(bad("slot number out of range"));
    }
    let (flag, values) = rest.split_once(':').ok_or_else(|| bad("missing ':'"))?;
    let enabled = match flag {
        "0" => false,
        "1" => true,
        _ => return Err(bad("bad enabled flag")),
    };

    let mut samples = [0.0f32; WAVEFORM_LEN];
    let mut count = 0usize;
    for value in values.split(',') {
        if count == WAVEFORM_LEN {
            return Err(bad("too many samples"));
        }
        samples[count] = value.trim().parse().map_err(|_| bad("bad sample value"))?;
        count += 1;
    }
    if count != WAVEFORM_LEN {
        return Err(bad("too few samples"));
    }

    Ok((number - 1, enabled, samples))
}

fn truncate(line: &str) -> &str {
    match line.char_indices().nth(24) {
        Some((i, _)) => &line[..i],
        None => line,
    }
}
