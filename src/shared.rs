// Grid geometry shared by the wavetable, preset and pipeline layers.
//
//   slot:      0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15
//   8 waves:   X   -   X   -   X   -   X   -   -   X   -   X   -   X   -   X
//
// Every slot holds WAVEFORM_LEN samples once a grid is morphed; the sound grid
// leaves non-anchor slots empty and they are written out as silence.

pub const NUM_SLOTS: usize = 16;
pub const WAVEFORM_LEN: usize = 128;

// Characters no common filesystem accepts in a file or directory name
const INVALID_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

// Replace anything a filesystem would reject with '_' so group and file names
// taken from the mapping table are safe to use as path components.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_control() || INVALID_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    // windows refuses trailing dots and spaces
    let trimmed = cleaned.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
