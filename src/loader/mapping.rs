// Lookup from an extracted wave file to the name it should be published under.
//
// massive_map.csv rows look like
//
//   wt/Analog/Saw.wav;Analog;1;Saw I
//
// (source path relative to the input root, group, index inside the group,
// corrected file name). Either ',' or ';' separates fields.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConvertError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingEntry {
    pub source_key: String,
    pub group_name: String,
    pub group_index: u32,
    pub correct_file_name: String,
}

impl MappingEntry {
    // entries with a blank group or name exist in the table but are never converted
    pub fn is_usable(&self) -> bool {
        !self.group_name.is_empty() && !self.correct_file_name.is_empty()
    }

    // "{index}_{name}", the stem shared by every output file of this entry
    pub fn output_stem(&self) -> String {
        format!("{}_{}", self.group_index, self.correct_file_name)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MappingTable {
    entries: HashMap<String, MappingEntry>,
}

// both slash directions normalize to '/' so keys match on any platform
pub fn normalize_key(key: &str) -> String {
    key.trim().replace('\\', "/").trim_start_matches("./").to_string()
}

// Map key of a wave file: its path below the input root, '/'-joined
pub fn key_for(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
        .trim()
}

impl MappingTable {
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        let mut first_record = true;

        for (n, raw) in text.lines().enumerate() {
            let line_no = n + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let delimiter = if line.contains(';') { ';' } else { ',' };
            let fields: Vec<&str> = line.split(delimiter).map(unquote).collect();
            if fields.len() < 4 {
                return Err(ConvertError::Mapping {
                    line: line_no,
                    detail: format!("expected 4 fields, found {}", fields.len()),
                });
            }

            let group_index = match fields[2].parse::<u32>() {
                Ok(i) => i,
                Err(_) if first_record => {
                    first_record = false;
                    log::debug!("mapping table: treating line {line_no} as a header");
                    continue;
                }
                Err(_) => {
                    return Err(ConvertError::Mapping {
                        line: line_no,
                        detail: format!("group index '{}' is not a number", fields[2]),
                    });
                }
            };
            first_record = false;

            let entry = MappingEntry {
                source_key: normalize_key(fields[0]),
                group_name: fields[1].to_string(),
                group_index,
                correct_file_name: fields[3].to_string(),
            };
            if let Some(previous) = entries.insert(entry.source_key.clone(), entry) {
                log::warn!("mapping table: line {line_no} replaces entry for {}", previous.source_key);
            }
        }

        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
        Self::parse(&String::from_utf8_lossy(&bytes))
    }

    pub fn get(&self, key: &str) -> Option<&MappingEntry> {
        self.entries.get(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TABLE: &str = "\
source,group,index,name
wt\\Analog\\Saw.wav;Analog;1;Saw I
# retired tables
wt/Digital/Buzz.wav, Digital , 12 , \"Buzz Pulse\"
wt/Unused/Hole.wav;;3;
";

    #[test]
    fn parses_rows_with_either_delimiter() {
        let table = MappingTable::parse(TABLE).unwrap();
        assert_eq!(table.len(), 3);

        let saw = table.get("wt/Analog/Saw.wav").unwrap();
        assert_eq!(saw.group_name, "Analog");
        assert_eq!(saw.group_index, 1);
        assert_eq!(saw.correct_file_name, "Saw I");
        assert_eq!(saw.output_stem(), "1_Saw I");

        let buzz = table.get("wt\\Digital\\Buzz.wav").unwrap();
        assert_eq!(buzz.group_name, "Digital");
        assert_eq!(buzz.correct_file_name, "Buzz Pulse");
    }

    #[test]
    fn blank_names_are_kept_but_unusable() {
        let table = MappingTable::parse(TABLE).unwrap();
        assert!(!table.get("wt/Unused/Hole.wav").unwrap().is_usable());
        assert!(table.get("wt/Analog/Saw.wav").unwrap().is_usable());
    }

    #[test]
    fn bad_index_after_header_is_an_error() {
        let text = "wt/a.wav;A;1;a\nwt/b.wav;B;x;b\n";
        let err = MappingTable::parse(text).unwrap_err();
        assert!(matches!(err, ConvertError::Mapping { line: 2, .. }));
    }

    #[test]
    fn short_rows_are_an_error() {
        assert!(matches!(
            MappingTable::parse("wt/a.wav;A;1\n"),
            Err(ConvertError::Mapping { line: 1, .. })
        ));
    }

    #[test]
    fn key_is_relative_and_slash_joined() {
        let root = PathBuf::from("/data/massive");
        let path = root.join("wt").join("Analog").join("Saw.wav");
        assert_eq!(key_for(&path, &root).as_deref(), Some("wt/Analog/Saw.wav"));
        assert_eq!(key_for(Path::new("/elsewhere/x.wav"), &root), None);
    }
}
