use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::metadata::read_cycle_length;

/// One wave file together with the cycle length its sidecar declares
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveSource {
    pub wav_path: PathBuf,
    pub cycle_length: Option<usize>, // None: no usable SingleWAV= entry
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}

// Files below `dir` (recursively) accepted by `keep`, in a stable order
fn files_under(dir: &Path, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && keep(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Find every metadata sidecar under `tables_dir` and pair its cycle length
/// with the wave files next to (or below) it.
///
/// Each directory is expected to hold a single wave; more than one is still
/// returned, but logged, since the sidecar can only describe one of them.
pub fn find_wave_sources(tables_dir: &Path, metadata_file_name: &str) -> Vec<WaveSource> {
    let sidecars = files_under(tables_dir, |p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case(metadata_file_name))
    });

    let mut sources = Vec::new();
    for sidecar in sidecars {
        let cycle_length = match read_cycle_length(&sidecar) {
            Ok(length) => length,
            Err(e) => {
                log::warn!("{e}");
                None
            }
        };
        let Some(dir) = sidecar.parent() else {
            continue;
        };

        let wavs = files_under(dir, is_wav);
        if wavs.len() > 1 {
            log::warn!(
                "{} holds {} wave files, expected one per table",
                dir.display(),
                wavs.len()
            );
        }
        sources.extend(wavs.into_iter().map(|wav_path| WaveSource { wav_path, cycle_length }));
    }
    sources
}
