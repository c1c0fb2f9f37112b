use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::FormatError;
use crate::library::{Track, renumber};

use super::read_file;

/// Tracks merged from several playlist files, plus the files that failed.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub tracks: Vec<Track>,
    pub failures: Vec<(PathBuf, FormatError)>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Read and merge every playlist in `paths`, in order.
///
/// Each track records the index of the file it came from in `source_id`. A file
/// that cannot be read or parsed is logged and recorded; the rest still load.
pub fn import_all<P: AsRef<Path>>(paths: &[P]) -> ImportReport {
    let mut report = ImportReport::default();

    for (source_id, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        match read_file(path) {
            Ok(doc) => {
                info!(path = %path.display(), tracks = doc.tracks.len(), "imported playlist");
                report.tracks.extend(doc.tracks.into_iter().map(|mut t| {
                    t.source_id = Some(source_id);
                    t
                }));
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping playlist");
                report.failures.push((path.to_path_buf(), err));
            }
        }
    }

    renumber(&mut report.tracks);
    report
}
