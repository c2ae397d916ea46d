//! Input file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// File suffixes treated as registry input candidates.
pub const RECOGNIZED_SUFFIXES: [&str; 3] = ["json", "ndjson", "jsonl"];

/// Lists candidate input files directly inside a directory.
///
/// Returns regular files with a recognized suffix, sorted by filename.
/// Subdirectories are not walked. A missing input directory is the one
/// run-aborting condition.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let recognized = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                RECOGNIZED_SUFFIXES
                    .iter()
                    .any(|suffix| ext.eq_ignore_ascii_case(suffix))
            })
            .unwrap_or(false);

        if recognized {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
