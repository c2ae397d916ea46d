use std::path::PathBuf;

use trials_ingest::InputFormat;

/// Outcome of a full build run.
#[derive(Debug)]
pub struct BuildResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub files: Vec<FileSummary>,
    pub index_path: PathBuf,
    pub facets_path: PathBuf,
    pub entry_count: usize,
    pub facet_count: usize,
    /// Recovered file- and record-level failures, in encounter order.
    pub errors: Vec<String>,
}

/// Per-file processing counts.
#[derive(Debug)]
pub struct FileSummary {
    pub path: PathBuf,
    /// Sniffed format; absent when the file could not be opened.
    pub format: Option<InputFormat>,
    pub indexed: usize,
    pub dropped: usize,
    pub record_errors: usize,
}
