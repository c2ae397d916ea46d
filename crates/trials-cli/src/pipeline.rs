//! Build pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Discover**: List candidate input files in the input directory
//! 2. **Process**: Decode each file, transform each record, write details
//! 3. **Finalize**: Sort and write the index and facet artifacts
//!
//! Within a file each record is fully processed - including its detail
//! write - before the next record is decoded, so peak memory stays at one
//! raw record plus the in-memory index and facet accumulators.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use trials_ingest::{RecordStream, list_input_files};
use trials_output::{EmitOutcome, OutputSink, finalize};

use crate::types::{BuildResult, FileSummary};

// ============================================================================
// Stage 1: Discover
// ============================================================================

/// List candidate input files. A missing input directory is the run's one
/// fatal precondition.
pub fn discover(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let files = list_input_files(input_dir).context("discover input files")?;
    if files.is_empty() {
        warn!(
            input_dir = %input_dir.display(),
            "no .json/.ndjson/.jsonl files in input directory"
        );
    }
    Ok(files)
}

// ============================================================================
// Stage 2: Process
// ============================================================================

/// Result of processing a single input file.
#[derive(Debug)]
pub struct ProcessedFile {
    pub summary: FileSummary,
    /// Recovered failures attributed to this file.
    pub errors: Vec<String>,
}

/// Stream one input file through the sink.
///
/// Record-level failures (a bad array element or NDJSON line, a failed
/// emit) are counted and skipped; a fatal decode failure abandons the rest
/// of this file only. Nothing here is retried - the input is static, so a
/// second attempt cannot change the outcome.
pub fn process_file(path: &Path, sink: &mut OutputSink) -> ProcessedFile {
    let file_span = info_span!("process_file", file = %path.display());
    let _file_guard = file_span.enter();
    let file_start = Instant::now();

    let mut summary = FileSummary {
        path: path.to_path_buf(),
        format: None,
        indexed: 0,
        dropped: 0,
        record_errors: 0,
    };
    let mut errors = Vec::new();

    let stream = match RecordStream::open(path) {
        Ok(stream) => stream,
        Err(error) => {
            warn!(file = %path.display(), %error, "file skipped");
            errors.push(format!("{}: {error}", path.display()));
            return ProcessedFile { summary, errors };
        }
    };
    summary.format = Some(stream.format());

    for item in stream {
        match item {
            Ok(record) => match sink.emit(&record) {
                Ok(EmitOutcome::Indexed { id }) => {
                    summary.indexed += 1;
                    tracing::trace!(%id, "record indexed");
                }
                Ok(EmitOutcome::Dropped) => summary.dropped += 1,
                Err(error) => {
                    summary.record_errors += 1;
                    warn!(file = %path.display(), %error, "record skipped");
                    errors.push(format!("{}: {error}", path.display()));
                }
            },
            Err(error) if error.is_fatal() => {
                warn!(file = %path.display(), %error, "file abandoned");
                errors.push(format!("{}: {error}", path.display()));
                break;
            }
            Err(error) => {
                summary.record_errors += 1;
                warn!(file = %path.display(), %error, "record skipped");
                errors.push(format!("{}: {error}", path.display()));
            }
        }
    }

    debug!(
        file = %path.display(),
        format = summary.format.map(|f| f.label()).unwrap_or("unknown"),
        indexed = summary.indexed,
        dropped = summary.dropped,
        record_errors = summary.record_errors,
        duration_ms = file_start.elapsed().as_millis(),
        "file processed"
    );

    ProcessedFile { summary, errors }
}

// ============================================================================
// Stage 3: Finalize (delegated to trials-output) and orchestration
// ============================================================================

/// Run the full build: discover, process every file, finalize artifacts.
pub fn run_build(input_dir: &Path, output_dir: &Path) -> Result<BuildResult> {
    let build_span = info_span!(
        "build",
        input_dir = %input_dir.display(),
        output_dir = %output_dir.display()
    );
    let _build_guard = build_span.enter();

    let discover_start = Instant::now();
    let paths = discover(input_dir)?;
    info!(
        file_count = paths.len(),
        duration_ms = discover_start.elapsed().as_millis(),
        "discover complete"
    );

    let process_start = Instant::now();
    let mut sink = OutputSink::new(output_dir);
    let mut files = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();
    for path in &paths {
        let processed = process_file(path, &mut sink);
        errors.extend(processed.errors);
        files.push(processed.summary);
    }
    info!(
        file_count = files.len(),
        entry_count = sink.entry_count(),
        facet_count = sink.facet_count(),
        error_count = errors.len(),
        duration_ms = process_start.elapsed().as_millis(),
        "process complete"
    );

    let finalize_start = Instant::now();
    let (entries, facets) = sink.into_parts();
    let report = finalize(output_dir, entries, &facets).context("finalize artifacts")?;
    info!(
        index = %report.index_path.display(),
        facets = %report.facets_path.display(),
        entry_count = report.entry_count,
        facet_count = report.facet_count,
        duration_ms = finalize_start.elapsed().as_millis(),
        "finalize complete"
    );

    Ok(BuildResult {
        input_dir: input_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        files,
        index_path: report.index_path,
        facets_path: report.facets_path,
        entry_count: report.entry_count,
        facet_count: report.facet_count,
        errors,
    })
}
