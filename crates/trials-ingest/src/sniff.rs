//! Input format detection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How many leading bytes the sniffer is allowed to read.
pub const SNIFF_PREFIX_BYTES: u64 = 512;

/// The three supported input shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Newline-delimited JSON, one record per line.
    NdJson,
    /// A top-level JSON array of records.
    JsonArray,
    /// One JSON object holding a single record.
    SingleObject,
}

impl InputFormat {
    /// Short label for logs and the run summary.
    pub fn label(self) -> &'static str {
        match self {
            Self::NdJson => "ndjson",
            Self::JsonArray => "array",
            Self::SingleObject => "object",
        }
    }
}

/// Decides the decoding strategy for one input file.
///
/// A line-delimited extension (`.ndjson`/`.jsonl`) wins unconditionally.
/// Otherwise the first non-whitespace byte of a bounded prefix read picks
/// between array and single object. Anything else, including an unreadable
/// or empty file, falls back to NDJSON; that decoder reports real failures
/// per line. Never errors.
pub fn detect_format(path: &Path) -> InputFormat {
    let line_delimited = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ndjson") || ext.eq_ignore_ascii_case("jsonl"))
        .unwrap_or(false);
    if line_delimited {
        return InputFormat::NdJson;
    }

    match leading_byte(path) {
        Some(b'[') => InputFormat::JsonArray,
        Some(b'{') => InputFormat::SingleObject,
        _ => InputFormat::NdJson,
    }
}

/// First non-whitespace byte within the sniff prefix.
fn leading_byte(path: &Path) -> Option<u8> {
    let file = File::open(path).ok()?;
    let mut prefix = Vec::with_capacity(SNIFF_PREFIX_BYTES as usize);
    file.take(SNIFF_PREFIX_BYTES).read_to_end(&mut prefix).ok()?;
    prefix.iter().copied().find(|b| !b.is_ascii_whitespace())
}
