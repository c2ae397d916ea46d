//! The unified record stream over one input file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::array::JsonArrayDecoder;
use crate::error::{DecodeError, IngestError, Result};
use crate::ndjson::NdjsonDecoder;
use crate::single::SingleObjectDecoder;
use crate::sniff::{InputFormat, detect_format};

/// A lazy, finite, non-restartable sequence of raw records from one file.
///
/// Sniffs the format and delegates to the matching decoder; callers iterate
/// without caring which shape the file had.
pub enum RecordStream {
    NdJson(NdjsonDecoder<BufReader<File>>),
    JsonArray(JsonArrayDecoder<BufReader<File>>),
    SingleObject(SingleObjectDecoder),
}

impl RecordStream {
    /// Sniffs `path` and opens the matching decoder.
    pub fn open(path: &Path) -> Result<Self> {
        let format = detect_format(path);
        debug!(path = %path.display(), format = format.label(), "opening input file");
        let file = File::open(path).map_err(|source| IngestError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(match format {
            InputFormat::NdJson => Self::NdJson(NdjsonDecoder::new(BufReader::new(file))),
            InputFormat::JsonArray => Self::JsonArray(JsonArrayDecoder::new(BufReader::new(file))),
            InputFormat::SingleObject => Self::SingleObject(SingleObjectDecoder::new(file)),
        })
    }

    /// The sniffed format backing this stream.
    pub fn format(&self) -> InputFormat {
        match self {
            Self::NdJson(_) => InputFormat::NdJson,
            Self::JsonArray(_) => InputFormat::JsonArray,
            Self::SingleObject(_) => InputFormat::SingleObject,
        }
    }
}

impl Iterator for RecordStream {
    type Item = std::result::Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::NdJson(decoder) => decoder.next(),
            Self::JsonArray(decoder) => decoder.next(),
            Self::SingleObject(decoder) => decoder.next(),
        }
    }
}
