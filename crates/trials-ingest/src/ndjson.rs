//! Newline-delimited JSON decoding.

use std::io::{BufRead, Lines};

use serde_json::Value;

use crate::error::DecodeError;

/// Line-by-line decoder for NDJSON/JSONL input.
///
/// Blank lines are skipped. Each remaining line parses independently, so one
/// malformed line yields a recoverable [`DecodeError::Line`] and decoding
/// continues; only an I/O failure ends the stream early.
pub struct NdjsonDecoder<R> {
    lines: Lines<R>,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> NdjsonDecoder<R> {
    /// Wraps a buffered reader positioned at the start of the document.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for NdjsonDecoder<R> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    self.done = true;
                    return Some(Err(DecodeError::Io { source }));
                }
            };
            self.line_number += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let line_number = self.line_number;
            return Some(
                serde_json::from_str(trimmed)
                    .map_err(|source| DecodeError::Line {
                        line: line_number,
                        source,
                    }),
            );
        }
    }
}
