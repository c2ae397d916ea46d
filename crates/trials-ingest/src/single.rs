//! Single-object document decoding.

use std::io::Read;

use serde_json::Value;

use crate::error::DecodeError;

/// Decoder for a file holding exactly one JSON record.
///
/// The whole document is parsed in one step; there is no partial recovery
/// for a malformed single object, so a parse failure is the file's only
/// (fatal) yield.
pub struct SingleObjectDecoder {
    pending: Option<Result<Value, DecodeError>>,
}

impl SingleObjectDecoder {
    /// Reads and parses the full document from `reader`.
    pub fn new<R: Read>(mut reader: R) -> Self {
        let mut text = String::new();
        let pending = match reader.read_to_string(&mut text) {
            Ok(_) => serde_json::from_str(&text)
                .map_err(|source| DecodeError::Document { source }),
            Err(source) => Err(DecodeError::Io { source }),
        };
        Self {
            pending: Some(pending),
        }
    }
}

impl Iterator for SingleObjectDecoder {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_exactly_one_record() {
        let mut decoder = SingleObjectDecoder::new("{\"a\": 1}".as_bytes());
        let record = decoder.next().unwrap().unwrap();
        assert_eq!(record["a"], 1);
        assert!(decoder.next().is_none());
    }

    #[test]
    fn malformed_document_is_fatal() {
        let mut decoder = SingleObjectDecoder::new("{\"a\":".as_bytes());
        match decoder.next().unwrap() {
            Err(error @ DecodeError::Document { .. }) => assert!(error.is_fatal()),
            other => panic!("expected document error, got {other:?}"),
        }
        assert!(decoder.next().is_none());
    }
}
