//! Incremental decoding of one top-level JSON array.
//!
//! Registry bulk exports are routinely multi-gigabyte arrays, so the whole
//! document can never be parsed at once. The decoder scans the byte stream
//! element by element: it extracts exactly one balanced value into a reused
//! buffer (tracking container depth and string/escape state) and parses that
//! slice alone. Elements already yielded are never retained, so memory stays
//! bounded by the largest single record.
//!
//! An element whose bytes fail to parse is a recoverable
//! [`DecodeError::Element`]; broken array syntax (a missing separator, EOF
//! inside a value) ends the stream with a fatal
//! [`DecodeError::Structure`].

use std::io::{self, BufRead, ErrorKind};

use serde_json::Value;

use crate::error::DecodeError;

/// Streaming iterator over the elements of a top-level JSON array.
pub struct JsonArrayDecoder<R> {
    reader: R,
    lookahead: Option<u8>,
    state: State,
    /// Fatal separator error held back until the preceding element has been
    /// delivered.
    pending: Option<DecodeError>,
    index: usize,
    buffer: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The opening `[` has not been consumed yet.
    Start,
    /// Positioned before the next element.
    Elements,
    Done,
}

impl<R: BufRead> JsonArrayDecoder<R> {
    /// Wraps a buffered reader positioned at the start of the document.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            lookahead: None,
            state: State::Start,
            pending: None,
            index: 0,
            buffer: Vec::new(),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.lookahead.take() {
            return Ok(Some(byte));
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        if self.lookahead.is_none() {
            self.lookahead = self.read_byte()?;
        }
        Ok(self.lookahead)
    }

    fn read_non_whitespace(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.read_byte()? {
                Some(byte) if byte.is_ascii_whitespace() => continue,
                other => return Ok(other),
            }
        }
    }

    /// Consume the opening bracket. Returns false for an empty array.
    fn enter_array(&mut self) -> Result<bool, DecodeError> {
        match self.read_non_whitespace()? {
            Some(b'[') => {}
            Some(other) => {
                return Err(structure(format!(
                    "expected '[' at start of document, found {:?}",
                    char::from(other)
                )));
            }
            None => return Err(structure("empty document".to_string())),
        }
        match self.read_non_whitespace()? {
            Some(b']') => Ok(false),
            Some(other) => {
                self.lookahead = Some(other);
                Ok(true)
            }
            None => Err(structure("unclosed array".to_string())),
        }
    }

    /// Extract one balanced JSON value into the element buffer.
    fn scan_element(&mut self) -> Result<(), DecodeError> {
        self.buffer.clear();
        let first = self
            .read_non_whitespace()?
            .ok_or_else(|| structure("unexpected end of input before a value".to_string()))?;
        self.buffer.push(first);
        match first {
            b'{' | b'[' => self.scan_container(),
            b'"' => self.scan_string(),
            _ => self.scan_scalar(),
        }
    }

    /// The opening brace/bracket is already buffered; read until its match.
    fn scan_container(&mut self) -> Result<(), DecodeError> {
        let mut depth = 1usize;
        while depth > 0 {
            let byte = self
                .read_byte()?
                .ok_or_else(|| structure("unexpected end of input inside a value".to_string()))?;
            self.buffer.push(byte);
            match byte {
                b'"' => self.scan_string()?,
                b'{' | b'[' => depth += 1,
                b'}' | b']' => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    /// The opening quote is already buffered; read through the closing one.
    fn scan_string(&mut self) -> Result<(), DecodeError> {
        let mut escaped = false;
        loop {
            let byte = self
                .read_byte()?
                .ok_or_else(|| structure("unexpected end of input inside a string".to_string()))?;
            self.buffer.push(byte);
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                return Ok(());
            }
        }
    }

    /// Numbers and literals run until a delimiter, which stays unconsumed.
    fn scan_scalar(&mut self) -> Result<(), DecodeError> {
        loop {
            match self.peek_byte()? {
                None => return Ok(()),
                Some(byte)
                    if byte == b','
                        || byte == b']'
                        || byte == b'}'
                        || byte.is_ascii_whitespace() =>
                {
                    return Ok(());
                }
                Some(byte) => {
                    self.lookahead = None;
                    self.buffer.push(byte);
                }
            }
        }
    }

    /// Consume the `,` or `]` after an element. Returns true when more
    /// elements follow.
    fn read_separator(&mut self) -> Result<bool, DecodeError> {
        match self.read_non_whitespace()? {
            Some(b',') => Ok(true),
            Some(b']') => Ok(false),
            Some(other) => Err(structure(format!(
                "expected ',' or ']' after element, found {:?}",
                char::from(other)
            ))),
            None => Err(structure("unclosed array".to_string())),
        }
    }
}

impl<R: BufRead> Iterator for JsonArrayDecoder<R> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending.take() {
            self.state = State::Done;
            return Some(Err(error));
        }
        match self.state {
            State::Done => return None,
            State::Start => match self.enter_array() {
                Ok(true) => self.state = State::Elements,
                Ok(false) => {
                    self.state = State::Done;
                    return None;
                }
                Err(error) => {
                    self.state = State::Done;
                    return Some(Err(error));
                }
            },
            State::Elements => {}
        }

        if let Err(error) = self.scan_element() {
            self.state = State::Done;
            return Some(Err(error));
        }
        let index = self.index;
        self.index += 1;
        let parsed = serde_json::from_slice::<Value>(&self.buffer)
            .map_err(|source| DecodeError::Element { index, source });

        match self.read_separator() {
            Ok(true) => {}
            Ok(false) => self.state = State::Done,
            // Deliver the element first; the fatal error follows on the next
            // call.
            Err(error) => self.pending = Some(error),
        }

        Some(parsed)
    }
}

fn structure(detail: String) -> DecodeError {
    DecodeError::Structure { detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &str) -> Vec<Result<Value, DecodeError>> {
        JsonArrayDecoder::new(input.as_bytes()).collect()
    }

    #[test]
    fn yields_each_element() {
        let items = decode(r#"[{"a":1}, {"b":[2,3]}, "x", 4.5, null, true]"#);
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].as_ref().unwrap()["a"], 1);
        assert_eq!(items[1].as_ref().unwrap()["b"][1], 3);
        assert_eq!(*items[3].as_ref().unwrap(), serde_json::json!(4.5));
        assert_eq!(*items[5].as_ref().unwrap(), serde_json::json!(true));
    }

    #[test]
    fn empty_array_yields_nothing() {
        assert!(decode("  [ ]  ").is_empty());
    }

    #[test]
    fn strings_with_escapes_and_brackets_stay_balanced() {
        let items = decode(r#"[{"t":"a ] \" } b"}, {"u":1}]"#);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap()["t"], "a ] \" } b");
    }

    #[test]
    fn bad_element_is_recoverable() {
        let items = decode(r#"[{"a":1}, {"bad":}, {"c":3}]"#);
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        match &items[1] {
            Err(error @ DecodeError::Element { index: 1, .. }) => assert!(!error.is_fatal()),
            other => panic!("expected element error, got {other:?}"),
        }
        assert_eq!(items[2].as_ref().unwrap()["c"], 3);
    }

    #[test]
    fn missing_separator_is_fatal_after_the_element() {
        let items = decode(r#"[{"a":1} {"b":2}]"#);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        match &items[1] {
            Err(error @ DecodeError::Structure { .. }) => assert!(error.is_fatal()),
            other => panic!("expected structure error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_input_is_fatal() {
        let items = decode(r#"[{"a":1}, {"b":"#);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(DecodeError::Structure { .. })));
    }

    #[test]
    fn not_an_array_is_fatal_immediately() {
        let items = decode(r#"{"a":1}"#);
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(DecodeError::Structure { .. })));
    }

    #[test]
    fn buffer_does_not_accumulate_across_elements() {
        let mut decoder = JsonArrayDecoder::new(r#"[{"long":"aaaaaaaaaaaaaaaa"}, 1]"#.as_bytes());
        decoder.next().unwrap().unwrap();
        decoder.next().unwrap().unwrap();
        // After the tiny second element the buffer holds only its bytes.
        assert_eq!(decoder.buffer, b"1");
    }
}
