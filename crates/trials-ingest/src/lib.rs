//! Input discovery and streaming record decoding.
//!
//! One registry export file holds many trial records in one of three
//! shapes: a top-level JSON array, newline-delimited JSON, or a single
//! object. [`detect_format`] picks the shape from the filename and a small
//! prefix read, and [`RecordStream`] presents whichever decoder applies as
//! one lazy iterator of raw records. Decoders never buffer more than the
//! record currently being produced, so input files may be arbitrarily
//! larger than memory.

pub mod array;
pub mod discovery;
pub mod error;
pub mod ndjson;
pub mod single;
pub mod sniff;
pub mod stream;

pub use array::JsonArrayDecoder;
pub use discovery::list_input_files;
pub use error::{DecodeError, IngestError, Result};
pub use ndjson::NdjsonDecoder;
pub use single::SingleObjectDecoder;
pub use sniff::{InputFormat, SNIFF_PREFIX_BYTES, detect_format};
pub use stream::RecordStream;
