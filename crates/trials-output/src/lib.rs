//! Artifact persistence for the trial index builder.
//!
//! The [`OutputSink`] is the single owner of everything a run accumulates:
//! it writes each detail projection to its shard as soon as the record is
//! transformed, and keeps only the compact index entries and the facet map
//! in memory. The [`finalize`] step drains the sink into the two aggregate
//! artifacts once all input is consumed.

pub mod error;
pub mod facets;
pub mod finalize;
pub mod sink;

pub use error::{OutputError, Result};
pub use facets::FacetMap;
pub use finalize::{FACETS_FILE, FACETS_SUBDIR, FinalizeReport, INDEX_FILE, finalize};
pub use sink::{EmitOutcome, OutputSink, TRIALS_SUBDIR, shard_key};
