//! Data model for the trial index builder.
//!
//! The types here describe the two projections derived from a raw registry
//! record: the compact [`SummaryEntry`] that ends up in the index artifact,
//! and the full [`DetailRecord`] written per trial. Raw records themselves
//! stay `serde_json::Value` trees and are only ever read through the
//! tolerant [`Node`] cursor, so a missing or oddly shaped field reads as
//! absent instead of failing.

pub mod date;
pub mod detail;
pub mod record;
pub mod summary;

pub use date::PartialDate;
pub use detail::{
    AdverseEventsSummary, ArmDetail, ArmEffect, DesignInfo, DetailRecord, EligibilitySummary,
    InterventionDetail, PValueEntry, PrimaryOutcome, References, SeriousEvents, TrialDates,
};
pub use record::Node;
pub use summary::{
    LocationSummary, MAX_CONDITIONS, MAX_COUNTRIES, MAX_INTERVENTIONS, MAX_TITLE_CHARS,
    SummaryEntry,
};
