//! The compact per-trial index entry.

use serde::{Deserialize, Serialize};

use crate::date::PartialDate;

/// Maximum characters of brief title kept in an index entry.
pub const MAX_TITLE_CHARS: usize = 140;
/// Maximum conditions listed in an index entry.
pub const MAX_CONDITIONS: usize = 6;
/// Maximum interventions listed in an index entry.
pub const MAX_INTERVENTIONS: usize = 6;
/// Maximum distinct countries listed in an index entry.
pub const MAX_COUNTRIES: usize = 10;

/// One row of the index artifact.
///
/// An entry always carries a registry identifier; records without one are
/// dropped before an entry is ever built. Duplicate identifiers across input
/// files each keep their own entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub id: String,
    /// Brief title, whitespace-collapsed and truncated to
    /// [`MAX_TITLE_CHARS`].
    pub title: String,
    pub status: Option<String>,
    /// First listed phase.
    pub phase: Option<String>,
    pub start: Option<PartialDate>,
    #[serde(rename = "primaryCompletion")]
    pub primary_completion: Option<PartialDate>,
    pub completion: Option<PartialDate>,
    pub enrollment: Option<u64>,
    pub conditions: Vec<String>,
    /// Alias-canonicalized intervention names, deduplicated in first-seen
    /// order.
    pub interventions: Vec<String>,
    pub locations: LocationSummary,
    /// Number of arm groups; a record listing none reports unknown rather
    /// than zero.
    #[serde(rename = "arms")]
    pub arm_count: Option<usize>,
    #[serde(rename = "hasResults")]
    pub has_results: bool,
}

/// Location rollup shared by the summary and detail projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub countries: Vec<String>,
    /// Total site count, before any country cap.
    #[serde(rename = "siteCount")]
    pub site_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_field_names_match_artifact_schema() {
        let entry = SummaryEntry {
            id: "NCT00000001".to_string(),
            title: "A study".to_string(),
            status: Some("COMPLETED".to_string()),
            phase: None,
            start: None,
            primary_completion: PartialDate::parse("2020-01"),
            completion: PartialDate::parse("2020-05-01"),
            enrollment: Some(120),
            conditions: vec!["Narcolepsy".to_string()],
            interventions: vec!["Sodium Oxybate".to_string()],
            locations: LocationSummary {
                countries: vec!["United States".to_string()],
                site_count: 3,
            },
            arm_count: Some(2),
            has_results: true,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["primaryCompletion"], "2020-01");
        assert_eq!(value["completion"], "2020-05-01");
        assert_eq!(value["locations"]["siteCount"], 3);
        assert_eq!(value["arms"], 2);
        assert_eq!(value["hasResults"], true);
        assert_eq!(value["phase"], serde_json::Value::Null);
    }
}
