//! The full per-trial detail projection.
//!
//! A [`DetailRecord`] is written to its shard file as soon as it is built and
//! never accumulated; only the summary side of a record survives in memory
//! for the run. Serialized field names follow the artifact schema consumed
//! downstream, which keeps the registry's own camelCase spelling.

use serde::{Deserialize, Serialize};

use crate::date::PartialDate;
use crate::summary::LocationSummary;

/// Everything a trial page needs that the index does not carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: String,
    /// Lead sponsor name.
    pub sponsor: Option<String>,
    #[serde(rename = "briefTitle")]
    pub brief_title: Option<String>,
    #[serde(rename = "officialTitle")]
    pub official_title: Option<String>,
    pub status: Option<String>,
    pub phase: Option<String>,
    pub dates: TrialDates,
    pub enrollment: Option<u64>,
    pub design: DesignInfo,
    /// Full condition list, uncapped.
    pub conditions: Vec<String>,
    /// Interventions with subtype and alias info, names as reported.
    pub interventions: Vec<InterventionDetail>,
    pub arms: Vec<ArmDetail>,
    /// Trimmed brief summary free text.
    pub summary: Option<String>,
    #[serde(rename = "primaryOutcome")]
    pub primary_outcome: Option<PrimaryOutcome>,
    pub eligibility: EligibilitySummary,
    /// Countries are not capped here, unlike the index entry.
    pub locations: LocationSummary,
    pub refs: References,
    #[serde(rename = "adverseEventsSummary")]
    pub adverse_events: AdverseEventsSummary,
}

/// The full registry date set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialDates {
    pub start: Option<PartialDate>,
    #[serde(rename = "primaryCompletion")]
    pub primary_completion: Option<PartialDate>,
    pub completion: Option<PartialDate>,
    #[serde(rename = "firstPosted")]
    pub first_posted: Option<PartialDate>,
    #[serde(rename = "resultsPosted")]
    pub results_posted: Option<PartialDate>,
    #[serde(rename = "lastUpdate")]
    pub last_update: Option<PartialDate>,
}

/// Study design metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignInfo {
    pub allocation: Option<String>,
    pub model: Option<String>,
    pub masking: Option<String>,
    #[serde(rename = "primaryPurpose")]
    pub primary_purpose: Option<String>,
}

/// One intervention as reported, with its aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterventionDetail {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "otherNames")]
    pub other_names: Vec<String>,
}

/// One arm group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmDetail {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Primary outcome, from reported results when available, otherwise the
/// planned measure only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryOutcome {
    pub measure: Option<String>,
    #[serde(rename = "timeFrame")]
    pub time_frame: Option<String>,
    /// Per-arm effect sizes; empty when only the planned outcome is known.
    #[serde(rename = "effectByArm", default, skip_serializing_if = "Vec::is_empty")]
    pub effect_by_arm: Vec<ArmEffect>,
    /// Pairwise comparison p-values from the reported analyses.
    #[serde(rename = "pValues", default, skip_serializing_if = "Vec::is_empty")]
    pub p_values: Vec<PValueEntry>,
}

/// Effect size and dispersion for one arm group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmEffect {
    /// Arm group title, or the raw group id when no title is listed.
    pub arm: String,
    pub value: Option<f64>,
    pub spread: Option<f64>,
}

/// One reported analysis comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PValueEntry {
    /// Group ids joined with `" vs "`.
    pub comp: String,
    pub p: Option<String>,
}

/// Eligibility metadata plus criteria counts parsed from free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilitySummary {
    #[serde(rename = "minAge")]
    pub min_age: Option<String>,
    pub sex: Option<String>,
    #[serde(rename = "healthyVolunteers")]
    pub healthy_volunteers: bool,
    /// Bullet count under the inclusion header; unknown when the header is
    /// missing or no bullets follow it.
    #[serde(rename = "inclusionCount")]
    pub inclusion_count: Option<usize>,
    #[serde(rename = "exclusionCount")]
    pub exclusion_count: Option<usize>,
}

/// Reference identifiers attached to the trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct References {
    pub pmids: Vec<String>,
    #[serde(rename = "seeAlso")]
    pub see_also: Vec<String>,
}

/// Adverse-event rollup from the results section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdverseEventsSummary {
    /// First event group's serious-event figures.
    #[serde(rename = "seriousAny")]
    pub serious: Option<SeriousEvents>,
    /// The five most frequently affected non-serious event terms.
    #[serde(rename = "commonTop")]
    pub common_top: Vec<String>,
}

/// Serious-event count against the at-risk population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriousEvents {
    pub events: Option<u64>,
    #[serde(rename = "n")]
    pub at_risk: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_outcome_omits_effect_fields() {
        let outcome = PrimaryOutcome {
            measure: Some("ESS change".to_string()),
            time_frame: Some("8 weeks".to_string()),
            ..PrimaryOutcome::default()
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert!(value.get("effectByArm").is_none());
        assert!(value.get("pValues").is_none());
    }

    #[test]
    fn detail_serializes_registry_spelling() {
        let detail = DetailRecord {
            id: "NCT00000001".to_string(),
            adverse_events: AdverseEventsSummary {
                serious: Some(SeriousEvents {
                    events: Some(2),
                    at_risk: Some(100),
                }),
                common_top: vec!["Headache".to_string()],
            },
            ..DetailRecord::default()
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["adverseEventsSummary"]["seriousAny"]["n"], 100);
        assert_eq!(value["adverseEventsSummary"]["commonTop"][0], "Headache");
        assert_eq!(value["eligibility"]["healthyVolunteers"], false);
    }
}
