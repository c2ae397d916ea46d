//! The record → index-entry transform.

use serde_json::Value;
use tracing::debug;

use trials_model::{
    MAX_CONDITIONS, MAX_COUNTRIES, MAX_INTERVENTIONS, MAX_TITLE_CHARS, Node, SummaryEntry,
};

use crate::aliases::AliasTable;
use crate::common::{date_struct, location_rollup};
use crate::text::{collapse_whitespace, truncate_chars};

/// Derives the index entry for one raw record.
///
/// Returns `None` for a record with no resolvable identifier in either
/// recognized identification field; such records never reach the index or
/// the facet map. The drop is an expected data-quality condition, not a
/// failure.
pub fn to_summary(record: &Value, aliases: &AliasTable) -> Option<SummaryEntry> {
    let protocol = Node::new(record).field("protocolSection");
    let identification = protocol.field("identificationModule");

    let id = identification
        .field("nctId")
        .non_empty_string()
        .or_else(|| identification.field("orgStudyId").non_empty_string());
    let Some(id) = id else {
        debug!("record has no identifier; dropped");
        return None;
    };

    let status_module = protocol.field("statusModule");
    let design = protocol.field("designModule");
    let arms_module = protocol.field("armsInterventionsModule");

    let title = identification
        .field("briefTitle")
        .as_str()
        .map(|raw| {
            let collapsed = collapse_whitespace(raw);
            truncate_chars(&collapsed, MAX_TITLE_CHARS).to_string()
        })
        .unwrap_or_default();

    let conditions: Vec<String> = protocol
        .field("conditionsModule")
        .field("conditions")
        .elements()
        .filter_map(Node::non_empty_string)
        .take(MAX_CONDITIONS)
        .collect();

    let mut interventions: Vec<String> = Vec::new();
    for intervention in arms_module.field("interventions").elements() {
        let Some(name) = intervention.field("name").non_empty_string() else {
            continue;
        };
        let canonical = aliases.canonicalize(&name);
        if !interventions.contains(&canonical) {
            interventions.push(canonical);
        }
    }
    interventions.truncate(MAX_INTERVENTIONS);

    let arm_group_count = arms_module.field("armGroups").len();

    Some(SummaryEntry {
        id,
        title,
        status: status_module.field("overallStatus").non_empty_string(),
        phase: design.field("phases").at(0).non_empty_string(),
        start: date_struct(status_module.field("startDateStruct")),
        primary_completion: date_struct(status_module.field("primaryCompletionDateStruct")),
        completion: date_struct(status_module.field("completionDateStruct")),
        enrollment: design.field("enrollmentInfo").field("count").integer(),
        conditions,
        interventions,
        locations: location_rollup(
            protocol.field("contactsLocationsModule").field("locations"),
            Some(MAX_COUNTRIES),
        ),
        arm_count: (arm_group_count > 0).then_some(arm_group_count),
        has_results: Node::new(record).field("hasResults").as_bool().unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Value {
        json!({
            "protocolSection": {
                "identificationModule": {
                    "nctId": "NCT00000001",
                    "briefTitle": "  A   Study\nof   Sodium Oxybate  "
                },
                "statusModule": {
                    "overallStatus": "COMPLETED",
                    "startDateStruct": { "date": "2018-01-15" },
                    "primaryCompletionDateStruct": { "date": "2019-12" },
                    "completionDateStruct": { "date": "2020-05-01" }
                },
                "designModule": {
                    "phases": ["PHASE3"],
                    "enrollmentInfo": { "count": 228 }
                },
                "conditionsModule": {
                    "conditions": ["Narcolepsy", "Cataplexy"]
                },
                "armsInterventionsModule": {
                    "armGroups": [ { "label": "Drug" }, { "label": "Placebo" } ],
                    "interventions": [
                        { "name": "Xyrem" },
                        { "name": "sodium oxybate injection" },
                        { "name": "Placebo" }
                    ]
                },
                "contactsLocationsModule": {
                    "locations": [
                        { "country": "United States" },
                        { "country": "Canada" },
                        { "country": "United States" }
                    ]
                }
            },
            "hasResults": true
        })
    }

    #[test]
    fn extracts_and_normalizes_all_fields() {
        let entry = to_summary(&record(), &AliasTable::default()).unwrap();
        assert_eq!(entry.id, "NCT00000001");
        assert_eq!(entry.title, "A Study of Sodium Oxybate");
        assert_eq!(entry.status.as_deref(), Some("COMPLETED"));
        assert_eq!(entry.phase.as_deref(), Some("PHASE3"));
        assert_eq!(entry.completion.unwrap().to_string(), "2020-05-01");
        assert_eq!(entry.primary_completion.unwrap().to_string(), "2019-12");
        assert_eq!(entry.enrollment, Some(228));
        assert_eq!(entry.conditions, vec!["Narcolepsy", "Cataplexy"]);
        // Brand and generic collapse to one canonical entry.
        assert_eq!(entry.interventions, vec!["Sodium Oxybate", "Placebo"]);
        assert_eq!(entry.locations.countries, vec!["United States", "Canada"]);
        assert_eq!(entry.locations.site_count, 3);
        assert_eq!(entry.arm_count, Some(2));
        assert!(entry.has_results);
    }

    #[test]
    fn missing_id_drops_the_record() {
        let record = json!({
            "protocolSection": { "identificationModule": { "briefTitle": "No id" } }
        });
        assert!(to_summary(&record, &AliasTable::default()).is_none());
    }

    #[test]
    fn org_study_id_is_the_fallback_identifier() {
        let record = json!({
            "protocolSection": { "identificationModule": { "orgStudyId": "STUDY-42" } }
        });
        let entry = to_summary(&record, &AliasTable::default()).unwrap();
        assert_eq!(entry.id, "STUDY-42");
        assert_eq!(entry.title, "");
        assert_eq!(entry.arm_count, None);
        assert!(!entry.has_results);
    }

    #[test]
    fn long_titles_truncate_after_collapsing() {
        let long = "word ".repeat(60);
        let record = json!({
            "protocolSection": {
                "identificationModule": { "nctId": "NCT1", "briefTitle": long }
            }
        });
        let entry = to_summary(&record, &AliasTable::default()).unwrap();
        assert_eq!(entry.title.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn caps_apply_to_lists() {
        let conditions: Vec<_> = (0..10).map(|i| format!("C{i}")).collect();
        let interventions: Vec<_> = (0..10)
            .map(|i| json!({ "name": format!("Drug {i}") }))
            .collect();
        let locations: Vec<_> = (0..15).map(|i| json!({ "country": format!("L{i}") })).collect();
        let record = json!({
            "protocolSection": {
                "identificationModule": { "nctId": "NCT1" },
                "conditionsModule": { "conditions": conditions },
                "armsInterventionsModule": { "interventions": interventions },
                "contactsLocationsModule": { "locations": locations }
            }
        });
        let entry = to_summary(&record, &AliasTable::default()).unwrap();
        assert_eq!(entry.conditions.len(), MAX_CONDITIONS);
        assert_eq!(entry.interventions.len(), MAX_INTERVENTIONS);
        assert_eq!(entry.locations.countries.len(), MAX_COUNTRIES);
        assert_eq!(entry.locations.site_count, 15);
    }
}
