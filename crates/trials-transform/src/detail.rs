//! The record → detail-projection transform.

use serde_json::Value;

use trials_model::{
    AdverseEventsSummary, ArmDetail, ArmEffect, DesignInfo, DetailRecord, EligibilitySummary,
    InterventionDetail, Node, PValueEntry, PrimaryOutcome, References, SeriousEvents, TrialDates,
};

use crate::common::{date_struct, location_rollup};
use crate::text::{collapse_whitespace, criteria_counts};

/// How many non-serious adverse-event terms the rollup keeps.
const TOP_EVENT_TERMS: usize = 5;

/// Derives the full detail projection for one raw record.
///
/// The identifier has already been resolved by the summary transform; a
/// record that reaches this point always has one. Intervention names here
/// stay as reported - alias canonicalization applies to the index entry
/// only.
pub fn to_detail(record: &Value, id: &str) -> DetailRecord {
    let root = Node::new(record);
    let protocol = root.field("protocolSection");
    let identification = protocol.field("identificationModule");
    let status_module = protocol.field("statusModule");
    let design = protocol.field("designModule");
    let arms_module = protocol.field("armsInterventionsModule");
    let results = root.field("resultsSection");

    let interventions = arms_module
        .field("interventions")
        .elements()
        .map(|intervention| InterventionDetail {
            kind: intervention.field("type").non_empty_string(),
            name: intervention.field("name").non_empty_string(),
            other_names: intervention
                .field("otherNames")
                .elements()
                .filter_map(Node::non_empty_string)
                .collect(),
        })
        .collect();

    let arms = arms_module
        .field("armGroups")
        .elements()
        .map(|arm| ArmDetail {
            label: arm.field("label").non_empty_string(),
            kind: arm.field("type").non_empty_string(),
        })
        .collect();

    DetailRecord {
        id: id.to_string(),
        sponsor: protocol
            .field("sponsorCollaboratorsModule")
            .field("leadSponsor")
            .field("name")
            .non_empty_string(),
        brief_title: identification.field("briefTitle").non_empty_string(),
        official_title: identification.field("officialTitle").non_empty_string(),
        status: status_module.field("overallStatus").non_empty_string(),
        phase: design.field("phases").at(0).non_empty_string(),
        dates: trial_dates(status_module),
        enrollment: design.field("enrollmentInfo").field("count").integer(),
        design: DesignInfo {
            allocation: design.field("designInfo").field("allocation").non_empty_string(),
            model: design
                .field("designInfo")
                .field("interventionModel")
                .non_empty_string(),
            masking: design
                .field("designInfo")
                .field("maskingInfo")
                .field("masking")
                .non_empty_string(),
            primary_purpose: design
                .field("designInfo")
                .field("primaryPurpose")
                .non_empty_string(),
        },
        conditions: protocol
            .field("conditionsModule")
            .field("conditions")
            .elements()
            .filter_map(Node::non_empty_string)
            .collect(),
        interventions,
        arms,
        summary: protocol
            .field("descriptionModule")
            .field("briefSummary")
            .non_empty_string(),
        primary_outcome: primary_outcome(protocol, results),
        eligibility: eligibility(protocol),
        locations: location_rollup(
            protocol.field("contactsLocationsModule").field("locations"),
            None,
        ),
        refs: references(protocol),
        adverse_events: adverse_events(results),
    }
}

fn trial_dates(status_module: Node<'_>) -> TrialDates {
    TrialDates {
        start: date_struct(status_module.field("startDateStruct")),
        primary_completion: date_struct(status_module.field("primaryCompletionDateStruct")),
        completion: date_struct(status_module.field("completionDateStruct")),
        first_posted: date_struct(status_module.field("studyFirstPostDateStruct")),
        results_posted: date_struct(status_module.field("resultsFirstPostDateStruct")),
        last_update: date_struct(status_module.field("lastUpdatePostDateStruct")),
    }
}

/// Reported results win over the planned outcome; with neither, the trial
/// has no primary outcome to show.
fn primary_outcome(protocol: Node<'_>, results: Node<'_>) -> Option<PrimaryOutcome> {
    let reported = results
        .field("outcomeMeasuresModule")
        .field("outcomeMeasures")
        .elements()
        .find(|measure| measure.field("type").as_str() == Some("PRIMARY"));

    if let Some(measure) = reported {
        return Some(reported_outcome(measure));
    }

    let planned = protocol.field("outcomesModule").field("primaryOutcomes").at(0);
    planned.is_present().then(|| PrimaryOutcome {
        measure: planned.field("measure").non_empty_string(),
        time_frame: planned.field("timeFrame").non_empty_string(),
        ..PrimaryOutcome::default()
    })
}

fn reported_outcome(measure: Node<'_>) -> PrimaryOutcome {
    let groups = measure.field("groups");
    let effect_by_arm = measure
        .field("classes")
        .at(0)
        .field("categories")
        .at(0)
        .field("measurements")
        .elements()
        .map(|row| {
            let group_id = row.field("groupId").string().unwrap_or_default();
            let title = groups
                .elements()
                .find(|group| group.field("id").as_str() == Some(group_id.as_str()))
                .and_then(|group| group.field("title").non_empty_string())
                .unwrap_or_else(|| group_id.clone());
            ArmEffect {
                arm: collapse_whitespace(&title),
                value: row.field("value").numeric(),
                spread: row.field("spread").numeric(),
            }
        })
        .collect();

    let p_values = measure
        .field("analyses")
        .elements()
        .map(|analysis| PValueEntry {
            comp: analysis
                .field("groupIds")
                .elements()
                .filter_map(Node::scalar_string)
                .collect::<Vec<_>>()
                .join(" vs "),
            p: analysis.field("pValue").scalar_string(),
        })
        .collect();

    PrimaryOutcome {
        measure: measure.field("title").non_empty_string(),
        time_frame: measure.field("timeFrame").non_empty_string(),
        effect_by_arm,
        p_values,
    }
}

fn eligibility(protocol: Node<'_>) -> EligibilitySummary {
    let module = protocol.field("eligibilityModule");
    let criteria = module.field("eligibilityCriteria").as_str().unwrap_or("");
    let (inclusion_count, exclusion_count) = criteria_counts(criteria);
    EligibilitySummary {
        min_age: module.field("minimumAge").non_empty_string(),
        sex: module.field("sex").non_empty_string(),
        healthy_volunteers: module.field("healthyVolunteers").as_bool().unwrap_or(false),
        inclusion_count,
        exclusion_count,
    }
}

fn references(protocol: Node<'_>) -> References {
    let module = protocol.field("referencesModule");
    References {
        pmids: module
            .field("references")
            .elements()
            .filter_map(|reference| reference.field("pmid").scalar_string())
            .filter(|pmid| !pmid.is_empty())
            .collect(),
        see_also: module
            .field("seeAlsoLinks")
            .elements()
            .filter_map(|link| link.field("url").non_empty_string())
            .collect(),
    }
}

fn adverse_events(results: Node<'_>) -> AdverseEventsSummary {
    let module = results.field("adverseEventsModule");

    let first_group = module.field("eventGroups").at(0);
    let serious = first_group.is_present().then(|| SeriousEvents {
        events: first_group.field("seriousNumAffected").integer(),
        at_risk: first_group.field("seriousNumAtRisk").integer(),
    });

    let mut totals: Vec<(String, u64)> = Vec::new();
    for event in module.field("otherEvents").elements() {
        let Some(term) = event.field("term").non_empty_string() else {
            continue;
        };
        let total = event
            .field("stats")
            .elements()
            .filter_map(|stat| stat.field("numAffected").integer())
            .sum();
        totals.push((term, total));
    }
    // Stable sort: ties keep encounter order.
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    AdverseEventsSummary {
        serious,
        common_top: totals
            .into_iter()
            .take(TOP_EVENT_TERMS)
            .map(|(term, _)| term)
            .collect(),
    }
}
