//! Extraction helpers shared by the summary and detail transforms.

use trials_model::{LocationSummary, Node, PartialDate};

/// Parses the `date` field of a registry date struct node.
pub(crate) fn date_struct(node: Node<'_>) -> Option<PartialDate> {
    PartialDate::parse_opt(node.field("date").as_str())
}

/// Rolls up the locations list into distinct countries plus a total site
/// count. The country list is optionally capped; the site count never is.
pub(crate) fn location_rollup(locations: Node<'_>, country_cap: Option<usize>) -> LocationSummary {
    let site_count = locations.len();
    let mut countries: Vec<String> = Vec::new();
    for location in locations.elements() {
        if let Some(country) = location.field("country").non_empty_string() {
            if !countries.contains(&country) {
                countries.push(country);
            }
        }
    }
    if let Some(cap) = country_cap {
        countries.truncate(cap);
    }
    LocationSummary {
        countries,
        site_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rollup_dedupes_and_counts_all_sites() {
        let record = json!([
            { "country": "United States" },
            { "country": "United States" },
            { "country": "Canada" },
            { "facility": "no country" },
        ]);
        let rollup = location_rollup(Node::new(&record), None);
        assert_eq!(rollup.countries, vec!["United States", "Canada"]);
        assert_eq!(rollup.site_count, 4);
    }

    #[test]
    fn country_cap_does_not_touch_site_count() {
        let record = json!([
            { "country": "A" },
            { "country": "B" },
            { "country": "C" },
        ]);
        let rollup = location_rollup(Node::new(&record), Some(2));
        assert_eq!(rollup.countries.len(), 2);
        assert_eq!(rollup.site_count, 3);
    }
}
