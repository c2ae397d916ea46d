//! Aggregate artifact finalization.

use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use trials_model::SummaryEntry;

use crate::error::{OutputError, Result};
use crate::facets::FacetMap;

/// Filename of the index artifact, directly under the output root.
pub const INDEX_FILE: &str = "trials.index.json";
/// Subdirectory of the output root holding facet artifacts.
pub const FACETS_SUBDIR: &str = "facets";
/// Filename of the intervention facet artifact.
pub const FACETS_FILE: &str = "ingredients.json";

/// Paths and counts of the written aggregate artifacts.
#[derive(Debug, Clone)]
pub struct FinalizeReport {
    pub index_path: PathBuf,
    pub facets_path: PathBuf,
    pub entry_count: usize,
    pub facet_count: usize,
}

/// Sorts the accumulated entries and writes both aggregate artifacts.
///
/// The index sorts by completion date descending, comparing the rendered
/// ISO-partial text lexically; entries with no completion date render as
/// the empty string and therefore sort last. The sort is stable, so ties
/// keep their input-encounter order. Artifacts are compact UTF-8 JSON.
pub fn finalize(
    output_dir: &Path,
    mut entries: Vec<SummaryEntry>,
    facets: &FacetMap,
) -> Result<FinalizeReport> {
    entries.sort_by_cached_key(|entry| Reverse(completion_sort_key(entry)));

    ensure_dir(output_dir)?;
    let index_path = output_dir.join(INDEX_FILE);
    let index_bytes = serde_json::to_vec(&entries).map_err(|source| OutputError::Serialize {
        what: "trial index".to_string(),
        source,
    })?;
    write_artifact(&index_path, &index_bytes)?;
    debug!(path = %index_path.display(), entries = entries.len(), "index written");

    let facets_dir = output_dir.join(FACETS_SUBDIR);
    ensure_dir(&facets_dir)?;
    let facets_path = facets_dir.join(FACETS_FILE);
    let facet_bytes = serde_json::to_vec(facets).map_err(|source| OutputError::Serialize {
        what: "facet map".to_string(),
        source,
    })?;
    write_artifact(&facets_path, &facet_bytes)?;
    debug!(path = %facets_path.display(), facets = facets.len(), "facets written");

    Ok(FinalizeReport {
        index_path,
        facets_path,
        entry_count: entries.len(),
        facet_count: facets.len(),
    })
}

/// Lexical sort key for an entry's completion date; unknown sorts as the
/// empty string.
fn completion_sort_key(entry: &SummaryEntry) -> String {
    entry
        .completion
        .map(|date| date.to_string())
        .unwrap_or_default()
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| OutputError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| OutputError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use trials_model::PartialDate;

    fn entry(id: &str, completion: Option<&str>) -> SummaryEntry {
        SummaryEntry {
            id: id.to_string(),
            title: String::new(),
            status: None,
            phase: None,
            start: None,
            primary_completion: None,
            completion: completion.and_then(PartialDate::parse),
            enrollment: None,
            conditions: Vec::new(),
            interventions: Vec::new(),
            locations: trials_model::LocationSummary::default(),
            arm_count: None,
            has_results: false,
        }
    }

    fn index_ids(dir: &TempDir) -> Vec<String> {
        let contents = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        let entries: Vec<SummaryEntry> = serde_json::from_str(&contents).unwrap();
        entries.into_iter().map(|e| e.id).collect()
    }

    #[test]
    fn index_sorts_by_completion_descending_unknown_last() {
        let dir = TempDir::new().unwrap();
        let entries = vec![
            entry("old", Some("2015-01-01")),
            entry("unknown", None),
            entry("new", Some("2021-06")),
            entry("year-only", Some("2020")),
        ];
        finalize(dir.path(), entries, &FacetMap::new()).unwrap();
        assert_eq!(index_ids(&dir), vec!["new", "year-only", "old", "unknown"]);
    }

    #[test]
    fn ties_keep_encounter_order() {
        let dir = TempDir::new().unwrap();
        let entries = vec![
            entry("first", Some("2020-05-01")),
            entry("second", Some("2020-05-01")),
            entry("third", Some("2020-05-01")),
        ];
        finalize(dir.path(), entries, &FacetMap::new()).unwrap();
        assert_eq!(index_ids(&dir), vec!["first", "second", "third"]);
    }

    #[test]
    fn partial_dates_compare_lexically() {
        let dir = TempDir::new().unwrap();
        // "2020-05-01" sorts above "2020-05" lexically, and both above
        // "2020".
        let entries = vec![
            entry("year", Some("2020")),
            entry("day", Some("2020-05-01")),
            entry("month", Some("2020-05")),
        ];
        finalize(dir.path(), entries, &FacetMap::new()).unwrap();
        assert_eq!(index_ids(&dir), vec!["day", "month", "year"]);
    }

    #[test]
    fn writes_facet_artifact_under_facets_dir() {
        let dir = TempDir::new().unwrap();
        let mut facets = FacetMap::new();
        facets.insert("Sodium Oxybate", "NCT1");
        let report = finalize(dir.path(), Vec::new(), &facets).unwrap();
        assert_eq!(report.facet_count, 1);
        let contents = std::fs::read_to_string(&report.facets_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["sodium oxybate"][0], "NCT1");
        assert!(report.facets_path.ends_with("facets/ingredients.json"));
    }
}
