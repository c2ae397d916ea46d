//! The per-record output sink.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::trace;

use trials_model::SummaryEntry;
use trials_transform::{AliasTable, to_detail, to_summary};

use crate::error::{OutputError, Result};
use crate::facets::FacetMap;

/// Subdirectory of the output root holding the sharded detail files.
pub const TRIALS_SUBDIR: &str = "trials";

/// Shard directory name for a trial id: its first four characters,
/// uppercased. Shorter ids shard under the whole id.
pub fn shard_key(id: &str) -> String {
    id.chars().take(4).flat_map(char::to_uppercase).collect()
}

/// What one `emit` call did with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The record was projected, its detail file written, and its summary
    /// entry and facet associations accumulated.
    Indexed { id: String },
    /// The record had no resolvable identifier and was intentionally
    /// excluded, with no side effects.
    Dropped,
}

/// Single owner of a run's accumulated state.
///
/// Per record, `emit` performs exactly one directory-ensure, one detail
/// file write, and the facet set insertions; only the compact summary side
/// stays in memory. Duplicate ids keep both index entries while the later
/// detail write physically replaces the earlier file.
pub struct OutputSink {
    trials_dir: PathBuf,
    aliases: AliasTable,
    entries: Vec<SummaryEntry>,
    facets: FacetMap,
}

impl OutputSink {
    /// A sink writing detail files under `output_dir`. Directories are
    /// created lazily on first use.
    pub fn new(output_dir: &Path) -> Self {
        Self {
            trials_dir: output_dir.join(TRIALS_SUBDIR),
            aliases: AliasTable::default(),
            entries: Vec::new(),
            facets: FacetMap::new(),
        }
    }

    /// Replaces the alias table consulted during summary projection.
    #[must_use]
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Processes one raw record end to end.
    pub fn emit(&mut self, record: &Value) -> Result<EmitOutcome> {
        let Some(entry) = to_summary(record, &self.aliases) else {
            return Ok(EmitOutcome::Dropped);
        };
        let detail = to_detail(record, &entry.id);

        let shard_dir = self.trials_dir.join(shard_key(&entry.id));
        fs::create_dir_all(&shard_dir).map_err(|source| OutputError::CreateDir {
            path: shard_dir.clone(),
            source,
        })?;

        let detail_path = shard_dir.join(format!("{}.json", entry.id));
        let bytes = serde_json::to_vec(&detail).map_err(|source| OutputError::Serialize {
            what: format!("detail record {}", entry.id),
            source,
        })?;
        fs::write(&detail_path, bytes).map_err(|source| OutputError::WriteFile {
            path: detail_path.clone(),
            source,
        })?;
        trace!(id = %entry.id, path = %detail_path.display(), "detail written");

        self.facets.insert_all(&entry.interventions, &entry.id);
        let id = entry.id.clone();
        self.entries.push(entry);
        Ok(EmitOutcome::Indexed { id })
    }

    /// Number of index entries accumulated so far.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of facet keys accumulated so far.
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Drains the sink for finalization.
    pub fn into_parts(self) -> (Vec<SummaryEntry>, FacetMap) {
        (self.entries, self.facets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(id: &str, intervention: &str) -> Value {
        json!({
            "protocolSection": {
                "identificationModule": { "nctId": id },
                "armsInterventionsModule": {
                    "interventions": [ { "name": intervention } ]
                }
            }
        })
    }

    #[test]
    fn shard_key_is_deterministic_and_uppercased() {
        assert_eq!(shard_key("NCT00000001"), "NCT0");
        assert_eq!(shard_key("nct0051"), "NCT0");
        assert_eq!(shard_key("ab"), "AB");
    }

    #[test]
    fn emit_writes_the_sharded_detail_file() {
        let dir = TempDir::new().unwrap();
        let mut sink = OutputSink::new(dir.path());

        let outcome = sink.emit(&record("NCT00000001", "Xyrem")).unwrap();
        assert_eq!(
            outcome,
            EmitOutcome::Indexed {
                id: "NCT00000001".to_string()
            }
        );

        let detail_path = dir.path().join("trials/NCT0/NCT00000001.json");
        let contents = std::fs::read_to_string(&detail_path).unwrap();
        let detail: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(detail["id"], "NCT00000001");
    }

    #[test]
    fn dropped_records_have_no_side_effects() {
        let dir = TempDir::new().unwrap();
        let mut sink = OutputSink::new(dir.path());

        let no_id = json!({ "protocolSection": {} });
        assert_eq!(sink.emit(&no_id).unwrap(), EmitOutcome::Dropped);
        assert_eq!(sink.entry_count(), 0);
        assert_eq!(sink.facet_count(), 0);
        assert!(!dir.path().join(TRIALS_SUBDIR).exists());
    }

    #[test]
    fn duplicate_ids_keep_both_entries_and_one_file() {
        let dir = TempDir::new().unwrap();
        let mut sink = OutputSink::new(dir.path());

        sink.emit(&record("NCT1", "Xyrem")).unwrap();
        sink.emit(&record("NCT1", "Placebo")).unwrap();

        assert_eq!(sink.entry_count(), 2);
        let shard_dir = dir.path().join("trials/NCT1");
        let files: Vec<_> = std::fs::read_dir(&shard_dir).unwrap().collect();
        assert_eq!(files.len(), 1);
        // Last write wins on disk.
        let contents = std::fs::read_to_string(shard_dir.join("NCT1.json")).unwrap();
        assert!(contents.contains("Placebo"));
    }

    #[test]
    fn facets_accumulate_canonical_names() {
        let dir = TempDir::new().unwrap();
        let mut sink = OutputSink::new(dir.path());

        sink.emit(&record("NCT1", "Xyrem")).unwrap();
        sink.emit(&record("NCT2", "sodium oxybate injection")).unwrap();

        let (_, facets) = sink.into_parts();
        let ids = facets.ids_for("Sodium Oxybate").unwrap();
        assert!(ids.contains("NCT1"));
        assert!(ids.contains("NCT2"));
    }
}
