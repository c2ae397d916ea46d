//! The inverted intervention facet index.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use trials_transform::text::normalize_facet_name;

/// Mapping from normalized intervention name to the trial ids using it.
///
/// Insertion is set union, so construction is associative and commutative:
/// any processing order of the same records yields the same map. BTree
/// containers make the persisted artifact deterministic as well - keys and
/// id lists come out sorted, and the consumer treats the lists as unordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FacetMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl FacetMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `id` with the normalized form of `name`. Names that
    /// normalize to nothing are skipped.
    pub fn insert(&mut self, name: &str, id: &str) {
        let key = normalize_facet_name(name);
        if key.is_empty() {
            return;
        }
        self.entries.entry(key).or_default().insert(id.to_string());
    }

    /// Associates `id` with every name in `names`.
    pub fn insert_all<S: AsRef<str>>(&mut self, names: &[S], id: &str) {
        for name in names {
            self.insert(name.as_ref(), id);
        }
    }

    /// Ids recorded under the normalized form of `name`.
    pub fn ids_for(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(&normalize_facet_name(name))
    }

    /// Number of distinct facet keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no facet has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, ids)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_normalized_on_insert() {
        let mut map = FacetMap::new();
        map.insert("Sodium Oxybate", "NCT1");
        map.insert("sodium--oxybate", "NCT2");
        let ids = map.ids_for("SODIUM OXYBATE").unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn empty_keys_are_skipped() {
        let mut map = FacetMap::new();
        map.insert("  --  ", "NCT1");
        assert!(map.is_empty());
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let pairs = [
            ("Modafinil", "NCT3"),
            ("Sodium Oxybate", "NCT1"),
            ("Modafinil", "NCT1"),
            ("Sodium Oxybate", "NCT2"),
        ];
        let mut forward = FacetMap::new();
        for (name, id) in pairs {
            forward.insert(name, id);
        }
        let mut backward = FacetMap::new();
        for (name, id) in pairs.iter().rev() {
            backward.insert(name, id);
        }
        assert_eq!(forward, backward);
    }

    #[test]
    fn duplicate_ids_collapse() {
        let mut map = FacetMap::new();
        map.insert("Placebo", "NCT1");
        map.insert("Placebo", "NCT1");
        assert_eq!(map.ids_for("placebo").unwrap().len(), 1);
    }

    #[test]
    fn serializes_as_object_of_id_arrays() {
        let mut map = FacetMap::new();
        map.insert_all(&["Sodium Oxybate", "Placebo"], "NCT1");
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value["sodium oxybate"][0], "NCT1");
        assert_eq!(value["placebo"][0], "NCT1");
    }
}
