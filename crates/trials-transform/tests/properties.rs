//! Property tests for the normalization steps.

use proptest::prelude::*;

use trials_transform::AliasTable;
use trials_transform::text::normalize_facet_name;

proptest! {
    #[test]
    fn alias_canonicalization_is_idempotent(name in ".{0,64}") {
        let table = AliasTable::default();
        let once = table.canonicalize(&name);
        let twice = table.canonicalize(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn facet_normalization_is_idempotent(name in ".{0,64}") {
        let once = normalize_facet_name(&name);
        let twice = normalize_facet_name(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn facet_keys_are_trimmed_single_spaced_ascii(name in ".{0,64}") {
        let key = normalize_facet_name(&name);
        prop_assert!(!key.starts_with(' '));
        prop_assert!(!key.ends_with(' '));
        prop_assert!(!key.contains("  "));
        prop_assert!(
            key.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ')
        );
    }
}
