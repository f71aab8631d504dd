//! Property-based tests for the family index
//!
//! Entry count, display ordering and idempotence of index building.

use std::collections::{HashMap, HashSet};

use gedimport_core::family_index::{display_key, FamilyIndex};
use gedimport_core::models::Family;
use gedimport_core::{FamilySource, GedcomParser};
use proptest::prelude::*;
use tempfile::TempDir;

use crate::fixtures::{family, render_gedcom, write_gedcom};

// ========== Generators ==========

/// Strategy for optional surnames, including the empty string
fn arb_surname() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Z][a-z]{0,8}|")
}

/// Strategy for families with ids `F<n>`; ids may repeat
fn arb_families() -> impl Strategy<Value = Vec<Family>> {
    prop::collection::vec((0u32..50, arb_surname(), arb_surname()), 0..30).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(n, h, w)| family(&format!("F{n}"), h.as_deref(), w.as_deref()))
            .collect()
    })
}

/// Strategy for a shuffled list of distinct family numbers
fn arb_shuffled_numbers() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::hash_set(0u32..100_000, 1..40)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn numeric_suffix(key: &str) -> u32 {
    let id = key.split(' ').next().unwrap_or_default();
    id.trim_start_matches('F').parse().unwrap()
}

// ========== Property Tests ==========

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The index holds exactly one entry per distinct family identifier,
    /// whatever the persons and surnames look like.
    #[test]
    fn entry_count_matches_distinct_ids(families in arb_families()) {
        let distinct: HashSet<String> = families.iter().map(|f| f.id.clone()).collect();
        let index = FamilyIndex::from_families(families);
        prop_assert_eq!(index.len(), distinct.len());
        prop_assert_eq!(index.keys().len(), index.iter().count());
    }

    /// Keys are strictly increasing in the numeric part of the identifier
    /// for any input order.
    #[test]
    fn keys_sorted_by_numeric_suffix(numbers in arb_shuffled_numbers()) {
        let families: Vec<Family> = numbers
            .iter()
            .map(|n| family(&format!("F{n}"), None, None))
            .collect();
        let index = FamilyIndex::from_families(families);

        let suffixes: Vec<u32> = index.keys().iter().map(|k| numeric_suffix(k)).collect();
        prop_assert_eq!(suffixes.len(), numbers.len());
        for pair in suffixes.windows(2) {
            prop_assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    /// Every key resolves back to a family whose display key is that key.
    #[test]
    fn keys_resolve_to_their_family(families in arb_families()) {
        let index = FamilyIndex::from_families(families);
        for key in index.keys() {
            let family = index.get(key);
            prop_assert!(family.is_some());
            prop_assert_eq!(&display_key(family.unwrap()), key);
        }
    }

    /// Building the index twice from the same file gives the same keys and
    /// the same identifier-to-key associations.
    #[test]
    fn building_from_file_is_idempotent(families in arb_families()) {
        let temp = TempDir::new().unwrap();
        let path = write_gedcom(temp.path(), "tree.ged", &render_gedcom(&families));
        let parser = GedcomParser::new();

        let first = FamilyIndex::build(&parser, &path).unwrap();
        let second = FamilyIndex::build(&parser, &path).unwrap();

        prop_assert_eq!(first.keys(), second.keys());
        let associations = |index: &FamilyIndex| -> HashMap<String, String> {
            index
                .iter()
                .map(|(key, family)| (family.id.clone(), key.to_string()))
                .collect()
        };
        prop_assert_eq!(associations(&first), associations(&second));
        prop_assert_eq!(parser.load_families(&path).unwrap().len(), first.len());
    }
}

#[test]
fn f1_f10_f2_sorts_numerically() {
    let index = FamilyIndex::from_families(vec![
        family("F1", None, None),
        family("F10", None, None),
        family("F2", None, None),
    ]);
    let ids: Vec<&str> = index.iter().map(|(_, f)| f.id.as_str()).collect();
    assert_eq!(ids, vec!["F1", "F2", "F10"]);
}
