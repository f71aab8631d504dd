//! Property-based tests for the import dialog adapter
//!
//! Cancellation leaves the host's properties untouched, confirmation maps
//! control values consistently, and faults never escape.

use gedimport_core::models::{Property, PropertyValue};
use gedimport_core::{
    FaultKind, GedcomParser, ImportDialogAdapter, ImportFilterData, NameOrder, Outcome,
    PropertyBag, RecordingDiagnostics, ScriptedDriver, URL,
};
use proptest::prelude::*;
use tempfile::TempDir;

use crate::fixtures::{file_url, write_gedcom, SAMPLE_GEDCOM};

// ========== Generators ==========

/// Strategy for host property names other than `URL`
fn arb_extra_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z]{0,11}".prop_filter("URL is supplied separately", |n| n != URL)
}

/// Strategy for scalar property values
fn arb_scalar() -> impl Strategy<Value = PropertyValue> {
    prop_oneof![
        "[a-z0-9 ]{0,12}".prop_map(PropertyValue::String),
        any::<i64>().prop_map(PropertyValue::Int),
        any::<bool>().prop_map(PropertyValue::Bool),
    ]
}

/// Strategy for extra host properties with distinct names
fn arb_extra_properties() -> impl Strategy<Value = Vec<Property>> {
    prop::collection::btree_map(arb_extra_name(), arb_scalar(), 0..6).prop_map(|map| {
        map.into_iter()
            .map(|(name, value)| Property { name, value })
            .collect()
    })
}

// ========== Property Tests ==========

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Cancelling leaves the output properties equal to the input properties.
    #[test]
    fn cancel_preserves_properties(extra in arb_extra_properties()) {
        let temp = TempDir::new().unwrap();
        let path = write_gedcom(temp.path(), "tree.ged", SAMPLE_GEDCOM);

        let mut input = vec![Property::new(URL, file_url(&path))];
        input.extend(extra);

        let recorder = RecordingDiagnostics::new();
        let mut adapter = ImportDialogAdapter::new(GedcomParser::new(), ScriptedDriver::cancel())
            .with_diagnostics(recorder.clone());
        adapter.set_property_values(input.clone());

        prop_assert_eq!(adapter.execute(), Outcome::Cancelled);
        prop_assert_eq!(adapter.get_property_values(), input);
        prop_assert!(recorder.is_empty());
    }

    /// The output depth is the spinner value rounded and clamped at zero.
    #[test]
    fn depth_is_non_negative_integer(depth in -1_000.0f64..1_000.0) {
        let temp = TempDir::new().unwrap();
        let path = write_gedcom(temp.path(), "tree.ged", SAMPLE_GEDCOM);

        let mut adapter = ImportDialogAdapter::new(
            GedcomParser::new(),
            ScriptedDriver::confirm().depth(depth),
        )
        .with_diagnostics(RecordingDiagnostics::new());
        adapter.set_property_values(vec![Property::new(URL, file_url(&path))]);

        prop_assert_eq!(adapter.execute(), Outcome::Confirmed);
        let data = adapter.filter_data().unwrap();
        let expected = if depth <= 0.0 { 0 } else { depth.round() as u32 };
        prop_assert_eq!(data.layout_max_depth, expected);
    }

    /// The checkbox state alone decides the name order; other values are
    /// unaffected by it.
    #[test]
    fn checkbox_selects_name_order(checked in any::<bool>(), depth in 0u32..20) {
        let temp = TempDir::new().unwrap();
        let path = write_gedcom(temp.path(), "tree.ged", SAMPLE_GEDCOM);

        let mut adapter = ImportDialogAdapter::new(
            GedcomParser::new(),
            ScriptedDriver::confirm()
                .select("F3 (Smith-Jones)")
                .depth(f64::from(depth))
                .forename_first(checked),
        )
        .with_diagnostics(RecordingDiagnostics::new());
        adapter.set_property_values(vec![Property::new(URL, file_url(&path))]);
        prop_assert_eq!(adapter.execute(), Outcome::Confirmed);

        let out: PropertyBag = adapter.get_property_values().into_iter().collect();
        let data = ImportFilterData::from_host_bag(&out, adapter.settings())
            .unwrap()
            .unwrap();
        prop_assert_eq!(data.root_family, "F3");
        prop_assert_eq!(data.layout_max_depth, depth);
        let expected = if checked { NameOrder::ForenameFirst } else { NameOrder::SurnameFirst };
        prop_assert_eq!(data.name_order, expected);
    }

    /// An unreadable source yields Cancelled, an unchanged bag and exactly
    /// one extraction report.
    #[test]
    fn unreadable_source_reports_once(name in "[a-z]{1,12}") {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join(format!("{name}.ged"));
        let input = vec![Property::new(URL, file_url(&missing))];

        let recorder = RecordingDiagnostics::new();
        let mut adapter = ImportDialogAdapter::new(GedcomParser::new(), ScriptedDriver::confirm())
            .with_diagnostics(recorder.clone());
        adapter.set_property_values(input.clone());

        prop_assert_eq!(adapter.execute(), Outcome::Cancelled);
        prop_assert_eq!(adapter.get_property_values(), input);
        prop_assert_eq!(recorder.kinds(), vec![FaultKind::Extraction]);
        prop_assert!(adapter.driver().shown().is_empty());
    }
}
