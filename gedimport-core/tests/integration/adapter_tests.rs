//! Integration tests for the import dialog over real GEDCOM files

use gedimport_core::dialog::{control_names, ControlKind};
use gedimport_core::models::{LAYOUT_MAX_DEPTH, NODE_LABEL_IMAGE, ROOT_FAMILY};
use gedimport_core::{
    AdapterState, FaultKind, GedcomParser, ImportDialogAdapter, ImportFilterData, ImportSettings,
    NameOrder, Outcome, PropertyBag, PropertyValue, RecordingDiagnostics, ScriptedDriver,
};
use tempfile::TempDir;

use crate::fixtures::{input_properties, write_gedcom, SAMPLE_GEDCOM};

fn run(
    dir: &TempDir,
    file_name: &str,
    driver: ScriptedDriver,
) -> (
    ImportDialogAdapter<GedcomParser, ScriptedDriver>,
    RecordingDiagnostics,
    Outcome,
) {
    let path = write_gedcom(dir.path(), file_name, SAMPLE_GEDCOM);
    let recorder = RecordingDiagnostics::new();
    let mut adapter =
        ImportDialogAdapter::new(GedcomParser::new(), driver).with_diagnostics(recorder.clone());
    adapter.set_property_values(input_properties(&path));
    let outcome = adapter.execute();
    (adapter, recorder, outcome)
}

fn filter_data(out: &PropertyBag) -> PropertyBag {
    match out.get("FilterData") {
        Some(PropertyValue::Sequence(props)) => props.iter().cloned().collect(),
        other => panic!("FilterData missing or malformed: {other:?}"),
    }
}

#[test]
fn test_list_shows_families_in_numeric_order() {
    let temp = TempDir::new().unwrap();
    let (adapter, recorder, outcome) = run(&temp, "tree.ged", ScriptedDriver::cancel());

    assert_eq!(outcome, Outcome::Cancelled);
    assert!(recorder.is_empty());

    let form = &adapter.driver().shown()[0];
    let Some(ControlKind::ListBox {
        items, selected, ..
    }) = form.control(control_names::ROOT_FAMILY).map(|c| &c.kind)
    else {
        panic!("root family control missing");
    };
    assert_eq!(items, &["F2 (-)", "F3 (Smith-Jones)", "F10 (Smith-)"]);
    assert_eq!(*selected, Some(0));
}

#[test]
fn test_confirm_forename_first() {
    let temp = TempDir::new().unwrap();
    let driver = ScriptedDriver::confirm()
        .select("F3 (Smith-Jones)")
        .depth(4.0)
        .forename_first(true);
    let (adapter, recorder, outcome) = run(&temp, "tree.ged", driver);

    assert_eq!(outcome, Outcome::Confirmed);
    assert_eq!(adapter.state(), AdapterState::Confirmed);
    assert!(recorder.is_empty());

    let out: PropertyBag = adapter.get_property_values().into_iter().collect();
    assert_eq!(out.get_str("FilterName").unwrap(), Some("GEDCOM"));

    let nested = filter_data(&out);
    assert_eq!(nested.get_str(ROOT_FAMILY).unwrap(), Some("F3"));
    assert_eq!(nested.get(LAYOUT_MAX_DEPTH), Some(&PropertyValue::Int(4)));
    assert_eq!(
        nested.get_str(NODE_LABEL_IMAGE).unwrap(),
        Some(ImportSettings::default().node_label_image.as_str())
    );
}

#[test]
fn test_confirm_surname_first() {
    let temp = TempDir::new().unwrap();
    let driver = ScriptedDriver::confirm()
        .select("F3 (Smith-Jones)")
        .depth(4.0)
        .forename_first(false);
    let (adapter, _recorder, outcome) = run(&temp, "tree.ged", driver);
    assert_eq!(outcome, Outcome::Confirmed);

    let out: PropertyBag = adapter.get_property_values().into_iter().collect();
    let data = ImportFilterData::from_host_bag(&out, adapter.settings())
        .unwrap()
        .unwrap();
    assert_eq!(
        data,
        ImportFilterData {
            root_family: "F3".to_string(),
            layout_max_depth: 4,
            name_order: NameOrder::SurnameFirst,
        }
    );
    assert_eq!(
        filter_data(&out).get_str(NODE_LABEL_IMAGE).unwrap(),
        Some(ImportSettings::default().node_label_image_swapped.as_str())
    );
}

#[test]
fn test_confirm_with_defaults_selects_first_family() {
    let temp = TempDir::new().unwrap();
    let (adapter, _recorder, outcome) = run(&temp, "tree.ged", ScriptedDriver::confirm());
    assert_eq!(outcome, Outcome::Confirmed);

    let data = adapter.filter_data().unwrap();
    assert_eq!(data.root_family, "F2");
    assert_eq!(data.layout_max_depth, 5);
    assert_eq!(data.name_order, NameOrder::ForenameFirst);
}

#[test]
fn test_url_with_escaped_spaces() {
    let temp = TempDir::new().unwrap();
    let (adapter, recorder, outcome) = run(
        &temp,
        "my family tree.ged",
        ScriptedDriver::confirm().select("F10 (Smith-)"),
    );

    assert_eq!(outcome, Outcome::Confirmed);
    assert!(recorder.is_empty());
    assert_eq!(adapter.filter_data().unwrap().root_family, "F10");
}

#[test]
fn test_empty_file_confirm_is_presentation_fault() {
    let temp = TempDir::new().unwrap();
    let path = write_gedcom(temp.path(), "empty.ged", "0 HEAD\n0 TRLR\n");
    let recorder = RecordingDiagnostics::new();
    let mut adapter = ImportDialogAdapter::new(GedcomParser::new(), ScriptedDriver::confirm())
        .with_diagnostics(recorder.clone());
    adapter.set_property_values(input_properties(&path));

    assert_eq!(adapter.execute(), Outcome::Cancelled);
    assert_eq!(recorder.kinds(), vec![FaultKind::Presentation]);
    assert_eq!(adapter.get_property_values(), input_properties(&path));
}

#[test]
fn test_malformed_file_is_extraction_fault() {
    let temp = TempDir::new().unwrap();
    let path = write_gedcom(temp.path(), "broken.ged", "0 HEAD\nnot a gedcom line\n");
    let recorder = RecordingDiagnostics::new();
    let mut adapter = ImportDialogAdapter::new(GedcomParser::new(), ScriptedDriver::confirm())
        .with_diagnostics(recorder.clone());
    adapter.set_property_values(input_properties(&path));

    assert_eq!(adapter.execute(), Outcome::Cancelled);
    assert_eq!(adapter.state(), AdapterState::Failed);
    assert_eq!(recorder.kinds(), vec![FaultKind::Extraction]);
    assert!(recorder.reports()[0].text.contains("line 2"));
}
