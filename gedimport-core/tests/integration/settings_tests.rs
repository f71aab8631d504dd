//! Integration tests for stored settings driving the import dialog

use std::fs;

use gedimport_core::dialog::{control_names, ControlKind};
use gedimport_core::models::NODE_LABEL_IMAGE;
use gedimport_core::{
    ConfigError, GedcomParser, ImportDialogAdapter, ImportSettings, Outcome, PropertyBag,
    PropertyValue, RecordingDiagnostics, ScriptedDriver, SettingsManager,
};
use tempfile::TempDir;

use crate::fixtures::{input_properties, write_gedcom, SAMPLE_GEDCOM};

fn custom_settings() -> ImportSettings {
    ImportSettings {
        layout_max_depth: 3,
        forename_first: false,
        node_label_image: "%(forename)s %(surname)s".to_string(),
        node_label_image_swapped: "%(surname)s, %(forename)s".to_string(),
        dialog_title: "Family tree import".to_string(),
    }
}

#[test]
fn test_saved_settings_drive_form_defaults() {
    let config = TempDir::new().unwrap();
    let manager = SettingsManager::with_config_dir(config.path().join("gedimport"));
    manager.save_settings(&custom_settings()).unwrap();

    let settings = manager.load_settings().unwrap();
    assert_eq!(settings, custom_settings());

    let data = TempDir::new().unwrap();
    let path = write_gedcom(data.path(), "tree.ged", SAMPLE_GEDCOM);
    let mut adapter = ImportDialogAdapter::new(GedcomParser::new(), ScriptedDriver::confirm())
        .with_settings(settings)
        .with_diagnostics(RecordingDiagnostics::new());
    adapter.set_property_values(input_properties(&path));
    assert_eq!(adapter.execute(), Outcome::Confirmed);

    let form = &adapter.driver().shown()[0];
    assert_eq!(form.title, "Family tree import");
    assert!(matches!(
        form.control(control_names::LAYOUT_MAX).map(|c| &c.kind),
        Some(ControlKind::NumericField { value, .. }) if (*value - 3.0).abs() < f64::EPSILON
    ));
    assert!(matches!(
        form.control(control_names::NAME_ORDER).map(|c| &c.kind),
        Some(ControlKind::CheckBox { checked: false, .. })
    ));

    let out: PropertyBag = adapter.get_property_values().into_iter().collect();
    let Some(PropertyValue::Sequence(nested)) = out.get("FilterData") else {
        panic!("FilterData missing");
    };
    let nested: PropertyBag = nested.iter().cloned().collect();
    assert_eq!(
        nested.get_str(NODE_LABEL_IMAGE).unwrap(),
        Some("%(surname)s, %(forename)s")
    );
}

#[test]
fn test_partial_settings_file_uses_defaults() {
    let config = TempDir::new().unwrap();
    let manager = SettingsManager::with_config_dir(config.path().to_path_buf());
    fs::write(manager.settings_path(), "layout_max_depth = 8\n").unwrap();

    let settings = manager.load_settings().unwrap();
    assert_eq!(settings.layout_max_depth, 8);
    assert!(settings.forename_first);
    assert_eq!(settings.dialog_title, ImportSettings::default().dialog_title);
}

#[test]
fn test_identical_templates_rejected_on_load() {
    let config = TempDir::new().unwrap();
    let manager = SettingsManager::with_config_dir(config.path().to_path_buf());
    fs::write(
        manager.settings_path(),
        "node_label_image = \"x\"\nnode_label_image_swapped = \"x\"\n",
    )
    .unwrap();

    assert!(matches!(
        manager.load_settings(),
        Err(ConfigError::Validation { .. })
    ));
}

#[test]
fn test_set_title_overrides_configured_title() {
    let data = TempDir::new().unwrap();
    let path = write_gedcom(data.path(), "tree.ged", SAMPLE_GEDCOM);
    let mut adapter = ImportDialogAdapter::new(GedcomParser::new(), ScriptedDriver::cancel())
        .with_settings(custom_settings())
        .with_diagnostics(RecordingDiagnostics::new());
    adapter.set_title("Import into Untitled 1");
    adapter.set_property_values(input_properties(&path));
    adapter.execute();

    assert_eq!(adapter.driver().shown()[0].title, "Import into Untitled 1");
}
