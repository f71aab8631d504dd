//! `gedimport` Core Library
//!
//! This crate provides the import configuration dialog that sits between a
//! genealogical data parser and a document import pipeline: it indexes the
//! families of a GEDCOM file, lets the user pick a root family, a generation
//! depth and a name order, and hands the choices back to the host as a
//! property bag.

pub mod adapter;
pub mod config;
pub mod diagnostics;
pub mod dialog;
pub mod error;
pub mod family_index;
pub mod gedcom;
pub mod models;
pub mod tracing;

pub use adapter::{AdapterState, ImportDialogAdapter, ImportRequest, Outcome, URL};
pub use config::{ImportSettings, SettingsManager};
pub use diagnostics::{DiagnosticSink, RecordingDiagnostics, TracingDiagnostics};
pub use dialog::{
    build_import_form, DialogResponse, FormDescription, ModalDriver, RawValues, ScriptedDriver,
};
pub use error::{
    ConfigError, ConfigResult, ExtractionError, Fault, FaultKind, GedImportError,
    PresentationError, ProtocolError,
};
pub use family_index::FamilyIndex;
pub use gedcom::{FamilySource, GedcomParser};
pub use models::{Family, ImportFilterData, NameOrder, Person, Property, PropertyBag, PropertyValue};
