//! Tracing conventions shared across the crate.

/// Span names used with `info_span!`
pub mod span_names {
    /// Loading families from a source file
    pub const FAMILY_LOAD: &str = "gedimport.family.load";
    /// Building the family index
    pub const FAMILY_INDEX: &str = "gedimport.family.index";
    /// Building the dialog form description
    pub const FORM_BUILD: &str = "gedimport.dialog.form_build";
    /// Running the modal dialog
    pub const DIALOG_RUN: &str = "gedimport.dialog.run";
    /// One full adapter interaction
    pub const ADAPTER_EXECUTE: &str = "gedimport.adapter.execute";
}
