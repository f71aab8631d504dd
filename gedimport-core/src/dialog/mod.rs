//! Import dialog: form description and modal drivers.

mod driver;
pub mod form;

pub use driver::{DialogResponse, ModalDriver, RawValues, ScriptedDriver};
pub use form::{
    build_import_form, control_names, ButtonRole, Control, ControlKind, FormBuilder,
    FormDescription, Rect,
};
