//! Modal dialog driver trait.
//!
//! A driver renders a [`FormDescription`], blocks until the user confirms or
//! cancels, and hands back the raw control values. Drivers take the form by
//! value: a description is shown at most once.

use tracing::debug;

use crate::error::{PresentationError, PresentationResult};

use super::form::FormDescription;

/// Control values read from a confirmed dialog, before any validation
#[derive(Debug, Clone, PartialEq)]
pub struct RawValues {
    /// Display key of the selected root family
    pub root_family: Option<String>,
    /// Value of the generation spinner as displayed
    pub layout_max_depth: f64,
    /// State of the "Forename first" checkbox
    pub forename_first: bool,
}

/// How a modal dialog was closed
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResponse {
    /// OK pressed; carries the control values at that moment
    Confirmed(RawValues),
    /// Cancel pressed or the dialog dismissed another way
    Cancelled,
}

/// Trait for modal dialog renderers.
pub trait ModalDriver {
    /// Shows `form` modally and waits for the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be created or fails while
    /// open. Dismissal is not an error; it yields [`DialogResponse::Cancelled`].
    fn run(&mut self, form: FormDescription) -> PresentationResult<DialogResponse>;
}

impl<T: ModalDriver + ?Sized> ModalDriver for &mut T {
    fn run(&mut self, form: FormDescription) -> PresentationResult<DialogResponse> {
        (**self).run(form)
    }
}

impl<T: ModalDriver + ?Sized> ModalDriver for Box<T> {
    fn run(&mut self, form: FormDescription) -> PresentationResult<DialogResponse> {
        (**self).run(form)
    }
}

/// What a [`ScriptedDriver`] does when run
#[derive(Debug, Clone)]
enum Script {
    Confirm,
    Cancel,
    Fail(String),
}

/// A headless driver that replays a fixed user action.
///
/// Useful for tests and for hosts that accept the dialog's values
/// non-interactively. Overrides are applied on top of the form's defaults.
#[derive(Debug, Clone)]
pub struct ScriptedDriver {
    script: Script,
    root_family: Option<String>,
    layout_max_depth: Option<f64>,
    forename_first: Option<bool>,
    shown: Vec<FormDescription>,
}

impl ScriptedDriver {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            root_family: None,
            layout_max_depth: None,
            forename_first: None,
            shown: Vec::new(),
        }
    }

    /// A driver that presses OK
    #[must_use]
    pub fn confirm() -> Self {
        Self::with_script(Script::Confirm)
    }

    /// A driver that presses Cancel
    #[must_use]
    pub fn cancel() -> Self {
        Self::with_script(Script::Cancel)
    }

    /// A driver whose surface cannot be created
    #[must_use]
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(reason.into()))
    }

    /// Selects a list entry by display key before confirming
    #[must_use]
    pub fn select(mut self, key: impl Into<String>) -> Self {
        self.root_family = Some(key.into());
        self
    }

    /// Sets the spinner value before confirming
    #[must_use]
    pub const fn depth(mut self, value: f64) -> Self {
        self.layout_max_depth = Some(value);
        self
    }

    /// Sets the checkbox state before confirming
    #[must_use]
    pub const fn forename_first(mut self, checked: bool) -> Self {
        self.forename_first = Some(checked);
        self
    }

    /// Forms this driver has been shown, oldest first
    #[must_use]
    pub fn shown(&self) -> &[FormDescription] {
        &self.shown
    }
}

impl ModalDriver for ScriptedDriver {
    fn run(&mut self, form: FormDescription) -> PresentationResult<DialogResponse> {
        debug!(title = %form.title, script = ?self.script, "Scripted dialog run");
        if let Script::Fail(reason) = &self.script {
            return Err(PresentationError::SurfaceUnavailable(reason.clone()));
        }

        let mut values = form.raw_values()?;
        self.shown.push(form);
        if matches!(self.script, Script::Cancel) {
            return Ok(DialogResponse::Cancelled);
        }

        if let Some(root) = &self.root_family {
            values.root_family = Some(root.clone());
        }
        if let Some(depth) = self.layout_max_depth {
            values.layout_max_depth = depth;
        }
        if let Some(checked) = self.forename_first {
            values.forename_first = checked;
        }
        Ok(DialogResponse::Confirmed(values))
    }
}
