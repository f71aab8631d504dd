//! Dialog form description.
//!
//! A form is a flat list of typed control descriptors laid out on a two
//! column label/input grid with a confirm/cancel row underneath. It describes
//! the dialog without rendering it; a [`super::ModalDriver`] turns it into a
//! live surface.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::config::ImportSettings;
use crate::error::{PresentationError, PresentationResult};
use crate::family_index::FamilyIndex;
use crate::tracing::span_names;

use super::driver::RawValues;

/// Names of the controls in the import form
pub mod control_names {
    /// "Root family" label
    pub const ROOT_FAMILY_LABEL: &str = "ftRootFamily";
    /// Root family list box
    pub const ROOT_FAMILY: &str = "lbRootFamily";
    /// "Number of generations to show" label
    pub const LAYOUT_MAX_LABEL: &str = "ftLayoutMax";
    /// Generation depth spinner
    pub const LAYOUT_MAX: &str = "nfLayoutMax";
    /// "Name order" label
    pub const NAME_ORDER_LABEL: &str = "ftNameOrder";
    /// "Forename first" checkbox
    pub const NAME_ORDER: &str = "cbNameOrder";
    /// Confirm button
    pub const OK: &str = "btnOk";
    /// Cancel button
    pub const CANCEL: &str = "btnCancel";
}

/// Margin around the controls, in dialog units
pub const MARGIN: u32 = 10;
/// Height of every control row
pub const ROW_HEIGHT: u32 = 10;
/// Vertical gap between rows
pub const ROW_SPACING: u32 = 10;
/// Width of the label column
pub const LABEL_WIDTH: u32 = 100;
/// Width of the input column
pub const INPUT_WIDTH: u32 = 100;
/// Horizontal gap between the columns and between the buttons
pub const COLUMN_SPACING: u32 = 10;
/// Width of a push button
pub const BUTTON_WIDTH: u32 = 50;

/// Position and size in dialog units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// What a push button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonRole {
    /// Closes the dialog and confirms
    Ok,
    /// Closes the dialog and cancels
    Cancel,
}

/// Kind-specific attributes of a control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlKind {
    /// Static text
    Label {
        /// Text shown
        text: String,
    },
    /// Single-selection list
    ListBox {
        /// Entries in display order
        items: Vec<String>,
        /// Index of the selected entry
        selected: Option<usize>,
        /// Rendered as a dropdown rather than an open list
        dropdown: bool,
    },
    /// Numeric field with spin buttons
    NumericField {
        /// Current value
        value: f64,
        /// Smallest accepted value
        min: f64,
        /// Digits after the decimal point
        decimal_accuracy: u8,
        /// Show spin buttons
        spin: bool,
    },
    /// Two-state checkbox
    CheckBox {
        /// Text next to the box
        label: String,
        /// Current state
        checked: bool,
    },
    /// Push button
    Button {
        /// Text on the button
        label: String,
        /// Effect of pressing it
        role: ButtonRole,
        /// Activated by Enter
        is_default: bool,
    },
}

/// One control of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Unique name within the form
    pub name: String,
    /// Keyboard focus order
    pub tab_index: u16,
    /// Geometry
    pub bounds: Rect,
    /// Kind and attributes
    pub kind: ControlKind,
}

/// A complete dialog description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDescription {
    /// Window title
    pub title: String,
    /// Dialog geometry; always fits every control plus [`MARGIN`]
    pub bounds: Rect,
    /// Controls in tab order
    pub controls: Vec<Control>,
}

impl FormDescription {
    /// Looks up a control by name
    #[must_use]
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name == name)
    }

    /// Looks up a control by name for editing
    pub fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.name == name)
    }

    /// Returns the label placed on the same row to the left of `control`
    #[must_use]
    pub fn label_for(&self, control: &Control) -> Option<&str> {
        self.controls.iter().find_map(|c| match &c.kind {
            ControlKind::Label { text }
                if c.bounds.y == control.bounds.y && c.bounds.right() <= control.bounds.x =>
            {
                Some(text.as_str())
            }
            _ => None,
        })
    }

    /// Reads the current control state of the import form
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError::SurfaceUnavailable`] if one of the three
    /// input controls is missing or of the wrong kind.
    pub fn raw_values(&self) -> PresentationResult<RawValues> {
        let root_family = match self.input(control_names::ROOT_FAMILY)? {
            ControlKind::ListBox {
                items, selected, ..
            } => selected.and_then(|i| items.get(i)).cloned(),
            _ => return Err(wrong_kind(control_names::ROOT_FAMILY)),
        };
        let layout_max_depth = match self.input(control_names::LAYOUT_MAX)? {
            ControlKind::NumericField { value, .. } => *value,
            _ => return Err(wrong_kind(control_names::LAYOUT_MAX)),
        };
        let forename_first = match self.input(control_names::NAME_ORDER)? {
            ControlKind::CheckBox { checked, .. } => *checked,
            _ => return Err(wrong_kind(control_names::NAME_ORDER)),
        };
        Ok(RawValues {
            root_family,
            layout_max_depth,
            forename_first,
        })
    }

    fn input(&self, name: &str) -> PresentationResult<&ControlKind> {
        self.control(name).map(|c| &c.kind).ok_or_else(|| {
            PresentationError::SurfaceUnavailable(format!("form has no {name} control"))
        })
    }
}

fn wrong_kind(name: &str) -> PresentationError {
    PresentationError::SurfaceUnavailable(format!("control {name} has an unexpected kind"))
}

/// Lays controls out on the label/input grid.
#[derive(Debug)]
pub struct FormBuilder {
    title: String,
    controls: Vec<Control>,
    next_row_y: u32,
}

impl FormBuilder {
    /// Starts an empty form
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            controls: Vec::new(),
            next_row_y: MARGIN,
        }
    }

    /// Adds a grid row: a label on the left and `input` on the right
    #[must_use]
    pub fn row(
        mut self,
        label_name: &str,
        label_text: &str,
        input_name: &str,
        input: ControlKind,
    ) -> Self {
        let y = self.next_row_y;
        self.push(
            label_name,
            Rect::new(MARGIN, y, LABEL_WIDTH, ROW_HEIGHT),
            ControlKind::Label {
                text: label_text.to_string(),
            },
        );
        self.push(
            input_name,
            Rect::new(MARGIN + LABEL_WIDTH + COLUMN_SPACING, y, INPUT_WIDTH, ROW_HEIGHT),
            input,
        );
        self.next_row_y += ROW_HEIGHT + ROW_SPACING;
        self
    }

    /// Adds the OK/Cancel row, right-aligned under the input column, and
    /// finishes the form
    #[must_use]
    pub fn build_with_buttons(mut self, ok_name: &str, cancel_name: &str) -> FormDescription {
        let y = self.next_row_y;
        let cancel_x = MARGIN + LABEL_WIDTH + COLUMN_SPACING + INPUT_WIDTH - BUTTON_WIDTH;
        let ok_x = cancel_x - COLUMN_SPACING - BUTTON_WIDTH;
        self.push(
            ok_name,
            Rect::new(ok_x, y, BUTTON_WIDTH, ROW_HEIGHT),
            ControlKind::Button {
                label: "OK".to_string(),
                role: ButtonRole::Ok,
                is_default: true,
            },
        );
        self.push(
            cancel_name,
            Rect::new(cancel_x, y, BUTTON_WIDTH, ROW_HEIGHT),
            ControlKind::Button {
                label: "Cancel".to_string(),
                role: ButtonRole::Cancel,
                is_default: false,
            },
        );
        self.next_row_y += ROW_HEIGHT + ROW_SPACING;
        self.build()
    }

    /// Finishes the form, sizing the dialog to its controls
    #[must_use]
    pub fn build(self) -> FormDescription {
        let width = self.controls.iter().map(|c| c.bounds.right()).max().unwrap_or(0) + MARGIN;
        let height = self
            .controls
            .iter()
            .map(|c| c.bounds.bottom())
            .max()
            .unwrap_or(0)
            + MARGIN;
        FormDescription {
            title: self.title,
            bounds: Rect::new(0, 0, width, height),
            controls: self.controls,
        }
    }

    fn push(&mut self, name: &str, bounds: Rect, kind: ControlKind) {
        let tab_index = u16::try_from(self.controls.len()).unwrap_or(u16::MAX);
        self.controls.push(Control {
            name: name.to_string(),
            tab_index,
            bounds,
            kind,
        });
    }
}

/// Builds the import dialog over `index` with defaults from `settings`.
///
/// The root family list holds every index key in display order with the
/// first one selected. `title` overrides the configured dialog title.
#[must_use]
pub fn build_import_form(
    index: &FamilyIndex,
    settings: &ImportSettings,
    title: Option<&str>,
) -> FormDescription {
    let _span = info_span!(span_names::FORM_BUILD, families = index.len()).entered();

    let items = index.keys().to_vec();
    let selected = (!items.is_empty()).then_some(0);

    let form = FormBuilder::new(title.unwrap_or(&settings.dialog_title))
        .row(
            control_names::ROOT_FAMILY_LABEL,
            "Root family",
            control_names::ROOT_FAMILY,
            ControlKind::ListBox {
                items,
                selected,
                dropdown: true,
            },
        )
        .row(
            control_names::LAYOUT_MAX_LABEL,
            "Number of generations to show",
            control_names::LAYOUT_MAX,
            ControlKind::NumericField {
                value: f64::from(settings.layout_max_depth),
                min: 0.0,
                decimal_accuracy: 0,
                spin: true,
            },
        )
        .row(
            control_names::NAME_ORDER_LABEL,
            "Name order",
            control_names::NAME_ORDER,
            ControlKind::CheckBox {
                label: "Forename first".to_string(),
                checked: settings.forename_first,
            },
        )
        .build_with_buttons(control_names::OK, control_names::CANCEL);

    debug!(
        width = form.bounds.width,
        height = form.bounds.height,
        controls = form.controls.len(),
        "Import form built"
    );
    form
}
