//! GTK4 modal driver.
//!
//! Builds a modal window from a [`FormDescription`], placing every control at
//! its dialog-unit bounds scaled to pixels, and blocks on a nested main loop
//! until the window closes.

use std::cell::Cell;
use std::rc::Rc;

use gedimport_core::dialog::{ButtonRole, Control, ControlKind};
use gedimport_core::error::{PresentationError, PresentationResult};
use gedimport_core::{DialogResponse, FormDescription, ModalDriver};
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Button, CheckButton, DropDown, Fixed, Label, SpinButton, Widget, Window};
use tracing::debug;

/// Pixels per dialog unit
const PIXELS_PER_UNIT: u32 = 3;

/// Largest value the generation spinner accepts
const SPIN_MAX: f64 = 999.0;

/// A widget created for an input control, kept to read its state back
enum InputWidget {
    List(DropDown),
    Spin(SpinButton),
    Check(CheckButton),
}

/// A [`ModalDriver`] showing the form as a GTK4 window.
///
/// GTK is initialized on the calling thread when the form is shown; a missing
/// display is reported as [`PresentationError::SurfaceUnavailable`].
#[derive(Debug, Default)]
pub struct GtkDriver;

impl GtkDriver {
    /// Creates a driver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn px(units: u32) -> i32 {
    i32::try_from(units.saturating_mul(PIXELS_PER_UNIT)).unwrap_or(i32::MAX)
}

fn place(fixed: &Fixed, widget: &impl IsA<Widget>, control: &Control) {
    widget.set_size_request(px(control.bounds.width), px(control.bounds.height));
    fixed.put(
        widget,
        f64::from(px(control.bounds.x)),
        f64::from(px(control.bounds.y)),
    );
}

impl ModalDriver for GtkDriver {
    #[allow(clippy::too_many_lines)]
    fn run(&mut self, mut form: FormDescription) -> PresentationResult<DialogResponse> {
        gtk4::init().map_err(|e| PresentationError::SurfaceUnavailable(e.to_string()))?;

        let window = Window::builder()
            .title(form.title.as_str())
            .modal(true)
            .resizable(false)
            .default_width(px(form.bounds.width))
            .default_height(px(form.bounds.height))
            .build();
        let fixed = Fixed::new();
        window.set_child(Some(&fixed));

        let pressed: Rc<Cell<Option<ButtonRole>>> = Rc::new(Cell::new(None));
        let mut inputs: Vec<(String, InputWidget)> = Vec::new();

        for control in &form.controls {
            match &control.kind {
                ControlKind::Label { text } => {
                    let label = Label::builder().label(text.as_str()).xalign(0.0).build();
                    place(&fixed, &label, control);
                }
                ControlKind::ListBox {
                    items, selected, ..
                } => {
                    let strings: Vec<&str> = items.iter().map(String::as_str).collect();
                    let drop_down = DropDown::from_strings(&strings);
                    let position = selected
                        .and_then(|i| u32::try_from(i).ok())
                        .unwrap_or(gtk4::INVALID_LIST_POSITION);
                    drop_down.set_selected(position);
                    place(&fixed, &drop_down, control);
                    inputs.push((control.name.clone(), InputWidget::List(drop_down)));
                }
                ControlKind::NumericField {
                    value,
                    min,
                    decimal_accuracy,
                    ..
                } => {
                    let spin = SpinButton::with_range(*min, SPIN_MAX.max(*value), 1.0);
                    spin.set_digits(u32::from(*decimal_accuracy));
                    spin.set_value(*value);
                    place(&fixed, &spin, control);
                    inputs.push((control.name.clone(), InputWidget::Spin(spin)));
                }
                ControlKind::CheckBox { label, checked } => {
                    let check = CheckButton::with_label(label);
                    check.set_active(*checked);
                    place(&fixed, &check, control);
                    inputs.push((control.name.clone(), InputWidget::Check(check)));
                }
                ControlKind::Button {
                    label,
                    role,
                    is_default,
                } => {
                    let button = Button::with_label(label);
                    if *is_default {
                        button.add_css_class("suggested-action");
                        window.set_default_widget(Some(&button));
                    }
                    let pressed = pressed.clone();
                    let window = window.clone();
                    let role = *role;
                    button.connect_clicked(move |_| {
                        pressed.set(Some(role));
                        window.close();
                    });
                    place(&fixed, &button, control);
                }
            }
        }

        let main_loop = glib::MainLoop::new(None, false);
        {
            let main_loop = main_loop.clone();
            window.connect_close_request(move |_| {
                main_loop.quit();
                glib::Propagation::Proceed
            });
        }

        window.present();
        main_loop.run();

        let role = pressed.get();
        debug!(?role, "GTK dialog closed");
        if role != Some(ButtonRole::Ok) {
            window.destroy();
            return Ok(DialogResponse::Cancelled);
        }

        for (name, widget) in &inputs {
            let Some(control) = form.control_mut(name) else {
                continue;
            };
            match (&mut control.kind, widget) {
                (ControlKind::ListBox { selected, .. }, InputWidget::List(drop_down)) => {
                    let position = drop_down.selected();
                    *selected = (position != gtk4::INVALID_LIST_POSITION)
                        .then(|| usize::try_from(position).ok())
                        .flatten();
                }
                (ControlKind::NumericField { value, .. }, InputWidget::Spin(spin)) => {
                    *value = spin.value();
                }
                (ControlKind::CheckBox { checked, .. }, InputWidget::Check(check)) => {
                    *checked = check.is_active();
                }
                _ => {}
            }
        }
        window.destroy();

        Ok(DialogResponse::Confirmed(form.raw_values()?))
    }
}
