//! Line-oriented modal driver.
//!
//! Walks the input controls of a form in tab order, prompting for each on
//! `output` and reading answers from `input`. An empty answer keeps the
//! shown default; `q` or end of input cancels the dialog.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use gedimport_core::dialog::{Control, ControlKind};
use gedimport_core::error::PresentationResult;
use gedimport_core::{DialogResponse, FormDescription, ModalDriver};
use tracing::debug;

/// What the user typed at a prompt
#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Value(String),
    Default,
    Quit,
}

/// A [`ModalDriver`] that runs the dialog as a sequence of prompts
#[derive(Debug)]
pub struct TerminalDriver<R, W> {
    input: R,
    output: W,
}

impl TerminalDriver<StdinLock<'static>, Stderr> {
    /// Prompts on stderr and reads stdin, leaving stdout for results
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalDriver<R, W> {
    /// Creates a driver over arbitrary streams
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the driver and returns the output stream
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Answer> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(Answer::Quit);
        }
        let answer = line.trim();
        Ok(match answer {
            "" => Answer::Default,
            "q" | "Q" => Answer::Quit,
            _ => Answer::Value(answer.to_string()),
        })
    }

    /// Prompts until the answer is accepted by `parse`; `None` means quit
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        default: T,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> io::Result<Option<T>> {
        loop {
            match self.ask(prompt)? {
                Answer::Quit => return Ok(None),
                Answer::Default => return Ok(Some(default)),
                Answer::Value(text) => match parse(&text) {
                    Ok(value) => return Ok(Some(value)),
                    Err(hint) => writeln!(self.output, "  {hint}")?,
                },
            }
        }
    }

    /// Edits one control; returns `None` if the user quit
    fn edit(&mut self, label: &str, kind: ControlKind) -> io::Result<Option<ControlKind>> {
        match kind {
            ControlKind::ListBox {
                items,
                selected,
                dropdown,
            } => {
                writeln!(self.output, "{label}:")?;
                if items.is_empty() {
                    writeln!(self.output, "  (none)")?;
                    return Ok(Some(ControlKind::ListBox {
                        items,
                        selected,
                        dropdown,
                    }));
                }
                for (i, item) in items.iter().enumerate() {
                    let mark = if selected == Some(i) { '*' } else { ' ' };
                    writeln!(self.output, " {mark}{:>3}) {item}", i + 1)?;
                }
                let count = items.len();
                let prompt = format!("Choose 1-{count} [{}]:", selected.map_or(0, |i| i + 1));
                let choice = self.ask_until(&prompt, selected, |text| {
                    if let Some(i) = items.iter().position(|item| item == text) {
                        return Ok(Some(i));
                    }
                    match text.parse::<usize>() {
                        Ok(n) if (1..=count).contains(&n) => Ok(Some(n - 1)),
                        _ => Err(format!("Enter a number between 1 and {count}")),
                    }
                })?;
                Ok(choice.map(|selected| ControlKind::ListBox {
                    items,
                    selected,
                    dropdown,
                }))
            }
            ControlKind::NumericField {
                value,
                min,
                decimal_accuracy,
                spin,
            } => {
                let prompt = format!("{label} [{value}]:");
                let value = self.ask_until(&prompt, value, |text| {
                    let parsed: f64 = text
                        .parse()
                        .map_err(|_| format!("'{text}' is not a number"))?;
                    if parsed.is_nan() || parsed < min {
                        return Err(format!("Enter a value of at least {min}"));
                    }
                    Ok(if decimal_accuracy == 0 {
                        parsed.round()
                    } else {
                        parsed
                    })
                })?;
                Ok(value.map(|value| ControlKind::NumericField {
                    value,
                    min,
                    decimal_accuracy,
                    spin,
                }))
            }
            ControlKind::CheckBox {
                label: text,
                checked,
            } => {
                let hint = if checked { "Y/n" } else { "y/N" };
                let prompt = format!("{label}: {text}? [{hint}]");
                let checked = self.ask_until(&prompt, checked, parse_yes_no)?;
                Ok(checked.map(|checked| ControlKind::CheckBox {
                    label: text,
                    checked,
                }))
            }
            other @ (ControlKind::Label { .. } | ControlKind::Button { .. }) => Ok(Some(other)),
        }
    }
}

fn parse_yes_no(text: &str) -> Result<bool, String> {
    match text.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err("Answer y or n".to_string()),
    }
}

const fn is_input(control: &Control) -> bool {
    !matches!(
        control.kind,
        ControlKind::Label { .. } | ControlKind::Button { .. }
    )
}

impl<R: BufRead, W: Write> ModalDriver for TerminalDriver<R, W> {
    fn run(&mut self, mut form: FormDescription) -> PresentationResult<DialogResponse> {
        let mut inputs: Vec<&Control> = form.controls.iter().filter(|c| is_input(c)).collect();
        inputs.sort_by_key(|c| c.tab_index);
        let prompts: Vec<(String, String)> = inputs
            .iter()
            .map(|c| {
                let label = form.label_for(c).unwrap_or(&c.name).to_string();
                (c.name.clone(), label)
            })
            .collect();

        writeln!(self.output, "{}", form.title)?;
        writeln!(self.output, "{}", "=".repeat(form.title.chars().count()))?;

        for (name, label) in prompts {
            let Some(control) = form.control_mut(&name) else {
                continue;
            };
            let current = control.kind.clone();
            match self.edit(&label, current)? {
                Some(kind) => control.kind = kind,
                None => {
                    debug!(control = %name, "Terminal dialog quit");
                    return Ok(DialogResponse::Cancelled);
                }
            }
        }

        let confirmed = self.ask_until("Import with these settings? [Y/n]", true, parse_yes_no)?;
        if confirmed == Some(true) {
            Ok(DialogResponse::Confirmed(form.raw_values()?))
        } else {
            Ok(DialogResponse::Cancelled)
        }
    }
}
