//! `gedimport` CLI - Command-line host for the GEDCOM import dialog
//!
//! Lists the families of a GEDCOM file and runs the import configuration
//! dialog in the terminal (or a GTK window), printing the resulting
//! property bag.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use gedimport_core::models::{Property, PropertyValue};
use gedimport_core::{
    error, FamilyIndex, GedImportError, GedcomParser, ImportDialogAdapter, ImportSettings,
    ModalDriver, Outcome, PropertyBag, RecordingDiagnostics, SettingsManager, URL,
};
use serde::Serialize;

#[cfg(feature = "gtk")]
mod gtk;
mod terminal;

use terminal::TerminalDriver;

/// `gedimport` command-line interface for configuring GEDCOM imports
#[derive(Parser)]
#[command(name = "gedimport")]
#[command(author, version, about = "GEDCOM import configuration dialog")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the families of a GEDCOM file
    #[command(about = "List the families of a GEDCOM file in display order")]
    Families {
        /// GEDCOM file
        file: PathBuf,

        /// Output format for the family list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Run the import dialog for a GEDCOM file
    #[command(about = "Choose root family, depth and name order for an import")]
    Select {
        /// GEDCOM file
        file: PathBuf,

        /// Dialog title
        #[arg(short, long)]
        title: Option<String>,

        /// Extra host property passed to the dialog (KEY=VALUE)
        #[arg(short, long = "property", value_parser = parse_property)]
        properties: Vec<Property>,

        /// Output format for the resulting property bag
        #[arg(short, long, default_value = "json", value_enum)]
        format: OutputFormat,

        /// Show the dialog in a GTK window instead of the terminal
        #[arg(long)]
        gtk: bool,
    },
}

/// Output format for command results
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Families { file, format } => cmd_families(&file, format),
        Commands::Select {
            file,
            title,
            properties,
            format,
            gtk,
        } => load_settings(cli.config)
            .map_err(CliError::from)
            .and_then(|settings| {
                cmd_select(&file, settings, title.as_deref(), properties, format, gtk)
            }),
    };

    match result {
        Ok(code) if code != exit_codes::SUCCESS => std::process::exit(code),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn load_settings(config_dir: Option<PathBuf>) -> error::Result<ImportSettings> {
    let manager = match config_dir {
        Some(dir) => SettingsManager::with_config_dir(dir),
        None => SettingsManager::new()?,
    };
    Ok(manager.load_settings()?)
}

/// Parses a `KEY=VALUE` argument. Integers and `true`/`false` keep their type.
fn parse_property(arg: &str) -> Result<Property, String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("property name missing in '{arg}'"));
    }
    let value = if let Ok(i) = value.parse::<i64>() {
        PropertyValue::Int(i)
    } else if let Ok(b) = value.parse::<bool>() {
        PropertyValue::Bool(b)
    } else {
        PropertyValue::String(value.to_string())
    };
    Ok(Property::new(name, value))
}

// ============================================================================
// families
// ============================================================================

/// One row of the family listing
#[derive(Debug, Serialize)]
struct FamilyRow<'a> {
    key: &'a str,
    id: &'a str,
    husband: Option<&'a str>,
    wife: Option<&'a str>,
}

fn family_rows(index: &FamilyIndex) -> Vec<FamilyRow<'_>> {
    index
        .iter()
        .map(|(key, family)| FamilyRow {
            key,
            id: &family.id,
            husband: family.husband.as_ref().map(|p| p.id.as_str()),
            wife: family.wife.as_ref().map(|p| p.id.as_str()),
        })
        .collect()
}

fn cmd_families(file: &Path, format: OutputFormat) -> Result<i32, CliError> {
    let index =
        FamilyIndex::build(&GedcomParser::new(), file).map_err(GedImportError::from)?;
    let rows = family_rows(&index);

    match format {
        OutputFormat::Table => println!("{}", format_family_table(&rows)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| CliError::Output(format!("Failed to serialize families: {e}")))?;
            println!("{json}");
        }
    }
    Ok(exit_codes::SUCCESS)
}

/// Format family rows as a table string
#[must_use]
fn format_family_table(rows: &[FamilyRow<'_>]) -> String {
    if rows.is_empty() {
        return "No families found.".to_string();
    }

    let mut output = String::new();

    let key_width = rows.iter().map(|r| r.key.len()).max().unwrap_or(3).max(3);
    let husband_width = rows
        .iter()
        .map(|r| r.husband.map_or(1, str::len))
        .max()
        .unwrap_or(7)
        .max(7);

    let _ = writeln!(
        output,
        "{:<key_width$}  {:<husband_width$}  WIFE",
        "KEY", "HUSBAND"
    );
    let _ = writeln!(output, "{:-<key_width$}  {:-<husband_width$}  ----", "", "");

    for row in rows {
        let _ = writeln!(
            output,
            "{:<key_width$}  {:<husband_width$}  {}",
            row.key,
            row.husband.unwrap_or("-"),
            row.wife.unwrap_or("-")
        );
    }

    output.trim_end().to_string()
}

// ============================================================================
// select
// ============================================================================

fn cmd_select(
    file: &Path,
    settings: ImportSettings,
    title: Option<&str>,
    extra: Vec<Property>,
    format: OutputFormat,
    use_gtk: bool,
) -> Result<i32, CliError> {
    let source = std::path::absolute(file)?;
    let mut properties = vec![Property::new(URL, source.display().to_string())];
    properties.extend(extra);

    let driver = modal_driver(use_gtk);
    let recorder = RecordingDiagnostics::new();
    let mut adapter = ImportDialogAdapter::new(GedcomParser::new(), driver)
        .with_settings(settings)
        .with_diagnostics(recorder.clone());
    if let Some(title) = title {
        adapter.set_title(title);
    }
    adapter.set_property_values(properties);

    let outcome = adapter.execute();
    for report in recorder.reports() {
        eprintln!("{}", report.text);
    }

    print_bag(adapter.property_bag(), format)?;
    Ok(match outcome {
        Outcome::Confirmed => exit_codes::SUCCESS,
        Outcome::Cancelled => exit_codes::CANCELLED,
    })
}

/// Picks the dialog surface. Surface failures surface from `run`, so the
/// adapter reports them like any other presentation fault.
#[cfg(feature = "gtk")]
fn modal_driver(use_gtk: bool) -> Box<dyn ModalDriver> {
    if use_gtk {
        Box::new(gtk::GtkDriver::new())
    } else {
        Box::new(TerminalDriver::stdio())
    }
}

#[cfg(not(feature = "gtk"))]
fn modal_driver(use_gtk: bool) -> Box<dyn ModalDriver> {
    if use_gtk {
        Box::new(gedimport_core::ScriptedDriver::fail(
            "this build has no GTK support; rebuild with --features gtk",
        ))
    } else {
        Box::new(TerminalDriver::stdio())
    }
}

fn print_bag(bag: &PropertyBag, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => println!("{}", format_bag_table(bag)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(bag)
                .map_err(|e| CliError::Output(format!("Failed to serialize properties: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Flattens nested sequences into dotted names
fn flatten_properties<'a>(
    prefix: &str,
    props: impl Iterator<Item = &'a Property>,
) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for prop in props {
        let name = if prefix.is_empty() {
            prop.name.clone()
        } else {
            format!("{prefix}.{}", prop.name)
        };
        match &prop.value {
            PropertyValue::Sequence(nested) => {
                rows.extend(flatten_properties(&name, nested.iter()));
            }
            PropertyValue::String(s) => rows.push((name, s.clone())),
            PropertyValue::Int(i) => rows.push((name, i.to_string())),
            PropertyValue::Bool(b) => rows.push((name, b.to_string())),
        }
    }
    rows
}

/// Format a property bag as a two-column table string
#[must_use]
fn format_bag_table(bag: &PropertyBag) -> String {
    let rows = flatten_properties("", bag.iter());
    if rows.is_empty() {
        return "No properties.".to_string();
    }

    let mut output = String::new();
    let name_width = rows.iter().map(|(n, _)| n.len()).max().unwrap_or(4).max(4);
    let _ = writeln!(output, "{:<name_width$}  VALUE", "NAME");
    let _ = writeln!(output, "{:-<name_width$}  -----", "");
    for (name, value) in rows {
        let _ = writeln!(output, "{name:<name_width$}  {value}");
    }
    output.trim_end().to_string()
}

// ============================================================================
// Errors
// ============================================================================

/// Exit codes for CLI operations
pub mod exit_codes {
    /// Success - the dialog was confirmed or the listing printed
    pub const SUCCESS: i32 = 0;
    /// General error - configuration, input file or output errors
    pub const GENERAL_ERROR: i32 = 1;
    /// The dialog was cancelled or aborted by a reported fault
    pub const CANCELLED: i32 = 3;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings or input file error from the core library
    #[error(transparent)]
    Core(#[from] GedImportError),

    /// Output serialization error
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the exit code for this error; every CLI-level error is 1.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) | Self::Output(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
