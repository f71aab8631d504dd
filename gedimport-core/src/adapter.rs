//! Import configuration adapter.
//!
//! The adapter is what the host talks to. It takes the host's property bag,
//! reads the families of the referenced file, shows the import dialog through
//! a [`ModalDriver`] and, if the user confirms, merges the chosen settings back
//! into the bag under [`FILTER_DATA`].
//!
//! No error crosses the public operations. Every fault is handed to the
//! [`DiagnosticSink`] and the interaction ends as [`Outcome::Cancelled`] with
//! the bag left as the host supplied it.

use std::any::Any;
use std::path::PathBuf;

use tracing::{debug, info, info_span};

use crate::config::ImportSettings;
use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};
use crate::dialog::{build_import_form, DialogResponse, ModalDriver, RawValues};
use crate::error::{
    ExtractionError, ExtractionResult, Fault, PresentationError, PresentationResult,
    ProtocolError,
};
use crate::family_index::FamilyIndex;
use crate::gedcom::FamilySource;
use crate::models::{ImportFilterData, NameOrder, Property, PropertyBag, FILTER_DATA};
use crate::tracing::span_names;

/// Property holding the source file location
pub const URL: &str = "URL";

/// Terminal result of one interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The user pressed OK and the filter data was merged
    Confirmed,
    /// The user cancelled, or the interaction was aborted by a fault
    Cancelled,
}

/// Where the adapter is in its single interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterState {
    /// No properties received yet
    Uninitialized,
    /// Properties received
    Configured,
    /// Families read and indexed
    FamiliesExtracted,
    /// Dialog confirmed and filter data merged
    Confirmed,
    /// Dialog cancelled
    Cancelled,
    /// Interaction aborted by a fault
    Failed,
}

impl AdapterState {
    /// Returns true once the interaction has ended
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled | Self::Failed)
    }
}

/// Validated view of the input properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// Local path of the genealogical data file
    pub source: PathBuf,
}

impl ImportRequest {
    /// Extracts the request from a host property bag.
    ///
    /// # Errors
    ///
    /// Returns a protocol fault if `URL` is missing or not a string, and an
    /// extraction fault if it cannot be turned into a local path.
    pub fn from_bag(bag: &PropertyBag) -> Result<Self, Fault> {
        let url = bag
            .get_str(URL)?
            .ok_or(ProtocolError::MissingProperty(URL))?;
        Ok(Self {
            source: url_to_path(url)?,
        })
    }
}

/// Converts a `file://` URL or a plain path into a local path.
///
/// File URLs are percent-decoded; plain paths get `~` expanded.
///
/// # Errors
///
/// Returns [`ExtractionError::InvalidUrl`] for empty input, other URL schemes,
/// remote hosts and undecodable escapes.
pub fn url_to_path(url: &str) -> ExtractionResult<PathBuf> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ExtractionError::InvalidUrl("empty URL".to_string()));
    }

    if let Some(rest) = url.strip_prefix("file://") {
        let rest = rest.strip_prefix("localhost").unwrap_or(rest);
        if !rest.starts_with('/') {
            return Err(ExtractionError::InvalidUrl(format!(
                "{url}: only local file URLs are supported"
            )));
        }
        let decoded = urlencoding::decode(rest)
            .map_err(|e| ExtractionError::InvalidUrl(format!("{url}: {e}")))?;
        return Ok(PathBuf::from(decoded.into_owned()));
    }

    if url.contains("://") {
        return Err(ExtractionError::InvalidUrl(format!(
            "{url}: unsupported URL scheme"
        )));
    }
    Ok(PathBuf::from(shellexpand::tilde(url).into_owned()))
}

/// Rounds the spinner value to a generation count; negatives and NaN become 0
#[must_use]
pub fn clamp_depth(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Maps confirmed control values to filter data.
///
/// # Errors
///
/// Returns [`PresentationError::NoSelection`] if no family was selected and
/// [`PresentationError::UnknownSelection`] if the selection is not in `index`.
pub fn map_raw_values(
    raw: &RawValues,
    index: &FamilyIndex,
) -> PresentationResult<ImportFilterData> {
    let key = raw
        .root_family
        .as_deref()
        .ok_or(PresentationError::NoSelection)?;
    let family = index
        .get(key)
        .ok_or_else(|| PresentationError::UnknownSelection(key.to_string()))?;

    Ok(ImportFilterData {
        root_family: family.id.clone(),
        layout_max_depth: clamp_depth(raw.layout_max_depth),
        name_order: NameOrder::from_forename_first(raw.forename_first),
    })
}

/// The host-facing import dialog component.
pub struct ImportDialogAdapter<S, D> {
    source: S,
    driver: D,
    settings: ImportSettings,
    diagnostics: Box<dyn DiagnosticSink>,
    props: PropertyBag,
    title: Option<String>,
    target: Option<Box<dyn Any>>,
    state: AdapterState,
    filter_data: Option<ImportFilterData>,
}

impl<S, D> ImportDialogAdapter<S, D>
where
    S: FamilySource,
    D: ModalDriver,
{
    /// Creates an adapter with default settings that reports to `tracing`
    #[must_use]
    pub fn new(source: S, driver: D) -> Self {
        Self {
            source,
            driver,
            settings: ImportSettings::default(),
            diagnostics: Box::new(TracingDiagnostics::new()),
            props: PropertyBag::new(),
            title: None,
            target: None,
            state: AdapterState::Uninitialized,
            filter_data: None,
        }
    }

    /// Replaces the dialog defaults
    #[must_use]
    pub fn with_settings(mut self, settings: ImportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the diagnostic sink
    #[must_use]
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// Stores the host's input properties.
    ///
    /// Values are kept as given; problems with them surface when the dialog
    /// is executed. Repeated names are reported and the last value kept.
    pub fn set_property_values(&mut self, properties: Vec<Property>) {
        let (bag, problems) = PropertyBag::from_properties(properties);
        for problem in problems {
            self.report(Fault::from(problem));
        }
        debug!(count = bag.len(), "Input properties stored");
        self.props = bag;
        if self.state == AdapterState::Uninitialized {
            self.state = AdapterState::Configured;
        }
    }

    /// Returns the current properties: the input bag, plus [`FILTER_DATA`]
    /// if the dialog was confirmed
    #[must_use]
    pub fn get_property_values(&self) -> Vec<Property> {
        self.props.to_properties()
    }

    /// Borrowing view of the current properties
    #[must_use]
    pub const fn property_bag(&self) -> &PropertyBag {
        &self.props
    }

    /// Sets the dialog title; an empty title keeps the configured one
    pub fn set_title(&mut self, title: &str) {
        self.title = (!title.trim().is_empty()).then(|| title.to_string());
    }

    /// Binds the document the host will import into
    pub fn set_target_document<T: Any>(&mut self, target: T) {
        self.target = Some(Box::new(target));
    }

    /// Returns the bound target document if it has type `T`
    #[must_use]
    pub fn target_document<T: Any>(&self) -> Option<&T> {
        self.target.as_ref()?.downcast_ref()
    }

    /// Runs the interaction: extract families, show the dialog, merge the
    /// result. Never fails; faults are reported and yield
    /// [`Outcome::Cancelled`].
    pub fn execute(&mut self) -> Outcome {
        let _span = info_span!(span_names::ADAPTER_EXECUTE).entered();

        if self.state.is_terminal() {
            self.report(Fault::from(ProtocolError::AlreadyExecuted));
            return Outcome::Cancelled;
        }

        match self.run_interaction() {
            Ok(Some(data)) => {
                info!(
                    root_family = %data.root_family,
                    depth = data.layout_max_depth,
                    order = ?data.name_order,
                    "Import dialog confirmed"
                );
                self.props
                    .insert(FILTER_DATA, data.to_property_bag(&self.settings));
                self.filter_data = Some(data);
                self.state = AdapterState::Confirmed;
                Outcome::Confirmed
            }
            Ok(None) => {
                info!("Import dialog cancelled");
                self.state = AdapterState::Cancelled;
                Outcome::Cancelled
            }
            Err(fault) => {
                self.report(fault);
                self.state = AdapterState::Failed;
                Outcome::Cancelled
            }
        }
    }

    fn run_interaction(&mut self) -> Result<Option<ImportFilterData>, Fault> {
        let request = ImportRequest::from_bag(&self.props)?;

        let index = FamilyIndex::build(&self.source, &request.source)?;
        debug!(
            source = self.source.display_name(),
            families = index.len(),
            "Families extracted"
        );
        self.state = AdapterState::FamiliesExtracted;

        let form = build_import_form(&index, &self.settings, self.title.as_deref());
        let response = {
            let _span = info_span!(span_names::DIALOG_RUN).entered();
            self.driver.run(form)?
        };

        match response {
            DialogResponse::Cancelled => Ok(None),
            DialogResponse::Confirmed(raw) => Ok(Some(map_raw_values(&raw, &index)?)),
        }
    }

    fn report(&self, fault: Fault) {
        self.diagnostics.report(&fault);
    }

    /// Current state of the interaction
    #[must_use]
    pub const fn state(&self) -> AdapterState {
        self.state
    }

    /// The filter data merged on confirmation
    #[must_use]
    pub const fn filter_data(&self) -> Option<&ImportFilterData> {
        self.filter_data.as_ref()
    }

    /// The settings the dialog is built from
    #[must_use]
    pub const fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// The modal driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }
}
