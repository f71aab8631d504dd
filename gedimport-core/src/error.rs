//! Error types for `gedimport`
//!
//! This module defines the error types used throughout the import adapter:
//! family extraction, dialog presentation, the host property protocol and
//! settings files. [`Fault`] wraps the first three and is what the adapter
//! hands to its diagnostic sink.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for `gedimport` operations
#[derive(Debug, Error)]
pub enum GedImportError {
    /// Family extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Dialog presentation errors
    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),

    /// Host property protocol errors
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Settings errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading families out of a genealogical data file
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The source file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The source file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line of the source file is not valid GEDCOM
    #[error("Failed to parse line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// The reason for parse failure
        reason: String,
    },

    /// The `URL` property could not be turned into a filesystem path
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),
}

/// Errors raised while presenting the modal dialog or reading its values
#[derive(Debug, Error)]
pub enum PresentationError {
    /// The host environment could not create the modal surface
    #[error("Dialog surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Terminal or window I/O failed while the dialog was open
    #[error("IO error while presenting dialog: {0}")]
    Io(#[from] std::io::Error),

    /// The dialog was confirmed without a root family selected
    #[error("No root family selected")]
    NoSelection,

    /// The selected list entry is not a known family
    #[error("Unknown family selection: {0}")]
    UnknownSelection(String),
}

/// Errors in the shape of the host property bag
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A required property is absent
    #[error("Missing required property: {0}")]
    MissingProperty(&'static str),

    /// A property is present with the wrong value type
    #[error("Property {name} has the wrong type, expected {expected}, found {found}")]
    WrongType {
        /// The property name
        name: String,
        /// The expected value type
        expected: &'static str,
        /// The type actually supplied
        found: &'static str,
    },

    /// The same property name appears more than once
    #[error("Duplicate property: {0}")]
    DuplicateProperty(String),

    /// The adapter already ran its single interaction
    #[error("Dialog has already been executed")]
    AlreadyExecuted,
}

/// Errors related to the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// Configuration directory could not be determined
    #[error("Configuration directory not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write the settings file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize settings
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Failed to deserialize settings
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),
}

/// A fault caught at the adapter boundary and reported to the diagnostic sink
#[derive(Debug, Error)]
pub enum Fault {
    /// Source file missing, unreadable or unparseable
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Modal surface could not be built or returned unusable values
    #[error(transparent)]
    Presentation(#[from] PresentationError),

    /// Input or output property bag malformed
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Coarse classification of a [`Fault`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// See [`Fault::Extraction`]
    Extraction,
    /// See [`Fault::Presentation`]
    Presentation,
    /// See [`Fault::Protocol`]
    Protocol,
}

impl Fault {
    /// Returns the classification of this fault
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        match self {
            Self::Extraction(_) => FaultKind::Extraction,
            Self::Presentation(_) => FaultKind::Presentation,
            Self::Protocol(_) => FaultKind::Protocol,
        }
    }

    /// Renders the fault and its whole `source()` chain, one cause per line
    #[must_use]
    pub fn report_text(&self) -> String {
        let mut text = format!("{}: {self}", self.kind_name());
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            text.push_str("\n  caused by: ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }

    const fn kind_name(&self) -> &'static str {
        match self.kind() {
            FaultKind::Extraction => "extraction fault",
            FaultKind::Presentation => "presentation fault",
            FaultKind::Protocol => "protocol fault",
        }
    }
}

/// Result type alias for `gedimport` operations
pub type Result<T> = std::result::Result<T, GedImportError>;

/// Result type alias for family extraction
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for dialog presentation
pub type PresentationResult<T> = std::result::Result<T, PresentationError>;

/// Result type alias for property protocol conversions
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
