//! Diagnostic sinks for faults caught at the adapter boundary.
//!
//! Reporting is write-only and best-effort: a sink never fails its caller.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Fault, FaultKind};

/// Receives faults the adapter swallowed on the host's behalf.
pub trait DiagnosticSink {
    /// Records one fault
    fn report(&self, fault: &Fault);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn report(&self, fault: &Fault) {
        (**self).report(fault);
    }
}

/// Writes faults to the `tracing` subscriber at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    /// Creates a new tracing sink
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, fault: &Fault) {
        tracing::error!(kind = ?fault.kind(), "{}", fault.report_text());
    }
}

/// A fault as captured by [`RecordingDiagnostics`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    /// Classification of the fault
    pub kind: FaultKind,
    /// Full report text including the cause chain
    pub text: String,
}

/// Keeps every report in memory.
///
/// Clones share the same storage, so a host can keep one handle and give
/// another to the adapter.
#[derive(Debug, Default, Clone)]
pub struct RecordingDiagnostics {
    reports: Arc<Mutex<Vec<DiagnosticReport>>>,
}

impl RecordingDiagnostics {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all reports so far
    #[must_use]
    pub fn reports(&self) -> Vec<DiagnosticReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of reports so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kinds of all reports, oldest first
    #[must_use]
    pub fn kinds(&self) -> Vec<FaultKind> {
        self.reports().into_iter().map(|r| r.kind).collect()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&self, fault: &Fault) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DiagnosticReport {
                kind: fault.kind(),
                text: fault.report_text(),
            });
    }
}
