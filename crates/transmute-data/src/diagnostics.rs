use transmute_core::id::Identifier;

use crate::loader::DataLoadError;

/// Receives per-document failures. Reporting never fails.
pub trait DiagnosticsSink {
    fn error(&mut self, message: &str, resource: &Identifier, cause: &DataLoadError);
}

/// Forwards diagnostics to `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn error(&mut self, message: &str, resource: &Identifier, cause: &DataLoadError) {
        tracing::error!(resource = %resource, error = %cause, "{message}");
    }
}

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub resource: Identifier,
    pub detail: String,
}

/// Keeps diagnostics in memory, for hosts that surface them later.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    pub entries: Vec<Diagnostic>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any diagnostic names `resource`.
    pub fn mentions(&self, resource: &Identifier) -> bool {
        self.entries.iter().any(|d| &d.resource == resource)
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn error(&mut self, message: &str, resource: &Identifier, cause: &DataLoadError) {
        self.entries.push(Diagnostic {
            message: message.to_string(),
            resource: resource.clone(),
            detail: cause.to_string(),
        });
    }
}

impl<D: DiagnosticsSink + ?Sized> DiagnosticsSink for &mut D {
    fn error(&mut self, message: &str, resource: &Identifier, cause: &DataLoadError) {
        (**self).error(message, resource, cause);
    }
}
