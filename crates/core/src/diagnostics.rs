//! Diagnostic sinks
//!
//! Components that need to report something to the user without failing
//! (an unknown configuration name, a lint summary) receive a
//! [`DiagnosticSink`] at construction instead of writing to a global logger.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Debug,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// Destination for diagnostics emitted by forge components
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, level: DiagnosticLevel, message: &str);

    fn debug(&self, message: &str) {
        self.emit(DiagnosticLevel::Debug, message);
    }

    fn warning(&self, message: &str) {
        self.emit(DiagnosticLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(DiagnosticLevel::Error, message);
    }
}

/// Forwards diagnostics to `tracing`. Formatting and filtering are left to
/// whatever subscriber the host installs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        match level {
            DiagnosticLevel::Debug => tracing::debug!("{}", message),
            DiagnosticLevel::Warning => tracing::warn!("{}", message),
            DiagnosticLevel::Error => tracing::error!("{}", message),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn messages_at(&self, level: DiagnosticLevel) -> Vec<String> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.level == level)
            .map(|d| d.message)
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages_at(DiagnosticLevel::Warning)
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Diagnostic {
                level,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.warning("first");
        sink.debug("second");
        sink.error("third");

        let levels: Vec<_> = sink.diagnostics().iter().map(|d| d.level).collect();
        assert_eq!(
            levels,
            vec![
                DiagnosticLevel::Warning,
                DiagnosticLevel::Debug,
                DiagnosticLevel::Error
            ]
        );
        assert_eq!(sink.warnings(), vec!["first".to_string()]);
    }

    #[test]
    fn test_shared_sink_observes_emits_through_arc() {
        let sink = MemorySink::shared();
        let as_dyn: Arc<dyn DiagnosticSink> = sink.clone();
        as_dyn.warning("through the trait object");

        assert_eq!(sink.warnings().len(), 1);
    }
}
