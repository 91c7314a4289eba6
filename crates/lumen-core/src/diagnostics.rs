//! Diagnostics sink for swallowed resolution failures
//!
//! Resolution failures only show up as an `error` flag in the UI. The cause
//! goes to a [`Diagnostics`] implementation so embedders can capture,
//! forward or silence it.

use crate::error::ResolveError;
use crate::orchestrator::Generation;

/// Receiver for resolution failure details
pub trait Diagnostics: Send + Sync {
    /// A resolver for the named component rejected
    fn resolution_failed(&self, component: &str, generation: Generation, error: &ResolveError);
}

/// Reports failures as `log` warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn resolution_failed(&self, component: &str, generation: Generation, error: &ResolveError) {
        log::warn!("[{}] resolve source (generation {}): {}", component, generation, error);
    }
}

/// Drops failure details
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn resolution_failed(&self, _component: &str, _generation: Generation, _error: &ResolveError) {}
}
