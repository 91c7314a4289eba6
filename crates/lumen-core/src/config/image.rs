//! Per-element configuration

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::io::Normalize;
use crate::diagnostics::{Diagnostics, LogDiagnostics, SilentDiagnostics};
use crate::orchestrator::RacePolicy;

/// Behaviour of a lazily resolved image element
///
/// ```yaml
/// race_policy: latest-only   # or last-writer-wins
/// report_failures: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// What to do with resolutions that finish after their binding was replaced
    pub race_policy: RacePolicy,
    /// Send resolver failures to the log (otherwise they are only flagged)
    pub report_failures: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            race_policy: RacePolicy::LatestOnly,
            report_failures: true,
        }
    }
}

impl ImageConfig {
    /// Diagnostics sink matching `report_failures`
    pub fn diagnostics(&self) -> Arc<dyn Diagnostics> {
        if self.report_failures {
            Arc::new(LogDiagnostics)
        } else {
            Arc::new(SilentDiagnostics)
        }
    }
}

/// Both fields are closed sets, so there is nothing to repair
impl Normalize for ImageConfig {
    fn normalize(&mut self) -> Vec<String> {
        Vec::new()
    }
}
