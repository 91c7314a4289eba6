//! Orchestrator: binds source changes, resolution results and render events
//! to one [`LoadingMachine`]
//!
//! ## Event flow
//!
//! ```text
//! bind(src) ──▶ resolve::begin ──┬─ Ready(outcome) ──────────────▶ apply
//!                                └─ Pending ─▶ Attempt (embedder runs it)
//!                                                   │
//! complete(Completion) ◀────────────────────────────┘
//!        │ generation current?  yes ─▶ apply
//!        │                      no  ─▶ RacePolicy decides
//!
//! render_loaded() / render_failed() ─▶ LoadingComplete / LoadingError
//! ```
//!
//! Every binding gets a new [`Generation`]. The underlying futures are never
//! cancelled; stale completions are filtered when they come back.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ImageConfig;
use crate::diagnostics::Diagnostics;
use crate::resolve::{self, Outcome, Resolution};
use crate::source::{BoxFuture, SourceDescriptor};
use crate::state::{Action, LoadingMachine, LoadingState};

/// Monotonic token identifying one binding of a source descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handling of resolutions that complete after their binding was replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RacePolicy {
    /// Drop stale results; the latest binding always wins
    #[default]
    LatestOnly,
    /// Apply every result in arrival order, so a slow stale resolver can
    /// overwrite a newer source
    LastWriterWins,
}

/// A dynamic resolution in flight
///
/// The embedder drives [`Attempt::run`] on its event loop and hands the
/// resulting [`Completion`] back to [`Orchestrator::complete`].
pub struct Attempt {
    generation: Generation,
    future: BoxFuture<Outcome>,
}

impl Attempt {
    /// Generation this attempt belongs to
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Await the resolver
    pub async fn run(self) -> Completion {
        Completion {
            generation: self.generation,
            outcome: self.future.await,
        }
    }
}

impl fmt::Debug for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attempt")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Finished attempt, tagged with its generation
#[derive(Debug, Clone)]
pub struct Completion {
    pub generation: Generation,
    pub outcome: Outcome,
}

/// Result of [`Orchestrator::bind`]
#[derive(Debug)]
pub enum Binding {
    /// Same descriptor as before, nothing to do
    Unchanged,
    /// Literal source, state already updated
    Ready,
    /// Dynamic source, run the attempt
    Pending(Attempt),
}

/// Drives one image element's loading state
pub struct Orchestrator {
    /// Component identity used in diagnostics
    name: String,
    policy: RacePolicy,
    machine: LoadingMachine,
    current: Option<SourceDescriptor>,
    generation: Generation,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Orchestrator {
    /// Create an orchestrator in the initial state
    pub fn new(name: impl Into<String>, config: &ImageConfig) -> Self {
        Self {
            name: name.into(),
            policy: config.race_policy,
            machine: LoadingMachine::new(),
            current: None,
            generation: Generation::default(),
            diagnostics: config.diagnostics(),
        }
    }

    /// Replace the diagnostics sink
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Component identity
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current loading state
    pub fn state(&self) -> &LoadingState {
        self.machine.state()
    }

    /// Generation of the latest binding
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Bind a source descriptor, re-running resolution if it changed
    pub fn bind(&mut self, descriptor: SourceDescriptor) -> Binding {
        if self.current.as_ref() == Some(&descriptor) {
            log::trace!("[{}] bind: descriptor unchanged", self.name);
            return Binding::Unchanged;
        }

        self.generation = self.generation.next();
        let generation = self.generation;
        let resolution = resolve::begin(&descriptor);
        self.current = Some(descriptor);

        match resolution {
            Resolution::Ready(outcome) => {
                log::debug!("[{}] bind: literal source (generation {})", self.name, generation);
                self.apply(generation, outcome);
                Binding::Ready
            }
            Resolution::Pending(future) => {
                log::debug!("[{}] bind: resolving (generation {})", self.name, generation);
                self.machine.dispatch(Action::ResolutionStarted);
                Binding::Pending(Attempt { generation, future })
            }
        }
    }

    /// Feed back a finished attempt
    ///
    /// Returns `false` when the completion was stale and discarded.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let Completion { generation, outcome } = completion;

        if generation != self.generation {
            match self.policy {
                RacePolicy::LatestOnly => {
                    log::debug!(
                        "[{}] discarding stale resolution (generation {}, current {})",
                        self.name,
                        generation,
                        self.generation
                    );
                    return false;
                }
                RacePolicy::LastWriterWins => {
                    log::debug!(
                        "[{}] applying stale resolution (generation {}, current {})",
                        self.name,
                        generation,
                        self.generation
                    );
                }
            }
        }

        self.apply(generation, outcome);
        true
    }

    /// The rendering primitive displayed the resolved source
    pub fn render_loaded(&mut self) {
        self.machine.dispatch(Action::LoadingComplete);
    }

    /// The rendering primitive could not display the resolved source
    pub fn render_failed(&mut self) {
        self.machine.dispatch(Action::LoadingError);
    }

    fn apply(&mut self, generation: Generation, outcome: Outcome) {
        if generation == self.generation {
            self.machine.dispatch(Action::ResolutionSettled);
        }

        match outcome {
            Outcome::Resolved(reference) => {
                self.machine.dispatch(Action::SetResource(reference));
            }
            Outcome::Failed(error) => {
                self.diagnostics
                    .resolution_failed(&self.name, generation, &error);
                self.machine.dispatch(Action::LoadingError);
            }
        }
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("state", self.machine.state())
            .field("current", &self.current)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::state::Phase;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDiagnostics {
        failures: Mutex<Vec<(String, u64, String)>>,
    }

    impl Diagnostics for RecordingDiagnostics {
        fn resolution_failed(&self, component: &str, generation: Generation, error: &ResolveError) {
            self.failures.lock().unwrap().push((
                component.to_string(),
                generation.value(),
                error.cause().to_string(),
            ));
        }
    }

    fn orchestrator(policy: RacePolicy) -> Orchestrator {
        let config = ImageConfig {
            race_policy: policy,
            report_failures: false,
        };
        Orchestrator::new("Image", &config)
    }

    fn expect_attempt(binding: Binding) -> Attempt {
        match binding {
            Binding::Pending(attempt) => attempt,
            other => panic!("expected pending binding, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_binding_applies_immediately() {
        let mut orch = orchestrator(RacePolicy::LatestOnly);

        assert!(matches!(orch.bind("a.png".into()), Binding::Ready));
        assert_eq!(orch.state().resolved_source.as_deref(), Some("a.png"));
        assert_eq!(orch.state().phase(), Phase::Rendering);

        orch.render_loaded();
        assert!(orch.state().is_loading_complete);
    }

    #[test]
    fn test_rebinding_same_descriptor_is_noop() {
        let mut orch = orchestrator(RacePolicy::LatestOnly);
        orch.bind("a.png".into());
        let generation = orch.generation();

        assert!(matches!(orch.bind("a.png".into()), Binding::Unchanged));
        assert_eq!(orch.generation(), generation);
    }

    #[tokio::test]
    async fn test_dynamic_binding_is_pending_until_completed() {
        let mut orch = orchestrator(RacePolicy::LatestOnly);
        let src = SourceDescriptor::dynamic(|| async { Ok("b.png".to_string()) });

        let attempt = expect_attempt(orch.bind(src));
        assert_eq!(orch.state().resolved_source, None);
        assert_eq!(orch.state().phase(), Phase::Resolving);

        assert!(orch.complete(attempt.run().await));
        assert_eq!(orch.state().resolved_source.as_deref(), Some("b.png"));
        assert!(!orch.state().pending);
    }

    #[tokio::test]
    async fn test_failure_reports_cause_and_keeps_source() {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let mut orch = orchestrator(RacePolicy::LatestOnly).with_diagnostics(diagnostics.clone());
        orch.bind("a.png".into());
        orch.render_loaded();

        let src = SourceDescriptor::dynamic(|| async { Err(anyhow::anyhow!("network error")) });
        let attempt = expect_attempt(orch.bind(src));
        orch.complete(attempt.run().await);

        let state = orch.state();
        assert!(state.is_loading_error);
        assert!(!state.is_loading_complete);
        assert_eq!(state.resolved_source.as_deref(), Some("a.png"));

        let failures = diagnostics.failures.lock().unwrap();
        assert_eq!(
            failures.as_slice(),
            &[("Image".to_string(), 2, "network error".to_string())]
        );
    }

    #[tokio::test]
    async fn test_stale_completion_discarded_under_latest_only() {
        let mut orch = orchestrator(RacePolicy::LatestOnly);
        let slow = expect_attempt(orch.bind(SourceDescriptor::dynamic(|| async {
            Ok("slow.png".to_string())
        })));
        let fast = expect_attempt(orch.bind(SourceDescriptor::dynamic(|| async {
            Ok("fast.png".to_string())
        })));

        assert!(orch.complete(fast.run().await));
        assert!(!orch.complete(slow.run().await));
        assert_eq!(orch.state().resolved_source.as_deref(), Some("fast.png"));
    }

    #[tokio::test]
    async fn test_stale_completion_applied_under_last_writer_wins() {
        let mut orch = orchestrator(RacePolicy::LastWriterWins);
        let slow = expect_attempt(orch.bind(SourceDescriptor::dynamic(|| async {
            Ok("slow.png".to_string())
        })));
        let fast = expect_attempt(orch.bind(SourceDescriptor::dynamic(|| async {
            Ok("fast.png".to_string())
        })));

        assert!(orch.complete(fast.run().await));
        assert!(orch.complete(slow.run().await));
        assert_eq!(orch.state().resolved_source.as_deref(), Some("slow.png"));
    }

    #[tokio::test]
    async fn test_literal_supersedes_pending_attempt() {
        let mut orch = orchestrator(RacePolicy::LatestOnly);
        let attempt = expect_attempt(orch.bind(SourceDescriptor::dynamic(|| async {
            Ok("remote.png".to_string())
        })));

        orch.bind("local.png".into());
        assert!(!orch.state().pending);

        assert!(!orch.complete(attempt.run().await));
        assert_eq!(orch.state().resolved_source.as_deref(), Some("local.png"));
    }
}
