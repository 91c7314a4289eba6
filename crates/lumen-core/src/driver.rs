//! Headless driver running an [`Orchestrator`] on a tokio runtime
//!
//! UI frameworks normally run attempts on their own executor (see
//! `lumen-widgets`). Without a UI, attempts are spawned into a
//! [`JoinSet`] and joined back by whoever owns the driver, one completion at
//! a time. An attempt whose task panics comes back as a rejection for its
//! generation.
//!
//! ```ignore
//! let mut driver = ImageDriver::new(Orchestrator::new("Avatar", &config));
//! driver.set_source(SourceDescriptor::dynamic(|| async { fetch_avatar_url().await }));
//! driver.settle().await;
//! ```

use std::collections::HashMap;

use tokio::task::{Id, JoinError, JoinSet};

use crate::error::ResolveError;
use crate::orchestrator::{Binding, Completion, Generation, Orchestrator};
use crate::resolve::Outcome;
use crate::source::SourceDescriptor;
use crate::state::LoadingState;

/// Orchestrator plus the tasks running its attempts
#[derive(Debug)]
pub struct ImageDriver {
    orchestrator: Orchestrator,
    attempts: JoinSet<Completion>,
    /// Generation of each spawned task, for tasks that end in a panic
    generations: HashMap<Id, Generation>,
}

impl ImageDriver {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            attempts: JoinSet::new(),
            generations: HashMap::new(),
        }
    }

    pub fn state(&self) -> &LoadingState {
        self.orchestrator.state()
    }

    /// Number of spawned attempts whose completion has not been applied
    pub fn in_flight(&self) -> usize {
        self.attempts.len()
    }

    /// Bind a new source; dynamic sources are spawned on the current runtime
    ///
    /// Returns `true` if an attempt was spawned. Must be called from within
    /// a tokio runtime.
    pub fn set_source(&mut self, descriptor: SourceDescriptor) -> bool {
        match self.orchestrator.bind(descriptor) {
            Binding::Pending(attempt) => {
                let generation = attempt.generation();
                let handle = self.attempts.spawn(attempt.run());
                self.generations.insert(handle.id(), generation);
                true
            }
            Binding::Ready | Binding::Unchanged => false,
        }
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns `None` when nothing is in flight, otherwise whether the
    /// completion was applied (`false` = discarded as stale).
    pub async fn next_completion(&mut self) -> Option<bool> {
        loop {
            let completion = match self.attempts.join_next_with_id().await? {
                Ok((id, completion)) => {
                    self.generations.remove(&id);
                    completion
                }
                Err(error) => match self.aborted(error) {
                    Some(completion) => completion,
                    None => continue,
                },
            };
            return Some(self.orchestrator.complete(completion));
        }
    }

    /// Apply completions until no attempt is in flight
    ///
    /// Resolvers have no timeout, so this waits as long as they do.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// Forward the rendering primitive's success signal
    pub fn render_loaded(&mut self) {
        self.orchestrator.render_loaded();
    }

    /// Forward the rendering primitive's failure signal
    pub fn render_failed(&mut self) {
        self.orchestrator.render_failed();
    }

    /// Turn a task that panicked (or was cancelled) into a rejection
    fn aborted(&mut self, error: JoinError) -> Option<Completion> {
        let Some(generation) = self.generations.remove(&error.id()) else {
            log::warn!(
                "[{}] attempt task {} ended without a generation: {}",
                self.orchestrator.name(),
                error.id(),
                error
            );
            return None;
        };

        let reason = if error.is_panic() {
            "resolver panicked"
        } else {
            "resolver task was cancelled"
        };
        Some(Completion {
            generation,
            outcome: Outcome::Failed(ResolveError::rejected(anyhow::anyhow!(
                "{} (generation {})",
                reason,
                generation
            ))),
        })
    }
}
