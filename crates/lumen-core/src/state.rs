//! Loading state machine
//!
//! Pure transition function plus a single-writer driver ([`LoadingMachine`]).
//!
//! ```text
//!                 ResolutionStarted
//!   Idle ───────────────────────────────▶ Resolving
//!    │                                      │
//!    │ SetResource (literal)                │ ResolutionSettled + SetResource
//!    ▼                                      ▼
//!   Rendering ◀─────────────────────────────┘
//!    │                    │
//!    │ LoadingComplete    │ LoadingError (render or resolution)
//!    ▼                    ▼
//!   Complete ◀────────▶ Failed
//! ```

/// Observable loading state of one image element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingState {
    /// Reference currently believed valid for display
    pub resolved_source: Option<String>,
    /// Most recent resolution or render attempt failed
    pub is_loading_error: bool,
    /// Most recent render attempt succeeded
    pub is_loading_complete: bool,
    /// A resolution for the current binding is in flight
    pub pending: bool,
}

/// Coarse view of [`LoadingState`] for display logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing bound yet
    Idle,
    /// Waiting on a resolver
    Resolving,
    /// Source known, waiting on the rendering primitive
    Rendering,
    /// Rendered successfully
    Complete,
    /// Resolution or rendering failed
    Failed,
}

impl LoadingState {
    /// Fresh state: nothing resolved, no flags
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the current phase
    ///
    /// An in-flight resolution wins over stale flags from the previous source.
    pub fn phase(&self) -> Phase {
        if self.pending {
            Phase::Resolving
        } else if self.is_loading_error {
            Phase::Failed
        } else if self.is_loading_complete {
            Phase::Complete
        } else if self.resolved_source.is_some() {
            Phase::Rendering
        } else {
            Phase::Idle
        }
    }
}

/// Transition actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A reference was resolved; flags are left alone
    SetResource(String),
    /// The rendering primitive reported success
    LoadingComplete,
    /// Resolution or rendering failed
    LoadingError,
    /// A dynamic resolution started for the current binding
    ResolutionStarted,
    /// The current binding's resolution finished (either way)
    ResolutionSettled,
}

/// Apply one action to a state
pub fn transition(state: &LoadingState, action: Action) -> LoadingState {
    match action {
        Action::SetResource(source) => LoadingState {
            resolved_source: Some(source),
            ..state.clone()
        },
        Action::LoadingComplete => LoadingState {
            is_loading_complete: true,
            is_loading_error: false,
            ..state.clone()
        },
        Action::LoadingError => LoadingState {
            is_loading_complete: false,
            is_loading_error: true,
            ..state.clone()
        },
        Action::ResolutionStarted => LoadingState {
            pending: true,
            ..state.clone()
        },
        Action::ResolutionSettled => LoadingState {
            pending: false,
            ..state.clone()
        },
    }
}

/// Owner of a [`LoadingState`]; the only place it is mutated
#[derive(Debug, Default)]
pub struct LoadingMachine {
    state: LoadingState,
}

impl LoadingMachine {
    /// Machine in the initial state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    /// Apply an action
    pub fn dispatch(&mut self, action: Action) {
        log::trace!("LoadingMachine: {:?}", action);
        self.state = transition(&self.state, action);
    }
}
