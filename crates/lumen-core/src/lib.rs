//! Lumen Core - source resolution and loading state for image elements
//!
//! An image element's source is either a literal reference or an async
//! resolver. This crate sequences resolution, tracks the loading flags and
//! maps them to presentation attributes. It has no UI dependency.
//!
//! ## Pieces
//!
//! - [`source`]: literal / dynamic source descriptors
//! - [`resolve`]: descriptor -> reference or failure
//! - [`state`]: pure loading state machine
//! - [`orchestrator`]: binds sources, results and render events, with
//!   generation tokens against stale results
//! - [`present`]: state -> style classes and element attributes
//! - [`driver`]: tokio-based driver for headless use
//! - [`config`]: YAML config I/O and [`config::ImageConfig`]

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod orchestrator;
pub mod present;
pub mod resolve;
pub mod source;
pub mod state;

pub use config::ImageConfig;
pub use diagnostics::{Diagnostics, LogDiagnostics, SilentDiagnostics};
pub use driver::ImageDriver;
pub use error::ResolveError;
pub use orchestrator::{Attempt, Binding, Completion, Generation, Orchestrator, RacePolicy};
pub use present::{present, ElementAttrs, ImageProps, StyleClasses};
pub use resolve::Outcome;
pub use source::{Resolver, SourceDescriptor};
pub use state::{transition, Action, LoadingMachine, LoadingState, Phase};
