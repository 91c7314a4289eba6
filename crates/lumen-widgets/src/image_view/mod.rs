//! Lazy Image Widget
//!
//! An image whose source may need asynchronous resolution before it can be
//! displayed. Provides:
//! - Source binding with generation-checked resolution (via `lumen-core`)
//! - Background decoding of the resolved source
//! - A framed view that reflects the loading classes
//!
//! # Flow
//!
//! ```text
//! set_source ──▶ Task::perform(attempt) ──▶ Resolved ──┐
//!      │ (literal)                                     ▼
//!      └──────────────────────────────▶ Task::perform(load_image) ──▶ Rendered
//!                                                                      │
//!                                     render_loaded / render_failed ◀──┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In the app's update:
//! Message::ShowCover(src) => self.cover.set_source(src).map(Message::Cover),
//! Message::Cover(msg) => self.cover.update(msg).map(Message::Cover),
//!
//! // In the app's view:
//! lazy_image_view(&self.cover).map(Message::Cover)
//! ```

mod message;
mod view;

pub use message::LazyImageMessage;
pub use view::lazy_image_view;

use iced::Task;
use lumen_core::{
    present, Binding, ElementAttrs, ImageConfig, ImageProps, LoadingState, Orchestrator,
    SourceDescriptor,
};

use crate::render::{self, DecodedImage};

/// State for one lazily resolved image
#[derive(Debug)]
pub struct LazyImageState {
    orchestrator: Orchestrator,
    props: ImageProps,
    /// Source last handed to the rendering primitive
    rendered_source: Option<String>,
    /// Last successfully decoded image
    decoded: Option<DecodedImage>,
}

impl LazyImageState {
    /// Create an unbound image; `name` identifies it in diagnostics
    pub fn new(name: impl Into<String>, config: &ImageConfig) -> Self {
        Self {
            orchestrator: Orchestrator::new(name, config),
            props: ImageProps::default(),
            rendered_source: None,
            decoded: None,
        }
    }

    pub fn with_props(mut self, props: ImageProps) -> Self {
        self.props = props;
        self
    }

    /// Current loading state
    pub fn state(&self) -> &LoadingState {
        self.orchestrator.state()
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Last decoded image, if any
    pub fn decoded(&self) -> Option<&DecodedImage> {
        self.decoded.as_ref()
    }

    /// Attributes for the rendering primitive
    pub fn attrs(&self) -> ElementAttrs<'_> {
        present(self.orchestrator.state(), &self.props)
    }

    /// Bind a source descriptor
    ///
    /// Re-binding an equal descriptor does nothing.
    pub fn set_source(&mut self, descriptor: SourceDescriptor) -> Task<LazyImageMessage> {
        match self.orchestrator.bind(descriptor) {
            Binding::Unchanged => Task::none(),
            Binding::Ready => self.render_resolved(),
            Binding::Pending(attempt) => Task::perform(attempt.run(), LazyImageMessage::Resolved),
        }
    }

    /// Handle a message from a background task
    pub fn update(&mut self, message: LazyImageMessage) -> Task<LazyImageMessage> {
        match message {
            LazyImageMessage::Resolved(completion) => {
                if self.orchestrator.complete(completion) {
                    self.render_resolved()
                } else {
                    Task::none()
                }
            }
            LazyImageMessage::Rendered { source, result } => {
                if self.rendered_source.as_deref() != Some(source.as_str()) {
                    log::debug!(
                        "[{}] ignoring render result for replaced source {}",
                        self.orchestrator.name(),
                        source
                    );
                    return Task::none();
                }

                match result {
                    Ok(decoded) => {
                        log::debug!(
                            "[{}] rendered {} ({}x{})",
                            self.orchestrator.name(),
                            source,
                            decoded.width,
                            decoded.height
                        );
                        self.decoded = Some(decoded);
                        self.orchestrator.render_loaded();
                    }
                    Err(e) => {
                        log::warn!("[{}] render failed: {}", self.orchestrator.name(), e);
                        self.orchestrator.render_failed();
                    }
                }
                Task::none()
            }
        }
    }

    /// Start rendering the resolved source if it changed since the last render
    fn render_resolved(&mut self) -> Task<LazyImageMessage> {
        let Some(source) = self.orchestrator.state().resolved_source.clone() else {
            return Task::none();
        };
        if self.rendered_source.as_ref() == Some(&source) {
            return Task::none();
        }

        self.rendered_source = Some(source.clone());
        let target = source.clone();
        Task::perform(async move { render::load_image(&target) }, move |result| {
            LazyImageMessage::Rendered { source, result }
        })
    }
}
