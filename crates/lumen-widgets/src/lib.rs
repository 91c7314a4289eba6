//! iced widgets for lumen image elements
//!
//! Following the usual iced 0.14 split:
//!
//! - **State**: `LazyImageState` wraps the `lumen-core` orchestrator and the
//!   decoded image
//! - **Messages**: `LazyImageMessage`, produced by background tasks
//! - **View**: `lazy_image_view` renders the framed image or a placeholder
//!
//! The rendering primitive (`render::load_image`) reads and decodes the
//! resolved source off the UI thread and reports success or failure back
//! into the loading state.

pub mod image_view;
pub mod render;
pub mod theme;

pub use image_view::{lazy_image_view, LazyImageMessage, LazyImageState};
pub use render::{load_image, DecodedImage, RenderError};
