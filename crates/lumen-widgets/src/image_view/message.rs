//! Messages for the lazy image widget

use lumen_core::Completion;

use crate::render::{DecodedImage, RenderError};

/// Messages produced by the lazy image widget's background tasks
#[derive(Debug, Clone)]
pub enum LazyImageMessage {
    /// A dynamic source finished resolving
    Resolved(Completion),

    /// The rendering primitive finished with a source
    Rendered {
        source: String,
        result: Result<DecodedImage, RenderError>,
    },
}
