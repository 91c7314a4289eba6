//! Rendering primitive for resolved sources
//!
//! Reads the referenced file and decodes it to RGBA once, so the result can
//! be handed to iced as a ready-to-upload handle. Each call yields exactly
//! one success or one failure. Run it off the UI thread via `Task::perform`.

use std::path::Path;

use iced::widget::image::Handle;
use thiserror::Error;

/// A decoded image ready for display
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Errors reported by the rendering primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Empty reference string
    #[error("Empty image source")]
    EmptySource,

    /// Reference uses a scheme this primitive can't fetch
    #[error("Unsupported image source scheme: {0}")]
    UnsupportedScheme(String),

    /// File couldn't be read
    #[error("Failed to read image {path}: {message}")]
    Read { path: String, message: String },

    /// File isn't a decodable image
    #[error("Failed to decode image {path}: {message}")]
    Decode { path: String, message: String },
}

/// Map a source reference to a filesystem path
fn source_path(source: &str) -> Result<&Path, RenderError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(RenderError::EmptySource);
    }

    if let Some(path) = source.strip_prefix("file://") {
        return Ok(Path::new(path));
    }

    match source.split_once("://") {
        Some((scheme, _)) => Err(RenderError::UnsupportedScheme(scheme.to_string())),
        None => Ok(Path::new(source)),
    }
}

/// Load and decode the image a resolved source points at
pub fn load_image(source: &str) -> Result<DecodedImage, RenderError> {
    let path = source_path(source)?;
    let start = std::time::Instant::now();

    let bytes = std::fs::read(path).map_err(|e| RenderError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let rgba = image::load_from_memory(&bytes)
        .map_err(|e| RenderError::Decode {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
        .to_rgba8();

    let (width, height) = rgba.dimensions();
    log::debug!(
        "load_image: {:?} decoded {}x{} in {:?}",
        path,
        width,
        height,
        start.elapsed()
    );

    Ok(DecodedImage {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path_schemes() {
        assert_eq!(source_path("covers/a.png").unwrap(), Path::new("covers/a.png"));
        assert_eq!(source_path("file:///tmp/a.png").unwrap(), Path::new("/tmp/a.png"));
        assert_eq!(source_path("   "), Err(RenderError::EmptySource));
        assert_eq!(
            source_path("https://example.com/a.png"),
            Err(RenderError::UnsupportedScheme("https".to_string()))
        );
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let decoded = load_image(path.to_str().unwrap()).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = load_image("/nonexistent/lumen/missing.png");
        assert!(matches!(result, Err(RenderError::Read { .. })));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-an-image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = load_image(path.to_str().unwrap());
        assert!(matches!(result, Err(RenderError::Decode { .. })));
    }
}
