//! View function for the lazy image widget

use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length};
use lumen_core::{ElementAttrs, Phase};

use super::message::LazyImageMessage;
use super::LazyImageState;
use crate::theme::{frame_style, placeholder_color};

/// Default frame size when no `width`/`height` attribute is given
const DEFAULT_SIZE: f32 = 160.0;

/// Render the lazy image
///
/// Layout:
/// ```text
/// ┌──────────────────────────┐  border: loading / complete / error
/// │   image (contain fit)    │
/// │   or placeholder text    │
/// └──────────────────────────┘
/// ```
///
/// `width` and `height` attributes are read as pixel sizes.
pub fn lazy_image_view(state: &LazyImageState) -> Element<'_, LazyImageMessage> {
    let attrs = state.attrs();
    let width = pixel_length(&attrs, "width");
    let height = pixel_length(&attrs, "height");
    let classes = attrs.classes.clone();

    let content: Element<'_, LazyImageMessage> = match state.decoded() {
        Some(decoded) if !classes.error => image(decoded.handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        _ => text(placeholder_label(state, &attrs))
            .size(11)
            .color(placeholder_color(&classes))
            .into(),
    };

    container(content)
        .padding(2)
        .center_x(width)
        .center_y(height)
        .style(move |_theme: &iced::Theme| frame_style(&classes))
        .into()
}

/// Placeholder text: alt text if given, otherwise the phase
fn placeholder_label(state: &LazyImageState, attrs: &ElementAttrs<'_>) -> String {
    let status = match state.state().phase() {
        Phase::Idle => None,
        Phase::Resolving => Some("Resolving…"),
        Phase::Rendering => Some("Loading…"),
        Phase::Complete => None,
        Phase::Failed => Some("Failed to load"),
    };

    match (attrs.alt, status) {
        (Some(alt), Some(status)) => format!("{alt}\n{status}"),
        (Some(alt), None) => alt.to_string(),
        (None, Some(status)) => status.to_string(),
        (None, None) => String::new(),
    }
}

/// Parse a pixel size attribute, falling back to the default
fn pixel_length(attrs: &ElementAttrs<'_>, key: &str) -> Length {
    let pixels = attrs
        .get(key)
        .and_then(|value| value.trim().trim_end_matches("px").parse::<f32>().ok())
        .filter(|pixels| pixels.is_finite() && *pixels > 0.0)
        .unwrap_or(DEFAULT_SIZE);
    Length::Fixed(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{ImageConfig, ImageProps};

    #[test]
    fn test_pixel_length_parsing() {
        let props = ImageProps::new()
            .attribute("width", "240px")
            .attribute("height", "oops");
        let state = LazyImageState::new("Cover", &ImageConfig::default()).with_props(props);
        let attrs = state.attrs();

        assert_eq!(pixel_length(&attrs, "width"), Length::Fixed(240.0));
        assert_eq!(pixel_length(&attrs, "height"), Length::Fixed(DEFAULT_SIZE));
    }

    #[test]
    fn test_placeholder_uses_alt_text() {
        let props = ImageProps::new().alt("Album cover");
        let mut state = LazyImageState::new("Cover", &ImageConfig::default()).with_props(props);
        assert_eq!(placeholder_label(&state, &state.attrs()), "Album cover");

        let _ = state.set_source("cover.png".into());
        assert_eq!(placeholder_label(&state, &state.attrs()), "Album cover\nLoading…");
    }
}
