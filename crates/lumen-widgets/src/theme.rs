//! Colors and frame styles for lazy image elements
//!
//! The loading classes (`image`, `error`, `complete`) map to frame styles
//! here; the caller class is not interpreted by iced.

use iced::widget::container;
use iced::{Background, Border, Color};
use lumen_core::StyleClasses;

/// Frame background behind the image or placeholder
pub const FRAME_BG: Color = Color::from_rgb(0.12, 0.12, 0.14);

/// Border while resolving or rendering
pub const BORDER_LOADING: Color = Color::from_rgb(0.35, 0.35, 0.40);

/// Border once rendered
pub const BORDER_COMPLETE: Color = Color::from_rgb(0.3, 0.7, 0.9);

/// Border after a failed resolution or render
pub const BORDER_ERROR: Color = Color::from_rgb(0.8, 0.2, 0.2);

/// Placeholder text
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.6, 0.6, 0.65);

/// Placeholder text on error
pub const TEXT_ERROR: Color = Color::from_rgb(1.0, 0.45, 0.45);

/// Border color for a class set (error wins over complete)
pub fn border_color(classes: &StyleClasses) -> Color {
    if classes.error {
        BORDER_ERROR
    } else if classes.complete {
        BORDER_COMPLETE
    } else {
        BORDER_LOADING
    }
}

/// Placeholder text color for a class set
pub fn placeholder_color(classes: &StyleClasses) -> Color {
    if classes.error {
        TEXT_ERROR
    } else {
        TEXT_SECONDARY
    }
}

/// Container style for the image frame
pub fn frame_style(classes: &StyleClasses) -> container::Style {
    container::Style {
        background: Some(Background::Color(FRAME_BG)),
        border: Border {
            color: border_color(classes),
            width: if classes.error { 2.0 } else { 1.0 },
            radius: 3.0.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{transition, Action, LoadingState};

    #[test]
    fn test_border_follows_classes() {
        let loading = LoadingState::new();
        let complete = transition(&loading, Action::LoadingComplete);
        let failed = transition(&complete, Action::LoadingError);

        assert_eq!(border_color(&StyleClasses::from_state(&loading, None)), BORDER_LOADING);
        assert_eq!(border_color(&StyleClasses::from_state(&complete, None)), BORDER_COMPLETE);
        assert_eq!(border_color(&StyleClasses::from_state(&failed, None)), BORDER_ERROR);
        assert_eq!(frame_style(&StyleClasses::from_state(&failed, None)).border.width, 2.0);
    }
}
