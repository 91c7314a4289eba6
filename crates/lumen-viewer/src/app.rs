//! Viewer application state, update and view

use std::time::Duration;

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Task};
use lumen_core::{ImageConfig, ImageProps};
use lumen_widgets::{lazy_image_view, LazyImageMessage, LazyImageState};

use crate::sources::descriptor_for;

/// Messages that can be sent to the viewer
#[derive(Debug, Clone)]
pub enum Message {
    /// Lazy image background task finished
    Image(LazyImageMessage),
    /// Show the next source
    Next,
    /// Show the previous source
    Previous,
}

/// Viewer application
pub struct ViewerApp {
    image: LazyImageState,
    sources: Vec<String>,
    index: usize,
    delay: Option<Duration>,
    /// How the config file was loaded, shown in the status line
    config_summary: String,
}

impl ViewerApp {
    /// Create the app and bind the first source
    pub fn new(
        image_config: &ImageConfig,
        props: ImageProps,
        sources: Vec<String>,
        delay: Option<Duration>,
        config_summary: String,
    ) -> (Self, Task<Message>) {
        let mut app = Self {
            image: LazyImageState::new("Viewer", image_config).with_props(props),
            sources,
            index: 0,
            delay,
            config_summary,
        };
        let task = app.show_current();
        (app, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Image(msg) => self.image.update(msg).map(Message::Image),
            Message::Next => {
                if self.sources.is_empty() {
                    return Task::none();
                }
                self.index = (self.index + 1) % self.sources.len();
                self.show_current()
            }
            Message::Previous => {
                if self.sources.is_empty() {
                    return Task::none();
                }
                self.index = (self.index + self.sources.len() - 1) % self.sources.len();
                self.show_current()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let image = lazy_image_view(&self.image).map(Message::Image);

        let label = self
            .sources
            .get(self.index)
            .map(|source| format!("{}/{}  {}", self.index + 1, self.sources.len(), source))
            .unwrap_or_else(|| "No sources (pass paths or set `sources` in config.yaml)".to_string());

        let nav = row![
            button(text("◀").size(12)).on_press(Message::Previous),
            text(label).size(12),
            Space::new().width(Length::Fill),
            button(text("▶").size(12)).on_press(Message::Next),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let status = text(format!(
            "class=\"{}\"  phase={:?}  {}",
            self.image.attrs().classes.class_string(),
            self.image.state().phase(),
            self.config_summary
        ))
        .size(10);

        container(column![image, nav, status].spacing(8).align_x(Alignment::Center))
            .padding(12)
            .center_x(Length::Fill)
            .into()
    }

    /// Bind the source at the current index
    fn show_current(&mut self) -> Task<Message> {
        let Some(source) = self.sources.get(self.index) else {
            return Task::none();
        };
        log::info!("Showing source {}: {}", self.index, source);

        let descriptor = descriptor_for(source, self.delay);
        self.image.set_source(descriptor).map(Message::Image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(sources: &[&str]) -> ViewerApp {
        let (app, _task) = ViewerApp::new(
            &ImageConfig::default(),
            ImageProps::new(),
            sources.iter().map(|s| s.to_string()).collect(),
            None,
            "config loaded".to_string(),
        );
        app
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app(&["a.png", "b.png", "c.png"]);
        assert_eq!(app.image.state().resolved_source.as_deref(), Some("a.png"));

        let _ = app.update(Message::Previous);
        assert_eq!(app.index, 2);
        assert_eq!(app.image.state().resolved_source.as_deref(), Some("c.png"));

        let _ = app.update(Message::Next);
        assert_eq!(app.index, 0);
        assert_eq!(app.image.state().resolved_source.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_no_sources_is_idle() {
        let mut app = app(&[]);
        let _ = app.update(Message::Next);
        assert_eq!(app.index, 0);
        assert_eq!(app.image.state().resolved_source, None);
    }
}
