//! Viewer configuration
//!
//! Stored as YAML in the user's config directory.
//! Default location: ~/.config/lumen-viewer/config.yaml

use std::path::PathBuf;

use lumen_core::config::Normalize;
use lumen_core::ImageConfig;
use serde::{Deserialize, Serialize};

/// Smallest window edge the viewer accepts
const MIN_WINDOW_EDGE: f32 = 200.0;
/// Image frame limits in pixels
const MIN_IMAGE_SIZE: u32 = 16;
const MAX_IMAGE_SIZE: u32 = 4096;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Image element behaviour (race policy, failure reporting)
    pub image: ImageConfig,
    /// Window settings
    pub window: WindowConfig,
    /// Sources to cycle through when none are given on the command line.
    /// Plain paths, `file://` URLs, or `dir:<path>` for "first image in folder"
    pub sources: Vec<String>,
    /// Artificial resolver delay, turns every source into a dynamic one
    pub resolve_delay_ms: Option<u64>,
    /// Accessibility text for the image
    pub alt: Option<String>,
}

/// Window configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    /// Image frame size in pixels
    pub image_size: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 560.0,
            image_size: 480,
        }
    }
}

impl Normalize for ViewerConfig {
    fn normalize(&mut self) -> Vec<String> {
        let mut notes = Vec::new();

        let before = self.sources.len();
        self.sources = self
            .sources
            .iter()
            .map(|source| source.trim())
            .filter(|source| !source.is_empty())
            .map(str::to_string)
            .collect();
        if self.sources.len() != before {
            notes.push(format!("dropped {} blank source(s)", before - self.sources.len()));
        }

        if self.resolve_delay_ms == Some(0) {
            self.resolve_delay_ms = None;
            notes.push("resolve_delay_ms of 0 means no delay".to_string());
        }

        if self.alt.as_deref().is_some_and(|alt| alt.trim().is_empty()) {
            self.alt = None;
            notes.push("blank alt text removed".to_string());
        }

        notes.extend(self.window.normalize());
        notes
    }
}

impl Normalize for WindowConfig {
    fn normalize(&mut self) -> Vec<String> {
        let mut notes = Vec::new();
        let defaults = WindowConfig::default();

        for (name, edge, default) in [
            ("width", &mut self.width, defaults.width),
            ("height", &mut self.height, defaults.height),
        ] {
            if !edge.is_finite() {
                *edge = default;
                notes.push(format!("window.{} reset to {}", name, default));
            } else if *edge < MIN_WINDOW_EDGE {
                *edge = MIN_WINDOW_EDGE;
                notes.push(format!("window.{} raised to {}", name, MIN_WINDOW_EDGE));
            }
        }

        let clamped = self.image_size.clamp(MIN_IMAGE_SIZE, MAX_IMAGE_SIZE);
        if clamped != self.image_size {
            notes.push(format!("window.image_size {} clamped to {}", self.image_size, clamped));
            self.image_size = clamped;
        }

        notes
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/lumen-viewer/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("lumen-viewer")
        .join("config.yaml")
}
