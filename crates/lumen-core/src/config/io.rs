//! YAML configuration I/O
//!
//! Loading never fails: a missing or broken file falls back to defaults, and
//! the returned [`LoadedConfig`] says which of the two happened so the
//! application can tell the user. Every loaded config is passed through
//! [`Normalize`] before it is handed out.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Post-load repair of out-of-range or empty values
pub trait Normalize {
    /// Fix the config in place, returning one note per adjusted field
    fn normalize(&mut self) -> Vec<String>;
}

/// How a configuration was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStatus {
    /// No file at the path; defaults
    Missing,
    /// Parsed from the file
    Loaded,
    /// File exists but could not be read or parsed; defaults
    Invalid(String),
}

impl ConfigStatus {
    /// True when the defaults are in use
    pub fn is_default(&self) -> bool {
        !matches!(self, Self::Loaded)
    }
}

impl fmt::Display for ConfigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no config file, using defaults"),
            Self::Loaded => write!(f, "config loaded"),
            Self::Invalid(reason) => write!(f, "config ignored ({}), using defaults", reason),
        }
    }
}

/// Result of [`load_config`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig<T> {
    pub config: T,
    pub status: ConfigStatus,
    /// Adjustments made by [`Normalize`]
    pub notes: Vec<String>,
}

impl<T> LoadedConfig<T> {
    /// One-line summary for a status bar
    pub fn summary(&self) -> String {
        match self.notes.len() {
            0 => self.status.to_string(),
            n => format!("{} ({} value(s) adjusted)", self.status, n),
        }
    }
}

/// Load and normalise a YAML configuration
///
/// ```ignore
/// let loaded: LoadedConfig<ViewerConfig> = load_config(&config_path);
/// log::info!("{}", loaded.summary());
/// ```
pub fn load_config<T>(path: &Path) -> LoadedConfig<T>
where
    T: DeserializeOwned + Default + Normalize,
{
    let (mut config, status) = read_config::<T>(path);
    let notes = config.normalize();
    for note in &notes {
        log::warn!("config {:?}: {}", path, note);
    }

    match &status {
        ConfigStatus::Invalid(_) => log::warn!("config {:?}: {}", path, status),
        _ => log::info!("config {:?}: {}", path, status),
    }

    LoadedConfig {
        config,
        status,
        notes,
    }
}

fn read_config<T>(path: &Path) -> (T, ConfigStatus)
where
    T: DeserializeOwned + Default,
{
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (T::default(), ConfigStatus::Missing);
        }
        Err(e) => return (T::default(), ConfigStatus::Invalid(e.to_string())),
    };

    // An empty file is a config with every field left at its default
    if contents.trim().is_empty() {
        return (T::default(), ConfigStatus::Loaded);
    }

    match serde_yaml::from_str(&contents) {
        Ok(config) => (config, ConfigStatus::Loaded),
        Err(e) => (T::default(), ConfigStatus::Invalid(e.to_string())),
    }
}

/// Write a configuration as YAML, creating parent directories
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(config).context("Config is not representable as YAML")?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create config directory {:?}", dir))?;
    }
    std::fs::write(path, yaml).with_context(|| format!("Cannot write config {:?}", path))?;

    log::info!("config {:?}: saved", path);
    Ok(())
}
