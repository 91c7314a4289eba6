//! Configuration for lumen image elements
//!
//! - YAML loading with a reported [`ConfigStatus`] and [`Normalize`] repair
//! - [`ImageConfig`]: per-element behaviour (race policy, failure reporting)
//!
//! # Usage
//!
//! ```ignore
//! use lumen_core::config::{load_config, save_config, LoadedConfig};
//!
//! let loaded: LoadedConfig<MyAppConfig> = load_config(&config_path);
//! if loaded.status == ConfigStatus::Missing {
//!     save_config(&loaded.config, &config_path)?;
//! }
//! ```

mod image;
mod io;

pub use image::ImageConfig;
pub use io::{load_config, save_config, ConfigStatus, LoadedConfig, Normalize};
