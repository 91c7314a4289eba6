//! Lumen Viewer - image viewer built on lazy image widgets
//!
//! Cycles through a list of image sources. Sources come from the command
//! line or from `sources` in the config file; `dir:<path>` sources are
//! resolved asynchronously to the first image in that folder.
//!
//! ## Command line flags
//!
//! See [`args`] or `lumen-viewer --help`. `RUST_LOG=debug` shows resolution
//! and render events.

mod app;
mod args;
mod config;
mod sources;

use std::time::Duration;

use clap::Parser;
use iced::{Size, Task};
use lumen_core::config::{load_config, save_config, ConfigStatus, LoadedConfig, Normalize};
use lumen_core::{ImageProps, RacePolicy};

use app::{Message, ViewerApp};
use args::ViewerArgs;
use config::ViewerConfig;

fn main() -> iced::Result {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = ViewerArgs::parse();

    log::info!("lumen-viewer starting up");

    let config_path = args
        .config_path
        .clone()
        .unwrap_or_else(config::default_config_path);
    let loaded: LoadedConfig<ViewerConfig> = load_config(&config_path);
    let config_summary = loaded.summary();

    // First run: leave a file behind that the user can edit
    if loaded.status == ConfigStatus::Missing {
        if let Err(e) = save_config(&loaded.config, &config_path) {
            log::warn!("Could not write default config: {:#}", e);
        }
    }

    let mut config = loaded.config;

    // Command line wins over the config file
    if !args.sources.is_empty() {
        config.sources = args.sources.clone();
    }
    if args.delay_ms.is_some() {
        config.resolve_delay_ms = args.delay_ms;
    }
    if args.legacy_race {
        config.image.race_policy = RacePolicy::LastWriterWins;
    }
    for note in config.normalize() {
        log::warn!("command line: {}", note);
    }

    log::info!(
        "{} source(s), race policy {:?}, resolve delay {:?} ms",
        config.sources.len(),
        config.image.race_policy,
        config.resolve_delay_ms
    );

    let window_size = Size::new(config.window.width, config.window.height);

    iced::application(
        move || {
            let size = config.window.image_size.to_string();
            let mut props = ImageProps::new()
                .class_name("viewer")
                .attribute("width", size.clone())
                .attribute("height", size);
            if let Some(alt) = &config.alt {
                props = props.alt(alt.clone());
            }

            ViewerApp::new(
                &config.image,
                props,
                config.sources.clone(),
                config.resolve_delay_ms.map(Duration::from_millis),
                config_summary.clone(),
            )
        },
        update,
        view,
    )
    .theme(theme)
    .title("Lumen Viewer")
    .window_size(window_size)
    .run()
}

/// Update function for iced
fn update(app: &mut ViewerApp, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &ViewerApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Theme function for iced
fn theme(_app: &ViewerApp) -> iced::Theme {
    iced::Theme::Dark
}
