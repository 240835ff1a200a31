// GUI main entry point using Dioxus
#![allow(non_snake_case)]

use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::AppConfig;
use engine::config::EngineSettings;
use services::EngineClient;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Signal Dashboard GUI (Dioxus Desktop)...");

    let app_config = AppConfig::resolve()?;
    tracing::info!(version = %app_config.version, "Loaded GUI configuration.");

    let settings = EngineSettings::resolve(app_config.engine.settings_path.as_deref())?;
    let (engine, _controller_thread) = EngineClient::start(settings)?;

    let desktop_config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(app_config.app.title.clone())
            .with_inner_size(LogicalSize::new(app_config.app.width, app_config.app.height)),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(app_config)
        .with_context(engine)
        .launch(App);

    tracing::info!("Signal Dashboard GUI finished.");
    Ok(())
}
