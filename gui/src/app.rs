#![allow(non_snake_case)]
use crate::components::{AdminConsole, Dashboard};
use crate::config::theme::ThemePalette;
use crate::config::AppConfig;
use crate::services::EngineClient;
use crate::state::Surface;
use dioxus::prelude::*;
use engine::dashboard::LifecycleEvent;

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let engine = use_context::<EngineClient>();
    let mut surface = use_signal(Surface::default);
    let palette = ThemePalette::from_config(&config);

    use_drop(move || {
        tracing::info!("Window closing, unmounting dashboard.");
        if let Err(e) = engine.dashboard.send(LifecycleEvent::Unmount) {
            tracing::warn!(error = %e, "Dashboard controller already stopped.");
        }
    });

    let current = *surface.read();
    // The dashboard stays mounted while hidden so its timers keep their state.
    let dashboard_display = if current == Surface::Dashboard { "block" } else { "none" };
    let nav = config.app.admin_enabled.then(|| {
        rsx! {
            nav {
                style: "display: flex; gap: 8px; margin-bottom: 16px;",
                button { disabled: current == Surface::Dashboard, onclick: move |_| surface.set(Surface::Dashboard), "Dashboard" }
                button { disabled: current == Surface::Admin, onclick: move |_| surface.set(Surface::Admin), "Admin" }
            }
        }
    });

    rsx! {
        div {
            style: "min-height: 100vh; padding: 16px; font-family: sans-serif; background: {palette.background}; color: {palette.foreground};",
            {nav}
            div {
                style: "display: {dashboard_display};",
                Dashboard { palette: palette.clone(), chart: config.chart.clone() }
            }
            if current == Surface::Admin {
                AdminConsole { palette: palette.clone() }
            }
        }
    }
}
