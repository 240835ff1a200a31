// Trading dashboard: candle chart, analysis trigger, countdown and tracked links.
#![allow(non_snake_case)]
use super::chart::CandlestickChart;
use super::notification::NotificationModal;
use super::result_panel::ResultPanel;
use crate::config::theme::ThemePalette;
use crate::config::ChartConfig;
use crate::services::EngineClient;
use dioxus::prelude::*;
use engine::dashboard::{ControllerHandle, DashboardEvent, UiEvent};
use shared::models::ButtonName;

const CHART_WIDTH: f64 = 960.0;

fn post(handle: Signal<ControllerHandle>, event: impl Into<DashboardEvent>) {
    if let Err(e) = handle.read().send(event) {
        tracing::error!(error = %e, "Dashboard event dropped.");
    }
}

#[component]
pub fn Dashboard(palette: ThemePalette, chart: ChartConfig) -> Element {
    let engine = use_context::<EngineClient>();
    let handle = use_signal(|| engine.dashboard.clone());
    let mut view = use_signal(|| engine.dashboard.view());

    // Mirror controller snapshots into the signal so the component re-renders.
    use_future(move || {
        let mut rx = handle.read().subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let latest = rx.borrow_and_update().clone();
                view.set(latest);
            }
            tracing::info!("Dashboard view channel closed.");
        }
    });

    let v = view.read().clone();
    let chart_panel = v.chart_visible.then(|| {
        let feed_label = if v.generator_running { "Pause feed" } else { "Resume feed" };
        let feed_event = if v.generator_running { UiEvent::StopGenerator } else { UiEvent::ResumeGenerator };
        rsx! {
            div {
                class: "chart-container",
                CandlestickChart {
                    candles: v.candles.clone(),
                    width: CHART_WIDTH,
                    height: chart.height as f64,
                    palette: palette.clone(),
                    grid_lines: if chart.grid.enabled { chart.grid.lines } else { 0 },
                    wick_width: chart.candle.wick_width,
                }
                button { class: "feed-toggle", onclick: move |_| post(handle, feed_event), "{feed_label}" }
            }
        }
    });
    let result_panel = v
        .analysis
        .clone()
        .filter(|_| v.result_visible)
        .map(|analysis| rsx! { ResultPanel { analysis: analysis, palette: palette.clone() } });
    let countdown = v
        .countdown_display()
        .map(|text| rsx! { p { class: "countdown", style: "color: {palette.accent};", "{text}" } });
    let modal = v.notification.clone().map(|notification| {
        rsx! {
            NotificationModal {
                notification: notification,
                palette: palette.clone(),
                on_dismiss: move |_| post(handle, UiEvent::DismissNotification),
            }
        }
    });
    let trigger_style = if v.trigger_enabled {
        format!("background: {}; color: #000; cursor: pointer;", palette.accent)
    } else {
        format!("background: {}; color: {}; cursor: not-allowed;", palette.surface, palette.muted)
    };

    rsx! {
        div {
            class: "dashboard",
            style: "display: flex; flex-direction: column; gap: 12px; align-items: center;",
            h2 { "AI Market Analysis" }
            {chart_panel}
            {result_panel}
            p { class: "status", style: "color: {palette.muted};", "{v.status_text}" }
            button {
                class: "trigger",
                style: "padding: 12px 32px; font-weight: 800; border: none; border-radius: 6px; {trigger_style}",
                disabled: !v.trigger_enabled,
                onclick: move |_| post(handle, UiEvent::StartAnalysis),
                "{v.trigger_label}"
            }
            {countdown}
            div {
                class: "tracked-links",
                style: "display: flex; gap: 12px;",
                button {
                    onclick: move |_| post(handle, UiEvent::TrackedClick { button: ButtonName::Telegram }),
                    "Join Telegram"
                }
                button {
                    onclick: move |_| post(handle, UiEvent::TrackedClick { button: ButtonName::Purchase }),
                    "Buy access"
                }
            }
            {modal}
        }
    }
}
