// Headless dashboard runner: drives the controller against a live backend and logs views.
use engine::config::settings::EngineSettings;
use engine::dashboard::{DashboardController, LifecycleEvent, SystemClock, UiEvent};
use engine::services::HttpDashboardApi;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting headless signal dashboard...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = EngineSettings::resolve(settings_path.as_deref())?;
    info!(base_url = %settings.base_url, "Dashboard backend configured.");

    let api = Arc::new(HttpDashboardApi::new(&settings)?);
    let controller = DashboardController::new(settings, api, Arc::new(SystemClock));
    let handle = controller.handle();
    let mut views = handle.subscribe();
    let runner = tokio::spawn(controller.run());

    handle.send(UiEvent::StartAnalysis)?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last_status = String::new();
    let mut last_countdown = None;
    let mut revealed = false;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Ctrl-C received, unmounting dashboard.");
                handle.send(LifecycleEvent::Unmount)?;
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                if view.status_text != last_status {
                    info!(phase = ?view.phase, status = %view.status_text, "Dashboard status changed.");
                    last_status = view.status_text.clone();
                }
                if let (Some(analysis), false) = (&view.analysis, revealed) {
                    info!(headline = %analysis.headline, lines = ?analysis.lines, "Analysis revealed.");
                }
                revealed = view.analysis.is_some();
                if let Some(notification) = &view.notification {
                    info!(?notification, "Notification raised.");
                    handle.send(UiEvent::DismissNotification)?;
                }
                let countdown = view.countdown_display();
                if countdown != last_countdown {
                    if let Some(text) = &countdown {
                        info!("{}", text);
                    }
                    last_countdown = countdown;
                }
            }
        }
    }

    runner.await?;
    info!("Headless dashboard finished.");
    Ok(())
}
