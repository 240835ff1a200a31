// Starts the dashboard controller on its own tokio runtime and hands the GUI a handle.
use anyhow::Result;
use engine::admin::AdminClient;
use engine::config::EngineSettings;
use engine::dashboard::{ControllerHandle, DashboardController, SystemClock};
use engine::services::HttpDashboardApi;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Everything the front-end needs from the engine, provided as Dioxus context.
#[derive(Clone)]
pub struct EngineClient {
    pub dashboard: ControllerHandle,
    pub admin: Arc<AdminClient>,
}

impl EngineClient {
    /// The controller runs until it processes an unmount; the returned thread handle
    /// finishes then.
    pub fn start(settings: EngineSettings) -> Result<(Self, JoinHandle<()>)> {
        let api = Arc::new(HttpDashboardApi::new(&settings)?);
        let admin = Arc::new(AdminClient::new(&settings)?);
        let controller = DashboardController::new(settings, api, Arc::new(SystemClock));
        let dashboard = controller.handle();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("dashboard-controller")
            .enable_all()
            .build()?;
        let thread = std::thread::Builder::new()
            .name("dashboard-runtime".to_string())
            .spawn(move || {
                runtime.block_on(controller.run());
                tracing::info!("Dashboard runtime thread exiting.");
            })?;

        Ok((Self { dashboard, admin }, thread))
    }
}
