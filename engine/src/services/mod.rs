// HTTP clients for the backend endpoints the dashboard consumes.
pub mod api_client;

pub use api_client::{DashboardApi, HttpDashboardApi, StartAnalysisOutcome};
