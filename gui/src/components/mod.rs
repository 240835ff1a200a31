// GUI components module
pub mod admin;
pub mod chart;
pub mod dashboard;
pub mod notification;
pub mod result_panel;

pub use admin::AdminConsole;
pub use dashboard::Dashboard;
