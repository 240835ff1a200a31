// Analysis/cooldown lifecycle of the trading dashboard.
//
// Events flow through a single dispatcher (`reducer::reduce`) that mutates
// `DashboardState` and returns effects; `controller::DashboardController` executes
// those effects on tokio (timers, delays, HTTP) and publishes `view::DashboardView`.
pub mod controller;
pub mod event;
pub mod reducer;
pub mod state;
pub mod view;

pub use controller::{Clock, ControllerHandle, DashboardController, SystemClock};
pub use event::*;
pub use state::*;
pub use view::{AnalysisView, DashboardView};
