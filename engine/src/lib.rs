// Engine library root: UI-agnostic core of the signal dashboard.

pub mod admin;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod services;

pub use error::EngineError;
