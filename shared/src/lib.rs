// Wire and domain models shared by the dashboard engine and the GUI.
pub mod admin;
pub mod models;
pub mod utils;
