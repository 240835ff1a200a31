// Admin console: HTTP client for /api/admin/* plus pure table and form helpers.
pub mod client;
pub mod form;
pub mod view;

pub use client::AdminClient;
pub use form::{EditUserForm, FormError, FormMessage, NewUserForm};
pub use view::{ClickRowView, StatsView, UserRowView};
