// Table rows and chart series for the admin console, in display form.
use shared::admin::{AdminUser, ClickLogEntry, ClickStats};
use shared::utils::format_local_datetime;

pub const LIFETIME: &str = "Lifetime";
pub const NEVER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRowView {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub admin: &'static str,
    pub expires: String,
    pub last_analysis: String,
}

pub fn user_row(user: &AdminUser) -> UserRowView {
    UserRowView {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        admin: if user.is_admin { "Yes" } else { "No" },
        expires: user
            .access_expires_at
            .map(format_local_datetime)
            .unwrap_or_else(|| LIFETIME.to_string()),
        last_analysis: user
            .last_analysis_started_at
            .map(format_local_datetime)
            .unwrap_or_else(|| NEVER.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickRowView {
    pub id: i64,
    pub who: String,
    pub button: String,
    pub clicked_at: String,
}

pub fn click_row(entry: &ClickLogEntry) -> ClickRowView {
    ClickRowView {
        id: entry.id,
        who: entry
            .username
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| entry.user_id.to_string()),
        button: entry.button_name.clone(),
        clicked_at: entry
            .clicked_at
            .map(format_local_datetime)
            .unwrap_or_else(|| NEVER.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSeries {
    pub name: &'static str,
    pub values: Vec<u64>,
}

/// Stacked bar data: one bucket per label, series aligned to `labels`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsView {
    pub labels: Vec<String>,
    pub series: Vec<StatsSeries>,
    pub max_total: u64,
}

pub fn stats_view(stats: &ClickStats) -> StatsView {
    let len = stats.labels.len();
    let align = |values: &[u64]| -> Vec<u64> {
        (0..len).map(|i| values.get(i).copied().unwrap_or(0)).collect()
    };
    let total = align(&stats.total);
    StatsView {
        labels: stats.labels.clone(),
        max_total: total.iter().copied().max().unwrap_or(0),
        series: vec![
            StatsSeries { name: "Telegram", values: align(&stats.telegram) },
            StatsSeries { name: "Purchase", values: align(&stats.purchase) },
            StatsSeries { name: "Total", values: total },
        ],
    }
}
