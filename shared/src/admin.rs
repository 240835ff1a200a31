// Admin console wire types (/api/admin/*).
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub access_expires_at: Option<i64>, // None = lifetime access
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub last_analysis_started_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<AdminUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub is_admin: bool,
    pub access_expires_at: Option<i64>,
}

/// Only the fields that are `Some` are sent, so the server leaves the rest untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.username.is_none() && self.password.is_none() && self.is_admin.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClickLogEntry {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub button_name: String,
    #[serde(default)]
    pub clicked_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClickLogList {
    #[serde(default)]
    pub logs: Vec<ClickLogEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl StatsPeriod {
    pub const ALL: [StatsPeriod; 3] = [StatsPeriod::Daily, StatsPeriod::Weekly, StatsPeriod::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatsPeriod::Daily => "daily",
            StatsPeriod::Weekly => "weekly",
            StatsPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(StatsPeriod::Daily),
            "weekly" => Ok(StatsPeriod::Weekly),
            "monthly" => Ok(StatsPeriod::Monthly),
            other => Err(format!("unknown stats period '{}'", other)),
        }
    }
}

/// Per-bucket click counts; all vectors are aligned with `labels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClickStats {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub telegram: Vec<u64>,
    #[serde(default, rename = "compra")]
    pub purchase: Vec<u64>,
    #[serde(default)]
    pub total: Vec<u64>,
}
