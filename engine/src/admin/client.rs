use crate::config::EngineSettings;
use crate::error::EngineError;
use crate::services::api_client::{build_http_client, decode_response, endpoint};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use shared::admin::{
    AdminUser, ClickLogEntry, ClickLogList, ClickStats, CreateUserRequest, MutationResponse,
    StatsPeriod, UpdateUserRequest, UserList,
};

pub const USERS_PATH: &str = "/api/admin/users";
pub const CLICK_LOG_PATH: &str = "/api/admin/clicks/list";
pub const CLICK_STATS_PATH: &str = "/api/admin/clicks/stats";

/// Shares the session cookie jar semantics of the dashboard client; the admin
/// session must already be established on `base_url`.
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        Ok(Self {
            http: build_http_client(settings)?,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_users(&self) -> Result<Vec<AdminUser>, EngineError> {
        let list: UserList = self.fetch(self.http.get(endpoint(&self.base_url, USERS_PATH))).await?;
        tracing::debug!(count = list.users.len(), "Fetched users.");
        Ok(list.users)
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<MutationResponse, EngineError> {
        let response: MutationResponse = self
            .fetch(self.http.post(endpoint(&self.base_url, USERS_PATH)).json(request))
            .await?;
        tracing::info!(id = ?response.id, username = %request.username, "User created.");
        Ok(response)
    }

    /// Only the fields set on `request` are changed server-side.
    pub async fn update_user(&self, id: i64, request: &UpdateUserRequest) -> Result<MutationResponse, EngineError> {
        let url = endpoint(&self.base_url, &user_path(id));
        let response = self.fetch(self.http.put(url).json(request)).await?;
        tracing::info!(id, "User updated.");
        Ok(response)
    }

    pub async fn delete_user(&self, id: i64) -> Result<MutationResponse, EngineError> {
        let url = endpoint(&self.base_url, &user_path(id));
        let response = self.fetch(self.http.delete(url)).await?;
        tracing::info!(id, "User deleted.");
        Ok(response)
    }

    pub async fn list_clicks(&self) -> Result<Vec<ClickLogEntry>, EngineError> {
        let list: ClickLogList = self.fetch(self.http.get(endpoint(&self.base_url, CLICK_LOG_PATH))).await?;
        Ok(list.logs)
    }

    pub async fn click_stats(&self, period: StatsPeriod) -> Result<ClickStats, EngineError> {
        let request = self
            .http
            .get(endpoint(&self.base_url, CLICK_STATS_PATH))
            .query(&[("period", period.as_str())]);
        self.fetch(request).await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, EngineError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body).map_err(|e| {
            tracing::warn!(status, error = %e, "Admin request failed.");
            e
        })
    }
}

fn user_path(id: i64) -> String {
    format!("{}/{}", USERS_PATH, id)
}
