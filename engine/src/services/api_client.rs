// Client for the dashboard endpoints: start analysis, session sync, click registration.
use crate::config::EngineSettings;
use crate::error::EngineError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::models::{
    ApiErrorBody, BlockedResponse, ButtonName, ClickRequest, ClickResponse, SessionInfo,
    StartAnalysisResponse,
};

pub const START_ANALYSIS_PATH: &str = "/api/start-analysis";
pub const SESSION_PATH: &str = "/api/user/me";
pub const REGISTER_CLICK_PATH: &str = "/api/registrar-clique";

const TOO_MANY_REQUESTS: u16 = 429;

/// Outcome of a start-analysis round-trip that reached the server and was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartAnalysisOutcome {
    Accepted(StartAnalysisResponse),
    /// 429: the cooldown is still active. The deadline is absent if the body lacked it.
    Blocked { blocked_until: Option<i64> },
}

#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn start_analysis(&self) -> Result<StartAnalysisOutcome, EngineError>;
    async fn session(&self) -> Result<SessionInfo, EngineError>;
    async fn register_click(&self, button: ButtonName) -> Result<ClickResponse, EngineError>;
}

pub struct HttpDashboardApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDashboardApi {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        Ok(Self {
            http: build_http_client(settings)?,
            base_url: settings.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn start_analysis(&self) -> Result<StartAnalysisOutcome, EngineError> {
        let response = self.http.post(self.url(START_ANALYSIS_PATH)).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, "start-analysis response received.");
        classify_start_response(status, &body)
    }

    async fn session(&self) -> Result<SessionInfo, EngineError> {
        let response = self.http.get(self.url(SESSION_PATH)).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body)
    }

    async fn register_click(&self, button: ButtonName) -> Result<ClickResponse, EngineError> {
        let response = self
            .http
            .post(self.url(REGISTER_CLICK_PATH))
            .json(&ClickRequest { button_name: button })
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body)
    }
}

/// Client with a cookie store, so the server session survives across calls.
pub(crate) fn build_http_client(settings: &EngineSettings) -> Result<reqwest::Client, EngineError> {
    Ok(reqwest::Client::builder()
        .timeout(settings.request_timeout())
        .cookie_store(true)
        .build()?)
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub fn classify_start_response(status: u16, body: &str) -> Result<StartAnalysisOutcome, EngineError> {
    if status == TOO_MANY_REQUESTS {
        let blocked: BlockedResponse = serde_json::from_str(body).unwrap_or_default();
        return Ok(StartAnalysisOutcome::Blocked { blocked_until: blocked.blocked_until });
    }
    decode_response(status, body).map(StartAnalysisOutcome::Accepted)
}

/// 2xx -> decode `T`; anything else -> `ApiError` carrying the server's `error` field.
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, EngineError> {
    if (200..300).contains(&status) {
        return Ok(serde_json::from_str(body)?);
    }
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|e| e.error);
    Err(EngineError::ApiError { status, message })
}
