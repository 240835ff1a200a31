use thiserror::Error;

/// Alert text when the request never produced a server answer.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error starting analysis";

/// Alert text for a non-2xx answer without a usable `error` field.
pub const SERVER_FAILURE_MESSAGE: &str = "Error";

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("HTTP transport error: {source}")]
    HttpError {
        #[from]
        source: reqwest::Error,
    },

    // Non-2xx response other than the rate-limit signal.
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    ApiError { status: u16, message: Option<String> },

    #[error("Dashboard controller is no longer running")]
    ControllerClosed,
}

impl EngineError {
    /// Text for the blocking user notification.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::ApiError { message: Some(msg), .. } if !msg.trim().is_empty() => msg.clone(),
            EngineError::ApiError { .. } => SERVER_FAILURE_MESSAGE.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_error() {
        let err = EngineError::ApiError { status: 403, message: Some("expired".to_string()) };
        assert_eq!(err.user_message(), "expired");
        assert_eq!(err.to_string(), "Server returned 403: expired");
    }

    #[test]
    fn test_user_message_fallback() {
        let err = EngineError::ApiError { status: 500, message: None };
        assert_eq!(err.user_message(), SERVER_FAILURE_MESSAGE);
        let blank = EngineError::ApiError { status: 500, message: Some("  ".to_string()) };
        assert_eq!(blank.user_message(), SERVER_FAILURE_MESSAGE);
        assert_eq!(EngineError::ControllerClosed.user_message(), GENERIC_FAILURE_MESSAGE);
        let decode = serde_json::from_str::<u8>("x").map_err(EngineError::from);
        assert_eq!(decode.map_err(|e| e.user_message()), Err(GENERIC_FAILURE_MESSAGE.to_string()));
    }
}
