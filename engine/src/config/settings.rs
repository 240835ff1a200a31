// Engine settings: defaults, optionally overridden by a JSON file and the environment.
use crate::error::EngineError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "SIGNAL_DASHBOARD_BASE_URL";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub candles: CandleSettings,
    pub analysis: AnalysisSettings,
    pub links: LinkSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CandleSettings {
    pub tick_ms: u64,
    pub capacity: usize,
    pub seed_len: usize,
    pub open_jitter: f64,
    pub close_jitter: f64,
    pub wick_max: f64,
    pub seed_base: f64,
    pub seed_spread: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    pub countdown_tick_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LinkSettings {
    pub signup_url: String,
    pub telegram_url: String,
    pub purchase_url: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 10,
            candles: CandleSettings::default(),
            analysis: AnalysisSettings::default(),
            links: LinkSettings::default(),
        }
    }
}

impl Default for CandleSettings {
    fn default() -> Self {
        CandleSettings {
            tick_ms: 1_000,
            capacity: 80,
            seed_len: 50,
            open_jitter: 0.3,
            close_jitter: 0.4,
            wick_max: 0.6,
            seed_base: 100.0,
            seed_spread: 10.0,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            delay_min_ms: 7_000,
            delay_max_ms: 20_000,
            countdown_tick_ms: 1_000,
        }
    }
}

impl Default for LinkSettings {
    fn default() -> Self {
        LinkSettings {
            signup_url: "https://www.homebroker.com/ref/feT3lSod/".to_string(),
            telegram_url: "https://t.me/".to_string(),
            purchase_url: "https://www.homebroker.com/ref/feT3lSod/".to_string(),
        }
    }
}

impl CandleSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl AnalysisSettings {
    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }
}

impl EngineSettings {
    /// Reads a JSON settings file; missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded engine settings from file.");
        settings.validate()?;
        Ok(settings)
    }

    /// File (if given and present) -> environment override -> validation.
    pub fn resolve(path: Option<&Path>) -> Result<Self, EngineError> {
        let mut settings = match path {
            Some(p) if p.exists() => Self::load(p)?,
            Some(p) => {
                tracing::warn!(path = %p.display(), "Settings file not found, using defaults.");
                Self::default()
            }
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            settings.apply_base_url_override(&url);
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_base_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            tracing::info!(base_url = %url, "Base URL overridden from environment.");
            self.base_url = url.trim_end_matches('/').to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let c = &self.candles;
        let a = &self.analysis;
        if self.base_url.trim().is_empty() {
            return Err(EngineError::ConfigError("base_url must not be empty".to_string()));
        }
        if c.tick_ms == 0 || a.countdown_tick_ms == 0 {
            return Err(EngineError::ConfigError("timer periods must be greater than 0".to_string()));
        }
        if c.capacity == 0 || c.seed_len > c.capacity {
            return Err(EngineError::ConfigError(format!(
                "seed_len ({}) must not exceed a non-zero capacity ({})",
                c.seed_len, c.capacity
            )));
        }
        if c.open_jitter < 0.0 || c.close_jitter < 0.0 || c.wick_max < 0.0 || c.seed_spread < 0.0 {
            return Err(EngineError::ConfigError("candle jitters must be non-negative".to_string()));
        }
        if c.seed_base <= 0.0 {
            return Err(EngineError::ConfigError("seed_base must be positive".to_string()));
        }
        if a.delay_min_ms > a.delay_max_ms {
            return Err(EngineError::ConfigError(format!(
                "delay_min_ms ({}) exceeds delay_max_ms ({})",
                a.delay_min_ms, a.delay_max_ms
            )));
        }
        Ok(())
    }
}
