// GUI configuration module
pub mod theme;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Overrides the embedded default GUI config with a JSON file on disk.
pub const CONFIG_PATH_ENV: &str = "SIGNAL_DASHBOARD_GUI_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    #[serde(default)]
    pub engine: EngineConnSettings,
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub theme: String, // "dark" or "light"
    #[serde(default)]
    pub admin_enabled: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct EngineConnSettings {
    /// Engine settings JSON; missing file means engine defaults.
    #[serde(default)]
    pub settings_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartConfig {
    pub height: u32,
    pub background: String,
    pub candle: CandleStyle,
    pub grid: GridStyle,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CandleStyle {
    pub bullish_color: String,
    pub bearish_color: String,
    pub wick_width: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GridStyle {
    pub color: String,
    pub enabled: bool,
    pub lines: u32,
}

impl AppConfig {
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json");
        let config: AppConfig = serde_json::from_str(config_str)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// File named by the environment if set and readable, otherwise the embedded default.
    pub fn resolve() -> Result<Self, anyhow::Error> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => match Self::load(&path) {
                Ok(config) => {
                    tracing::info!(path = %path, "Loaded GUI configuration.");
                    Ok(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "GUI configuration unreadable, using embedded default.");
                    Self::load_default()
                }
            },
            Err(_) => Self::load_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_default_parses() {
        let config = AppConfig::load_default().unwrap();
        assert_eq!(config.app.title, "Signal Dashboard");
        assert!(config.app.admin_enabled);
        assert_eq!(config.engine.settings_path, Some(PathBuf::from("signal-dashboard.json")));
        assert_eq!(config.chart.candle.bullish_color, "#26a69a");
    }

    #[test]
    fn test_load_from_file_without_engine_section() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{"version":"1","app":{{"title":"T","width":800,"height":600,"theme":"light"}},
            "chart":{{"height":200,"background":"#fff","candle":{{"bullish_color":"#0f0","bearish_color":"#f00","wick_width":2}},
            "grid":{{"color":"#ccc","enabled":false,"lines":0}}}}}}"##
        )
        .unwrap();
        file.flush().unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.app.theme, "light");
        assert!(!config.app.admin_enabled);
        assert_eq!(config.engine.settings_path, None);
    }
}
