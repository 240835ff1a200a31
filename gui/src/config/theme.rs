// Dashboard colour palettes.
use super::AppConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub background: String,
    pub surface: String,
    pub foreground: String,
    pub muted: String,
    pub accent: String,
    pub danger: String,
    pub chart_background: String,
    pub chart_grid: String,
    pub chart_bullish: String,
    pub chart_bearish: String,
}

impl ThemePalette {
    pub fn default_dark() -> Self {
        Self {
            background: "#0b0d12".to_string(),
            surface: "#151922".to_string(),
            foreground: "#e6e8ee".to_string(),
            muted: "#8a91a5".to_string(),
            accent: "#ffd400".to_string(),
            danger: "#ef5350".to_string(),
            chart_background: "#0f1115".to_string(),
            chart_grid: "#2a2e39".to_string(),
            chart_bullish: "#26a69a".to_string(),
            chart_bearish: "#ef5350".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#f5f6f8".to_string(),
            surface: "#ffffff".to_string(),
            foreground: "#111318".to_string(),
            muted: "#5f6675".to_string(),
            accent: "#c9a400".to_string(),
            danger: "#d32f2f".to_string(),
            chart_background: "#ffffff".to_string(),
            chart_grid: "#e0e0e0".to_string(),
            chart_bullish: "#4caf50".to_string(),
            chart_bearish: "#f44336".to_string(),
        }
    }

    /// Base palette by theme name, chart colours taken from the config.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut palette = match config.app.theme.to_ascii_lowercase().as_str() {
            "light" => Self::default_light(),
            _ => Self::default_dark(),
        };
        palette.chart_background = config.chart.background.clone();
        palette.chart_grid = config.chart.grid.color.clone();
        palette.chart_bullish = config.chart.candle.bullish_color.clone();
        palette.chart_bearish = config.chart.candle.bearish_color.clone();
        palette
    }
}
