use crate::config::{AnalysisSettings, EngineSettings, LinkSettings};
use crate::data::{CandleBuffer, CandleGenerator};
use shared::models::{AnalysisResult, ButtonName, CooldownState};

pub mod labels {
    pub const TRIGGER_IDLE: &str = "START ANALYSIS";
    pub const TRIGGER_WORKING: &str = "ANALYZING...";
    pub const TRIGGER_BLOCKED: &str = "BLOCKED";

    pub const STATUS_IDLE: &str = "Click the button to start the analysis";
    pub const STATUS_WORKING: &str = "AI ANALYZING MARKET...";
    pub const STATUS_BLOCKED: &str = "Blocked. Please wait...";
    pub const STATUS_SESSION_BLOCKED: &str = "You are in a cooldown period.";

    pub const CLICK_REJECTED: &str = "Failed to register click";
    pub const CLICK_FAILED: &str = "Error";
    pub const BLOCKED_WITHOUT_DEADLINE: &str = "Analysis is blocked. Try again later.";
}

/// Where the analysis flow currently is. A failed request is transient: the flow
/// lands back in `Idle` with an alert pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Requesting,
    Blocked,
    Simulating,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub id: u64,
    pub deadline_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Blocking alert; stays until dismissed.
    Alert(String),
    /// A tracked click was recorded; the front-end should open `url`.
    OpenLink { button: ButtonName, url: String },
}

/// Server answer held while the artificial delay runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReveal {
    pub result: AnalysisResult,
    pub blocked_until: i64,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub mounted: bool,
    pub phase: Phase,

    // Candle generator
    pub generator: CandleGenerator,
    pub candles: CandleBuffer,
    pub chart_initialized: bool,
    pub generator_running: bool,

    // Panels and trigger
    pub chart_visible: bool,
    pub result_visible: bool,
    pub trigger_enabled: bool,
    pub trigger_label: &'static str,
    pub status_text: String,

    // Cooldown
    pub countdown: Option<Countdown>,
    pub countdown_text: Option<String>,
    next_countdown_id: u64,

    pub pending: Option<PendingReveal>,
    pub analysis: Option<AnalysisResult>,
    pub notification: Option<Notification>,

    pub analysis_settings: AnalysisSettings,
    pub links: LinkSettings,
}

impl DashboardState {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            mounted: false,
            phase: Phase::Idle,

            generator: CandleGenerator::new(settings.candles.clone()),
            candles: CandleBuffer::new(settings.candles.capacity),
            chart_initialized: false,
            generator_running: false,

            chart_visible: true,
            result_visible: false,
            trigger_enabled: true,
            trigger_label: labels::TRIGGER_IDLE,
            status_text: String::new(),

            countdown: None,
            countdown_text: None,
            next_countdown_id: 0,

            pending: None,
            analysis: None,
            notification: None,

            analysis_settings: settings.analysis.clone(),
            links: settings.links.clone(),
        }
    }

    pub fn cooldown(&self) -> CooldownState {
        CooldownState::new(self.countdown.map(|c| c.deadline_ms))
    }

    pub(crate) fn allocate_countdown_id(&mut self) -> u64 {
        self.next_countdown_id += 1;
        self.next_countdown_id
    }

    pub fn link_for(&self, button: ButtonName) -> &str {
        match button {
            ButtonName::Telegram => &self.links.telegram_url,
            ButtonName::Purchase => &self.links.purchase_url,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}
