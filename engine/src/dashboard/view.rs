// Pure projection of `DashboardState` into what the front-end draws.
use super::state::{DashboardState, Notification, Phase};
use shared::models::{AnalysisResult, CandlePoint};

pub const REENTRY_NOTE: &str = "👉🏼 Up to 2 re-entries if needed";
pub const SIGNUP_LABEL: &str = "➡️ Sign up with the broker";

/// Snapshot published after every dispatched event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub phase: Phase,
    pub chart_visible: bool,
    pub candles: Vec<CandlePoint>,
    pub generator_running: bool,
    pub result_visible: bool,
    pub analysis: Option<AnalysisView>,
    pub trigger_enabled: bool,
    pub trigger_label: String,
    pub status_text: String,
    pub countdown_text: Option<String>,
    pub notification: Option<Notification>,
}

impl DashboardView {
    /// "Time remaining: mm:ss" while a countdown is showing.
    pub fn countdown_display(&self) -> Option<String> {
        self.countdown_text
            .as_ref()
            .map(|text| format!("Time remaining: {}", text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisView {
    pub headline: String,
    pub lines: Vec<String>,
    pub reentry_note: String,
    pub signup_label: String,
    pub signup_url: String,
}

pub fn render(state: &DashboardState) -> DashboardView {
    DashboardView {
        phase: state.phase,
        chart_visible: state.chart_visible,
        candles: if state.chart_visible { state.candles.to_vec() } else { Vec::new() },
        generator_running: state.generator_running,
        result_visible: state.result_visible,
        analysis: state
            .analysis
            .as_ref()
            .filter(|_| state.result_visible)
            .map(|result| render_analysis(result, &state.links.signup_url)),
        trigger_enabled: state.trigger_enabled,
        trigger_label: state.trigger_label.to_string(),
        status_text: state.status_text.clone(),
        countdown_text: state.countdown_text.clone(),
        notification: state.notification.clone(),
    }
}

/// Server fields are interpolated verbatim, never interpreted.
pub fn render_analysis(result: &AnalysisResult, signup_url: &str) -> AnalysisView {
    AnalysisView {
        headline: format!("⚠️ {} ⚠️", result.title),
        lines: vec![
            format!("💵 Asset = {}", result.currency),
            format!("⏰ Expiry = {}", result.expiry),
            format!("🛎 Entry = {}", result.entry),
            result.direction.clone(),
            format!("♾️ 1st Protection🛡️ - {}", result.protection1),
            format!("♾️ 2nd Protection🛡️ - {}", result.protection2),
        ],
        reentry_note: REENTRY_NOTE.to_string(),
        signup_label: SIGNUP_LABEL.to_string(),
        signup_url: signup_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::state::labels;

    fn result() -> AnalysisResult {
        AnalysisResult {
            title: "ANALYSIS COMPLETE".to_string(),
            currency: "<b>EUR-USD</b>".to_string(),
            expiry: "1 Minute".to_string(),
            entry: "14:03".to_string(),
            direction: "🟢 BUY".to_string(),
            protection1: "14:04".to_string(),
            protection2: "14:05".to_string(),
        }
    }

    #[test]
    fn test_render_analysis_markup() {
        let view = render_analysis(&result(), "https://broker.test/ref");
        assert_eq!(view.headline, "⚠️ ANALYSIS COMPLETE ⚠️");
        assert_eq!(
            view.lines,
            vec![
                "💵 Asset = <b>EUR-USD</b>",
                "⏰ Expiry = 1 Minute",
                "🛎 Entry = 14:03",
                "🟢 BUY",
                "♾️ 1st Protection🛡️ - 14:04",
                "♾️ 2nd Protection🛡️ - 14:05",
            ]
        );
        assert_eq!(view.reentry_note, REENTRY_NOTE);
        assert_eq!(view.signup_url, "https://broker.test/ref");
    }

    #[test]
    fn test_render_idle_state() {
        let state = DashboardState::default();
        let view = render(&state);
        assert_eq!(view.phase, Phase::Idle);
        assert!(view.chart_visible && view.trigger_enabled);
        assert!(!view.result_visible);
        assert_eq!(view.analysis, None);
        assert_eq!(view.trigger_label, labels::TRIGGER_IDLE);
        assert_eq!(view.countdown_display(), None);
    }

    #[test]
    fn test_render_revealed_state_hides_candles() {
        let mut state = DashboardState::default();
        state.candles.push(CandlePoint { timestamp: 1, open: 1.0, high: 1.0, low: 1.0, close: 1.0 });
        state.chart_visible = false;
        state.result_visible = true;
        state.analysis = Some(result());
        state.countdown_text = Some("06:48".to_string());

        let view = render(&state);
        assert!(view.candles.is_empty());
        assert_eq!(view.analysis.as_ref().map(|a| a.signup_url.clone()), Some(state.links.signup_url.clone()));
        assert_eq!(view.countdown_display().as_deref(), Some("Time remaining: 06:48"));
    }
}
