// Single dispatcher for every dashboard transition.
//
// Idle -> Requesting -> { Blocked | Simulating | Idle (+alert) }
// Simulating -> Revealed -> (countdown expiry) -> Idle
use super::event::{DashboardEvent, Effect, LifecycleEvent, NetEvent, TimerEvent, UiEvent};
use super::state::{labels, Countdown, DashboardState, Notification, PendingReveal, Phase};
use crate::config::AnalysisSettings;
use crate::data::candle_feed::FALLBACK_CLOSE;
use rand::Rng;
use shared::models::CooldownState;
use shared::utils::format_countdown;
use std::time::Duration;

pub fn reduce<R: Rng + ?Sized>(
    state: &mut DashboardState,
    event: DashboardEvent,
    now_ms: i64,
    rng: &mut R,
) -> Vec<Effect> {
    if !state.mounted && !matches!(event, DashboardEvent::Lifecycle(_)) {
        tracing::debug!(?event, "Dashboard not mounted, dropping event.");
        return Vec::new();
    }
    match event {
        DashboardEvent::Lifecycle(ev) => on_lifecycle(state, ev, now_ms, rng),
        DashboardEvent::Ui(ev) => on_ui(state, ev, now_ms, rng),
        DashboardEvent::Net(ev) => on_net(state, ev, now_ms, rng),
        DashboardEvent::Timer(ev) => on_timer(state, ev, now_ms, rng),
    }
}

/// Uniform in `[delay_min_ms, delay_max_ms]`, both ends inclusive.
pub fn sample_reveal_delay<R: Rng + ?Sized>(settings: &AnalysisSettings, rng: &mut R) -> Duration {
    Duration::from_millis(rng.gen_range(settings.delay_min_ms..=settings.delay_max_ms))
}

fn on_lifecycle<R: Rng + ?Sized>(
    state: &mut DashboardState,
    ev: LifecycleEvent,
    now_ms: i64,
    rng: &mut R,
) -> Vec<Effect> {
    match ev {
        LifecycleEvent::Mount => {
            if state.mounted {
                return Vec::new();
            }
            state.mounted = true;
            state.status_text = labels::STATUS_IDLE.to_string();
            let mut effects = resume_generator(state, now_ms, rng);
            effects.push(Effect::FetchSession);
            effects
        }
        LifecycleEvent::Unmount => {
            if !state.mounted {
                return Vec::new();
            }
            state.mounted = false;
            state.phase = Phase::Idle;
            state.generator_running = false;
            state.chart_initialized = false;
            state.candles.clear();
            state.countdown = None;
            state.countdown_text = None;
            state.pending = None;
            state.analysis = None;
            state.chart_visible = true;
            state.result_visible = false;
            set_trigger_idle(state);
            vec![Effect::StopCandleTimer, Effect::StopCountdownTimer, Effect::AbortPending]
        }
    }
}

fn on_ui<R: Rng + ?Sized>(state: &mut DashboardState, ev: UiEvent, now_ms: i64, rng: &mut R) -> Vec<Effect> {
    match ev {
        UiEvent::StartAnalysis => {
            if state.phase != Phase::Idle || !state.trigger_enabled {
                tracing::debug!(phase = ?state.phase, "Trigger ignored, analysis not available.");
                return Vec::new();
            }
            state.phase = Phase::Requesting;
            state.trigger_enabled = false;
            state.trigger_label = labels::TRIGGER_WORKING;
            state.status_text = labels::STATUS_WORKING.to_string();
            vec![Effect::RequestAnalysis]
        }
        UiEvent::TrackedClick { button } => vec![Effect::RegisterClick { button }],
        UiEvent::DismissNotification => {
            state.notification = None;
            Vec::new()
        }
        UiEvent::StopGenerator => stop_generator(state),
        // The chart is hidden while a result is shown; the generator stays parked.
        UiEvent::ResumeGenerator if !state.chart_visible => Vec::new(),
        UiEvent::ResumeGenerator => resume_generator(state, now_ms, rng),
    }
}

fn on_net<R: Rng + ?Sized>(state: &mut DashboardState, ev: NetEvent, now_ms: i64, rng: &mut R) -> Vec<Effect> {
    match ev {
        NetEvent::AnalysisAccepted { response } => {
            if state.phase != Phase::Requesting {
                return Vec::new();
            }
            let delay = sample_reveal_delay(&state.analysis_settings, rng);
            tracing::info!(
                delay_ms = delay.as_millis() as u64,
                blocked_until = response.blocked_until,
                "Analysis accepted, simulating."
            );
            state.phase = Phase::Simulating;
            state.pending = Some(PendingReveal {
                result: response.result,
                blocked_until: response.blocked_until,
            });
            vec![Effect::ScheduleReveal { delay }]
        }
        NetEvent::AnalysisBlocked { blocked_until } => {
            if state.phase != Phase::Requesting {
                return Vec::new();
            }
            match blocked_until {
                Some(deadline) => {
                    state.phase = Phase::Blocked;
                    state.trigger_label = labels::TRIGGER_BLOCKED;
                    state.status_text = labels::STATUS_BLOCKED.to_string();
                    // A deadline already in the past restores idle on the first evaluation.
                    start_countdown(state, deadline, now_ms, rng)
                }
                None => fail_request(state, labels::BLOCKED_WITHOUT_DEADLINE.to_string()),
            }
        }
        NetEvent::AnalysisFailed { message } => {
            if state.phase != Phase::Requesting {
                return Vec::new();
            }
            fail_request(state, message)
        }
        NetEvent::SessionSynced { cooldown } => on_session_synced(state, cooldown, now_ms, rng),
        NetEvent::SessionSyncFailed { .. } => Vec::new(),
        NetEvent::ClickRegistered { button, success } => {
            state.notification = Some(if success {
                Notification::OpenLink {
                    button,
                    url: state.link_for(button).to_string(),
                }
            } else {
                Notification::Alert(labels::CLICK_REJECTED.to_string())
            });
            Vec::new()
        }
        NetEvent::ClickFailed { .. } => {
            state.notification = Some(Notification::Alert(labels::CLICK_FAILED.to_string()));
            Vec::new()
        }
    }
}

fn on_session_synced<R: Rng + ?Sized>(
    state: &mut DashboardState,
    cooldown: CooldownState,
    now_ms: i64,
    rng: &mut R,
) -> Vec<Effect> {
    if !cooldown.is_active(now_ms) || state.phase != Phase::Idle {
        return Vec::new();
    }
    let Some(deadline) = cooldown.blocked_until_ms else {
        return Vec::new();
    };
    state.phase = Phase::Blocked;
    state.trigger_enabled = false;
    state.trigger_label = labels::TRIGGER_BLOCKED;
    state.status_text = labels::STATUS_SESSION_BLOCKED.to_string();
    start_countdown(state, deadline, now_ms, rng)
}

fn on_timer<R: Rng + ?Sized>(state: &mut DashboardState, ev: TimerEvent, now_ms: i64, rng: &mut R) -> Vec<Effect> {
    match ev {
        TimerEvent::CandleTick => {
            if state.generator_running {
                let previous = state.candles.last_close().unwrap_or(FALLBACK_CLOSE);
                let point = state.generator.generate(previous, now_ms, rng);
                state.candles.push(point);
            }
            Vec::new()
        }
        TimerEvent::CountdownTick { id } => tick_countdown(state, id, now_ms, rng),
        TimerEvent::SimulationElapsed => {
            if state.phase != Phase::Simulating {
                return Vec::new();
            }
            let Some(pending) = state.pending.take() else {
                return Vec::new();
            };
            let mut effects = stop_generator(state);
            state.chart_visible = false;
            state.result_visible = true;
            state.analysis = Some(pending.result);
            state.phase = Phase::Revealed;
            effects.extend(start_countdown(state, pending.blocked_until, now_ms, rng));
            effects
        }
    }
}

/// Idempotent: stopping a stopped generator only re-issues the cancel.
fn stop_generator(state: &mut DashboardState) -> Vec<Effect> {
    state.generator_running = false;
    vec![Effect::StopCandleTimer]
}

/// No-op while running; continues from the last close if a chart exists, otherwise
/// reseeds the buffer first.
fn resume_generator<R: Rng + ?Sized>(state: &mut DashboardState, now_ms: i64, rng: &mut R) -> Vec<Effect> {
    if state.generator_running {
        return Vec::new();
    }
    if !state.chart_initialized {
        let seeded = state.generator.seed(now_ms, rng);
        state.candles.clear();
        state.candles.extend(seeded);
        state.chart_initialized = true;
        tracing::debug!(points = state.candles.len(), "Candle chart initialised.");
    }
    state.generator_running = true;
    vec![Effect::StartCandleTimer]
}

/// Supersedes any running countdown and evaluates the new one immediately.
fn start_countdown<R: Rng + ?Sized>(
    state: &mut DashboardState,
    deadline_ms: i64,
    now_ms: i64,
    rng: &mut R,
) -> Vec<Effect> {
    let id = state.allocate_countdown_id();
    state.countdown = Some(Countdown { id, deadline_ms });
    tracing::debug!(id, deadline_ms, "Countdown started.");
    let mut effects = vec![Effect::StartCountdownTimer { id }];
    effects.extend(tick_countdown(state, id, now_ms, rng));
    effects
}

fn tick_countdown<R: Rng + ?Sized>(state: &mut DashboardState, id: u64, now_ms: i64, rng: &mut R) -> Vec<Effect> {
    let Some(countdown) = state.countdown.filter(|c| c.id == id) else {
        return Vec::new();
    };
    match CooldownState::new(Some(countdown.deadline_ms)).remaining_ms(now_ms) {
        Some(remaining) => {
            state.countdown_text = Some(format_countdown(remaining));
            Vec::new()
        }
        None => finish_countdown(state, now_ms, rng),
    }
}

fn finish_countdown<R: Rng + ?Sized>(state: &mut DashboardState, now_ms: i64, rng: &mut R) -> Vec<Effect> {
    tracing::info!("Cooldown expired, dashboard back to idle.");
    state.countdown = None;
    state.countdown_text = None;
    state.result_visible = false;
    state.analysis = None;
    state.chart_visible = true;
    state.phase = Phase::Idle;
    set_trigger_idle(state);
    state.status_text = labels::STATUS_IDLE.to_string();

    let mut effects = vec![Effect::StopCountdownTimer];
    effects.extend(resume_generator(state, now_ms, rng));
    effects
}

fn fail_request(state: &mut DashboardState, message: String) -> Vec<Effect> {
    tracing::warn!(%message, "Analysis request failed.");
    state.phase = Phase::Idle;
    set_trigger_idle(state);
    state.status_text.clear();
    state.notification = Some(Notification::Alert(message));
    Vec::new()
}

fn set_trigger_idle(state: &mut DashboardState) {
    state.trigger_enabled = true;
    state.trigger_label = labels::TRIGGER_IDLE;
}
