// Runs the dashboard reducer on tokio: one event queue, effects spawned as tasks that
// post their outcome back as events, view snapshots published over a watch channel.
use super::event::{DashboardEvent, Effect, LifecycleEvent, NetEvent, TimerEvent};
use super::reducer::reduce;
use super::state::DashboardState;
use super::view::{render, DashboardView};
use crate::config::EngineSettings;
use crate::error::EngineError;
use crate::services::{DashboardApi, StartAnalysisOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::models::ButtonName;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Wall-clock source for deadlines and candle timestamps (epoch ms).
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        shared::utils::now_ms()
    }
}

/// Front-end side of the controller: post events, read the latest view.
#[derive(Clone)]
pub struct ControllerHandle {
    events: mpsc::UnboundedSender<DashboardEvent>,
    view: watch::Receiver<DashboardView>,
}

impl ControllerHandle {
    pub fn send(&self, event: impl Into<DashboardEvent>) -> Result<(), EngineError> {
        self.events
            .send(event.into())
            .map_err(|_| EngineError::ControllerClosed)
    }

    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.clone()
    }
}

pub struct DashboardController {
    state: DashboardState,
    settings: EngineSettings,
    api: Arc<dyn DashboardApi>,
    clock: Arc<dyn Clock>,
    rng: StdRng,

    events_tx: mpsc::UnboundedSender<DashboardEvent>,
    events_rx: mpsc::UnboundedReceiver<DashboardEvent>,
    view_tx: watch::Sender<DashboardView>,

    candle_timer: Option<JoinHandle<()>>,
    countdown_timer: Option<JoinHandle<()>>,
    pending: Vec<JoinHandle<()>>,
}

impl DashboardController {
    pub fn new(settings: EngineSettings, api: Arc<dyn DashboardApi>, clock: Arc<dyn Clock>) -> Self {
        let state = DashboardState::new(&settings);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, _) = watch::channel(render(&state));
        Self {
            state,
            settings,
            api,
            clock,
            rng: StdRng::from_entropy(),
            events_tx,
            events_rx,
            view_tx,
            candle_timer: None,
            countdown_timer: None,
            pending: Vec::new(),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            events: self.events_tx.clone(),
            view: self.view_tx.subscribe(),
        }
    }

    pub fn view(&self) -> DashboardView {
        self.view_tx.borrow().clone()
    }

    pub fn mount(&mut self) {
        self.dispatch(LifecycleEvent::Mount.into());
    }

    pub fn unmount(&mut self) {
        self.dispatch(LifecycleEvent::Unmount.into());
    }

    /// Mounts, then serves events until an unmount is processed.
    pub async fn run(mut self) {
        tracing::info!(base_url = %self.settings.base_url, "Dashboard controller started.");
        self.mount();
        while let Some(event) = self.events_rx.recv().await {
            let unmount = matches!(event, DashboardEvent::Lifecycle(LifecycleEvent::Unmount));
            self.dispatch(event);
            if unmount {
                break;
            }
        }
        tracing::info!("Dashboard controller stopped.");
    }

    pub fn dispatch(&mut self, event: DashboardEvent) {
        let now = self.clock.now_ms();
        let before = self.state.phase;
        let effects = reduce(&mut self.state, event, now, &mut self.rng);
        if before != self.state.phase {
            tracing::debug!(from = ?before, to = ?self.state.phase, "Phase transition.");
        }
        for effect in effects {
            self.execute(effect);
        }
        self.view_tx.send_replace(render(&self.state));
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::StartCandleTimer => {
                let period = self.settings.candles.tick();
                abort(self.candle_timer.take());
                self.candle_timer = Some(self.spawn_ticker(period, || TimerEvent::CandleTick.into()));
            }
            Effect::StopCandleTimer => abort(self.candle_timer.take()),
            Effect::StartCountdownTimer { id } => {
                let period = self.settings.analysis.countdown_tick();
                abort(self.countdown_timer.take());
                self.countdown_timer = Some(self.spawn_ticker(period, move || TimerEvent::CountdownTick { id }.into()));
            }
            Effect::StopCountdownTimer => abort(self.countdown_timer.take()),
            Effect::RequestAnalysis => {
                let api = self.api.clone();
                self.spawn_pending(async move {
                    let event = match api.start_analysis().await {
                        Ok(StartAnalysisOutcome::Accepted(response)) => NetEvent::AnalysisAccepted { response },
                        Ok(StartAnalysisOutcome::Blocked { blocked_until }) => {
                            tracing::info!(?blocked_until, "Analysis rate limited.");
                            NetEvent::AnalysisBlocked { blocked_until }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Start analysis request failed.");
                            NetEvent::AnalysisFailed { message: e.user_message() }
                        }
                    };
                    DashboardEvent::from(event)
                });
            }
            Effect::FetchSession => {
                let api = self.api.clone();
                self.spawn_pending(async move {
                    let event = match api.session().await {
                        Ok(info) => NetEvent::SessionSynced { cooldown: info.cooldown() },
                        Err(e) => {
                            tracing::warn!(error = %e, "Session sync failed, keeping idle view.");
                            NetEvent::SessionSyncFailed { reason: e.to_string() }
                        }
                    };
                    DashboardEvent::from(event)
                });
            }
            Effect::ScheduleReveal { delay } => {
                self.spawn_pending(async move {
                    tokio::time::sleep(delay).await;
                    DashboardEvent::from(TimerEvent::SimulationElapsed)
                });
            }
            Effect::RegisterClick { button } => {
                let api = self.api.clone();
                self.spawn_pending(async move { DashboardEvent::from(register_click(api, button).await) });
            }
            Effect::AbortPending => {
                for task in self.pending.drain(..) {
                    task.abort();
                }
            }
        }
    }

    /// First tick one period from now; ticks stop once the controller is gone.
    fn spawn_ticker<F>(&self, period: Duration, make_event: F) -> JoinHandle<()>
    where
        F: Fn() -> DashboardEvent + Send + 'static,
    {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(make_event()).is_err() {
                    break;
                }
            }
        })
    }

    fn spawn_pending<Fut>(&mut self, task: Fut)
    where
        Fut: Future<Output = DashboardEvent> + Send + 'static,
    {
        self.pending.retain(|handle| !handle.is_finished());
        let tx = self.events_tx.clone();
        self.pending.push(tokio::spawn(async move {
            let event = task.await;
            if tx.send(event).is_err() {
                tracing::debug!("Controller gone before effect completed.");
            }
        }));
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        abort(self.candle_timer.take());
        abort(self.countdown_timer.take());
        for task in self.pending.drain(..) {
            task.abort();
        }
    }
}

async fn register_click(api: Arc<dyn DashboardApi>, button: ButtonName) -> NetEvent {
    match api.register_click(button).await {
        Ok(response) => {
            tracing::info!(button = button.as_str(), success = response.success, "Click registered.");
            NetEvent::ClickRegistered { button, success: response.success }
        }
        Err(e) => {
            tracing::error!(button = button.as_str(), error = %e, "Click registration failed.");
            NetEvent::ClickFailed { button, reason: e.to_string() }
        }
    }
}

fn abort(handle: Option<JoinHandle<()>>) {
    if let Some(handle) = handle {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::event::UiEvent;
    use crate::dashboard::state::{labels, Notification, Phase};
    use async_trait::async_trait;
    use shared::models::{AnalysisResult, ClickResponse, SessionInfo, SessionUser, StartAnalysisResponse};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const BASE_MS: i64 = 1_700_000_000_000;

    /// Epoch clock driven by tokio's (paused) time.
    struct TestClock {
        start: Instant,
    }

    impl Clock for TestClock {
        fn now_ms(&self) -> i64 {
            BASE_MS + self.start.elapsed().as_millis() as i64
        }
    }

    #[derive(Default)]
    struct ScriptedApi {
        starts: Mutex<VecDeque<Result<StartAnalysisOutcome, EngineError>>>,
        session_deadline: Option<i64>,
        session_fails: bool,
        click_success: bool,
        start_calls: AtomicUsize,
    }

    #[async_trait]
    impl DashboardApi for ScriptedApi {
        async fn start_analysis(&self) -> Result<StartAnalysisOutcome, EngineError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            self.starts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(EngineError::ApiError { status: 500, message: None }))
        }

        async fn session(&self) -> Result<SessionInfo, EngineError> {
            if self.session_fails {
                return Err(EngineError::ApiError { status: 401, message: None });
            }
            Ok(SessionInfo {
                authenticated: true,
                user: Some(SessionUser { blocked_until: self.session_deadline, ..SessionUser::default() }),
            })
        }

        async fn register_click(&self, _button: ButtonName) -> Result<ClickResponse, EngineError> {
            Ok(ClickResponse { success: self.click_success })
        }
    }

    fn accepted(blocked_until: i64) -> StartAnalysisOutcome {
        StartAnalysisOutcome::Accepted(StartAnalysisResponse {
            result: AnalysisResult {
                title: "ANALYSIS COMPLETE".to_string(),
                currency: "Bitcoin (OTC)".to_string(),
                expiry: "1 Minute".to_string(),
                entry: "10:03".to_string(),
                direction: "SELL".to_string(),
                protection1: "10:04".to_string(),
                protection2: "10:05".to_string(),
            },
            blocked_until,
        })
    }

    fn start(api: ScriptedApi) -> (ControllerHandle, Arc<ScriptedApi>, JoinHandle<()>) {
        let api = Arc::new(api);
        let clock = Arc::new(TestClock { start: Instant::now() });
        let controller = DashboardController::new(EngineSettings::default(), api.clone(), clock)
            .with_rng(StdRng::seed_from_u64(99));
        let handle = controller.handle();
        let task = tokio::spawn(controller.run());
        (handle, api, task)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_with_null_session_stays_idle() {
        let (handle, _, _task) = start(ScriptedApi::default());
        settle().await;

        let view = handle.view();
        assert_eq!(view.phase, Phase::Idle);
        assert!(view.trigger_enabled && view.chart_visible);
        assert_eq!(view.candles.len(), 50);
        assert_eq!(view.status_text, labels::STATUS_IDLE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_candle_per_tick_even_after_repeated_resume() {
        let (handle, _, _task) = start(ScriptedApi::default());
        settle().await;
        for _ in 0..3 {
            handle.send(UiEvent::ResumeGenerator).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(10_000)).await;

        let view = handle.view();
        assert_eq!(view.candles.len(), 60);
        tokio::time::sleep(Duration::from_millis(30_000)).await;
        assert_eq!(handle.view().candles.len(), 80);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_generator_freezes_chart() {
        let (handle, _, _task) = start(ScriptedApi::default());
        settle().await;
        handle.send(UiEvent::StopGenerator).unwrap();
        settle().await;
        let frozen = handle.view().candles;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.view().candles, frozen);
        assert!(!handle.view().generator_running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_deadline_thirty_seconds_ahead_blocks() {
        let api = ScriptedApi { session_deadline: Some(BASE_MS + 30_000), ..ScriptedApi::default() };
        let (handle, _, _task) = start(api);
        settle().await;

        let view = handle.view();
        assert_eq!(view.phase, Phase::Blocked);
        assert!(!view.trigger_enabled);
        assert_eq!(view.trigger_label, labels::TRIGGER_BLOCKED);
        assert_eq!(view.countdown_text.as_deref(), Some("00:30"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_deadline_in_past_does_not_block() {
        let api = ScriptedApi { session_deadline: Some(BASE_MS - 60_000), ..ScriptedApi::default() };
        let (handle, _, _task) = start(api);
        settle().await;
        let view = handle.view();
        assert!(view.trigger_enabled);
        assert_eq!(view.countdown_text, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_failure_keeps_idle_view() {
        let api = ScriptedApi { session_fails: true, ..ScriptedApi::default() };
        let (handle, _, _task) = start(api);
        settle().await;
        let view = handle.view();
        assert!(view.trigger_enabled && view.chart_visible);
        assert_eq!(view.notification, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_five_second_cooldown_restores_idle() {
        let api = ScriptedApi { session_deadline: Some(BASE_MS + 5_000), ..ScriptedApi::default() };
        let (handle, _, _task) = start(api);
        settle().await;
        assert_eq!(handle.view().countdown_text.as_deref(), Some("00:05"));

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        let view = handle.view();
        assert_eq!(view.phase, Phase::Idle);
        assert!(view.trigger_enabled);
        assert_eq!(view.trigger_label, labels::TRIGGER_IDLE);
        assert_eq!(view.countdown_text, None);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.view().phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_countdown_starts_at_two_minutes() {
        let api = ScriptedApi::default();
        api.starts
            .lock()
            .unwrap()
            .push_back(Ok(StartAnalysisOutcome::Blocked { blocked_until: Some(BASE_MS + 120_000) }));
        let (handle, _, _task) = start(api);
        let mut rx = handle.subscribe();
        handle.send(UiEvent::StartAnalysis).unwrap();

        let view = rx.wait_for(|v| v.countdown_text.is_some()).await.unwrap().clone();
        assert_eq!(view.countdown_text.as_deref(), Some("02:00"));
        assert_eq!(view.trigger_label, labels::TRIGGER_BLOCKED);
        assert!(view.chart_visible);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(handle.view().countdown_text.as_deref(), Some("01:57"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_happens_within_delay_window() {
        let api = ScriptedApi::default();
        api.starts.lock().unwrap().push_back(Ok(accepted(BASE_MS + 420_000)));
        let (handle, api, _task) = start(api);
        let mut rx = handle.subscribe();

        let started = Instant::now();
        handle.send(UiEvent::StartAnalysis).unwrap();
        // Duplicate clicks while in flight are ignored.
        handle.send(UiEvent::StartAnalysis).unwrap();

        tokio::time::sleep(Duration::from_millis(6_900)).await;
        assert!(!handle.view().result_visible);

        let view = rx.wait_for(|v| v.result_visible).await.unwrap().clone();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(7_000), "revealed after {:?}", elapsed);
        assert!(elapsed <= Duration::from_millis(20_100), "revealed after {:?}", elapsed);

        assert_eq!(api.start_calls.load(Ordering::SeqCst), 1);
        assert_eq!(view.phase, Phase::Revealed);
        assert!(!view.chart_visible && !view.generator_running);
        let analysis = view.analysis.expect("analysis rendered");
        assert_eq!(analysis.headline, "⚠️ ANALYSIS COMPLETE ⚠️");
        assert!(view.countdown_text.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_request_alerts_with_server_message() {
        let api = ScriptedApi::default();
        api.starts
            .lock()
            .unwrap()
            .push_back(Err(EngineError::ApiError { status: 403, message: Some("expired".to_string()) }));
        let (handle, _, _task) = start(api);
        let mut rx = handle.subscribe();
        handle.send(UiEvent::StartAnalysis).unwrap();

        let view = rx.wait_for(|v| v.notification.is_some()).await.unwrap().clone();
        assert_eq!(view.notification, Some(Notification::Alert("expired".to_string())));
        assert!(view.trigger_enabled);
        assert_eq!(view.trigger_label, labels::TRIGGER_IDLE);

        handle.send(UiEvent::DismissNotification).unwrap();
        settle().await;
        assert_eq!(handle.view().notification, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracked_click_opens_configured_link() {
        let api = ScriptedApi { click_success: true, ..ScriptedApi::default() };
        let (handle, _, _task) = start(api);
        handle.send(UiEvent::TrackedClick { button: ButtonName::Purchase }).unwrap();
        settle().await;
        match handle.view().notification {
            Some(Notification::OpenLink { button, url }) => {
                assert_eq!(button, ButtonName::Purchase);
                assert_eq!(url, EngineSettings::default().links.purchase_url);
            }
            other => panic!("expected OpenLink, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_controller() {
        let api = ScriptedApi::default();
        api.starts.lock().unwrap().push_back(Ok(accepted(BASE_MS + 420_000)));
        let (handle, _, task) = start(api);
        handle.send(UiEvent::StartAnalysis).unwrap();
        settle().await;

        handle.send(LifecycleEvent::Unmount).unwrap();
        task.await.unwrap();

        assert!(matches!(handle.send(UiEvent::StartAnalysis), Err(EngineError::ControllerClosed)));
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(!handle.view().result_visible);
    }
}
