use shared::models::{ButtonName, CooldownState, StartAnalysisResponse};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Lifecycle(LifecycleEvent),
    Ui(UiEvent),
    Net(NetEvent),
    Timer(TimerEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Mount,
    Unmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    StartAnalysis,
    TrackedClick { button: ButtonName },
    DismissNotification,
    StopGenerator,
    ResumeGenerator,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NetEvent {
    AnalysisAccepted { response: StartAnalysisResponse },
    AnalysisBlocked { blocked_until: Option<i64> },
    AnalysisFailed { message: String },
    SessionSynced { cooldown: CooldownState },
    SessionSyncFailed { reason: String },
    ClickRegistered { button: ButtonName, success: bool },
    ClickFailed { button: ButtonName, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    CandleTick,
    /// `id` identifies the countdown instance whose timer produced the tick.
    CountdownTick { id: u64 },
    SimulationElapsed,
}

/// Side effects requested by the reducer, executed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartCandleTimer,
    StopCandleTimer,
    StartCountdownTimer { id: u64 },
    StopCountdownTimer,
    RequestAnalysis,
    FetchSession,
    ScheduleReveal { delay: Duration },
    RegisterClick { button: ButtonName },
    AbortPending,
}

impl From<LifecycleEvent> for DashboardEvent {
    fn from(ev: LifecycleEvent) -> Self {
        DashboardEvent::Lifecycle(ev)
    }
}

impl From<UiEvent> for DashboardEvent {
    fn from(ev: UiEvent) -> Self {
        DashboardEvent::Ui(ev)
    }
}

impl From<NetEvent> for DashboardEvent {
    fn from(ev: NetEvent) -> Self {
        DashboardEvent::Net(ev)
    }
}

impl From<TimerEvent> for DashboardEvent {
    fn from(ev: TimerEvent) -> Self {
        DashboardEvent::Timer(ev)
    }
}
