// Time formatting helpers shared by the engine and the GUI.
// All timestamps on the wire are epoch milliseconds (UTC); display is in local time.
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// `mm:ss`, zero-padded, floor-divided from milliseconds. Negative input renders `00:00`.
pub fn format_countdown(remaining_ms: i64) -> String {
    let remaining = remaining_ms.max(0);
    let minutes = remaining / 60_000;
    let seconds = (remaining % 60_000) / 1_000;
    format!("{:02}:{:02}", minutes, seconds)
}

pub fn to_local(ms: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp_millis(ms).map(|utc| utc.with_timezone(&Local))
}

pub fn format_local_datetime(ms: i64) -> String {
    to_local(ms)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Parses an HTML `datetime-local` value (`2024-12-30T18:20`) as local time.
pub fn parse_local_datetime_input(input: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), DATETIME_INPUT_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
