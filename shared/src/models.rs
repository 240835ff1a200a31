use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One simulated OHLC point. `timestamp` is epoch milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl CandlePoint {
    /// `low <= min(open, close)`, `high >= max(open, close)` and every price positive.
    pub fn is_well_formed(&self) -> bool {
        self.low > 0.0
            && self.low <= self.open.min(self.close)
            && self.high >= self.open.max(self.close)
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// (min low, max high) over `candles`, for chart scaling.
pub fn price_range(candles: &[CandlePoint]) -> Option<(f64, f64)> {
    let (first, rest) = candles.split_first()?;
    Some(rest.iter().fold((first.low, first.high), |(lo, hi), c| (lo.min(c.low), hi.max(c.high))))
}

/// Whether the user may start a new analysis. The server is the only authority;
/// the client re-derives the remaining time locally between syncs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CooldownState {
    pub blocked_until_ms: Option<i64>,
}

impl CooldownState {
    pub fn new(blocked_until_ms: Option<i64>) -> Self {
        Self { blocked_until_ms }
    }

    /// Only a deadline strictly in the future blocks.
    pub fn is_active(&self, now_ms: i64) -> bool {
        self.blocked_until_ms.map_or(false, |deadline| deadline > now_ms)
    }

    pub fn remaining_ms(&self, now_ms: i64) -> Option<i64> {
        self.blocked_until_ms
            .map(|deadline| deadline.saturating_sub(now_ms))
            .filter(|remaining| *remaining > 0)
    }
}

/// Scripted analysis fields, rendered verbatim into the result panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "moeda")]
    pub currency: String,
    #[serde(rename = "expiracao")]
    pub expiry: String,
    #[serde(rename = "entrada")]
    pub entry: String,
    #[serde(rename = "direcao")]
    pub direction: String,
    #[serde(rename = "protecao1")]
    pub protection1: String,
    #[serde(rename = "protecao2")]
    pub protection2: String,
}

// POST /api/start-analysis, 2xx body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartAnalysisResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub blocked_until: i64,
}

// POST /api/start-analysis, 429 body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlockedResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "deserialize_deadline")]
    pub blocked_until: Option<i64>,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// GET /api/user/me
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub access_expires_at: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_deadline")]
    pub blocked_until: Option<i64>,
}

impl SessionInfo {
    pub fn cooldown(&self) -> CooldownState {
        CooldownState::new(self.user.as_ref().and_then(|user| user.blocked_until))
    }
}

/// Click-tracked buttons on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonName {
    #[serde(rename = "telegram")]
    Telegram,
    #[serde(rename = "compra")]
    Purchase,
}

impl ButtonName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonName::Telegram => "telegram",
            ButtonName::Purchase => "compra",
        }
    }
}

// POST /api/registrar-clique
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickRequest {
    pub button_name: ButtonName,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClickResponse {
    #[serde(default)]
    pub success: bool,
}

// The backend reports "no deadline" as absent, null or false. Anything that is not a
// positive epoch-ms value representable as i64 is treated the same way.
fn deserialize_deadline<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f < i64::MAX as f64).map(|f| f as i64))
            .filter(|ms| *ms > 0),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_well_formed() {
        let candle = CandlePoint { timestamp: 0, open: 100.0, high: 100.5, low: 99.7, close: 100.2 };
        assert!(candle.is_well_formed());
        assert!(candle.is_bullish());

        let broken = CandlePoint { high: 100.1, ..candle };
        assert!(!broken.is_well_formed());
    }

    #[test]
    fn test_price_range() {
        assert_eq!(price_range(&[]), None);
        let candles = [
            CandlePoint { timestamp: 0, open: 10.0, high: 12.0, low: 9.0, close: 11.0 },
            CandlePoint { timestamp: 1, open: 11.0, high: 13.0, low: 10.5, close: 12.0 },
        ];
        assert_eq!(price_range(&candles), Some((9.0, 13.0)));
    }

    #[test]
    fn test_cooldown_only_future_deadline_blocks() {
        let now = 1_700_000_000_000;
        assert!(CooldownState::new(Some(now + 1)).is_active(now));
        assert!(!CooldownState::new(Some(now)).is_active(now));
        assert!(!CooldownState::new(Some(now - 30_000)).is_active(now));
        assert!(!CooldownState::default().is_active(now));
        assert_eq!(CooldownState::new(Some(now + 5_000)).remaining_ms(now), Some(5_000));
        assert_eq!(CooldownState::new(Some(now - 5_000)).remaining_ms(now), None);
        assert_eq!(CooldownState::new(Some(i64::MIN)).remaining_ms(now), None);
    }

    #[test]
    fn test_start_analysis_response_decoding() {
        let body = r#"{
            "titulo": "ANALYSIS COMPLETE",
            "moeda": "EUR-USD (OTC)",
            "expiracao": "1 Minute",
            "entrada": "14:03",
            "direcao": "BUY",
            "protecao1": "14:04",
            "protecao2": "14:05",
            "blocked_until": 1700000420000
        }"#;
        let parsed: StartAnalysisResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.result.currency, "EUR-USD (OTC)");
        assert_eq!(parsed.result.protection2, "14:05");
        assert_eq!(parsed.blocked_until, 1_700_000_420_000);
    }

    #[test]
    fn test_session_deadline_variants() {
        let absent: SessionInfo = serde_json::from_str(r#"{"authenticated":true,"user":{"id":1}}"#).unwrap();
        assert_eq!(absent.cooldown().blocked_until_ms, None);

        let null: SessionInfo = serde_json::from_str(r#"{"user":{"blocked_until":null}}"#).unwrap();
        assert_eq!(null.cooldown().blocked_until_ms, None);

        let falsy: SessionInfo = serde_json::from_str(r#"{"user":{"blocked_until":false}}"#).unwrap();
        assert_eq!(falsy.cooldown().blocked_until_ms, None);

        let set: SessionInfo = serde_json::from_str(r#"{"user":{"blocked_until":1700000420000}}"#).unwrap();
        assert_eq!(set.cooldown().blocked_until_ms, Some(1_700_000_420_000));

        let no_user: SessionInfo = serde_json::from_str(r#"{"authenticated":false}"#).unwrap();
        assert_eq!(no_user.cooldown(), CooldownState::default());
    }

    #[test]
    fn test_blocked_response_decoding() {
        let parsed: BlockedResponse =
            serde_json::from_str(r#"{"error":"blocked","blocked_until":1700000420000}"#).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("blocked"));
        assert_eq!(parsed.blocked_until, Some(1_700_000_420_000));

        for body in [
            r#"{"blocked_until":-1e30}"#,
            r#"{"blocked_until":1e30}"#,
            r#"{"blocked_until":-5}"#,
            r#"{"blocked_until":0}"#,
        ] {
            let parsed: BlockedResponse = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.blocked_until, None, "{}", body);
        }
        let fractional: BlockedResponse = serde_json::from_str(r#"{"blocked_until":1700000420000.5}"#).unwrap();
        assert_eq!(fractional.blocked_until, Some(1_700_000_420_000));
    }

    #[test]
    fn test_click_request_wire_names() {
        let json = serde_json::to_string(&ClickRequest { button_name: ButtonName::Purchase }).unwrap();
        assert_eq!(json, r#"{"button_name":"compra"}"#);
        assert_eq!(ButtonName::Telegram.as_str(), "telegram");
    }
}
