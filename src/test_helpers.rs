use chrono::{DateTime, Duration, Utc};

use crate::analytics::risk::RiskSettings;
use crate::models::{RawTimestamp, Trade, TradeSide};

/// Fixed anchor for tests, a Monday at noon UTC.
pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Closed trade with the given P&L, opened at `open` and held for `held`.
pub fn trade_at(pnl: f64, open: DateTime<Utc>, held: Duration) -> Trade {
    Trade {
        id: String::new(),
        symbol: "EURUSD".to_string(),
        side: TradeSide::Buy,
        entry_price: 1.1,
        exit_price: Some(1.105),
        size: 1.0,
        open_time: Some(RawTimestamp::Text(open.to_rfc3339())),
        close_time: Some(RawTimestamp::Text((open + held).to_rfc3339())),
        date: None,
        pnl: Some(pnl),
        pnl_points: None,
        r_multiple: None,
        status: None,
        tags: Vec::new(),
        rating: None,
        playbook: None,
    }
}

/// Minimal closed trade stamped at the fixed base time.
pub fn trade(pnl: f64) -> Trade {
    trade_at(pnl, base_time(), Duration::minutes(30))
}

pub fn trade_with_r(pnl: f64, r_multiple: f64) -> Trade {
    let mut t = trade(pnl);
    t.r_multiple = Some(r_multiple);
    t
}

pub fn tagged(pnl: f64, tags: &[&str]) -> Trade {
    let mut t = trade(pnl);
    t.tags = tags.iter().map(|s| s.to_string()).collect();
    t
}

/// Default caps and targets: 3% / 6% loss, 2% / 5% profit.
pub fn settings() -> RiskSettings {
    RiskSettings::default()
}
