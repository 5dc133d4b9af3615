use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use trade_compass::analytics::risk::RiskSettings;
use trade_compass::config::Config;
use trade_compass::models::{RawTimestamp, Trade, TradeSide};

/// Closed trade with the given P&L, opened at an RFC3339 instant and held
/// for `held_minutes`.
pub fn make_trade(pnl: f64, open: &str, held_minutes: i64) -> Trade {
    let open: DateTime<Utc> = DateTime::parse_from_rfc3339(open)
        .unwrap()
        .with_timezone(&Utc);
    let close = open + Duration::minutes(held_minutes);

    Trade {
        id: String::new(),
        symbol: "EURUSD".to_string(),
        side: TradeSide::Buy,
        entry_price: 1.1,
        exit_price: Some(1.105),
        size: 1.0,
        open_time: Some(RawTimestamp::Text(open.to_rfc3339())),
        close_time: Some(RawTimestamp::Text(close.to_rfc3339())),
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

pub fn with_r(mut trade: Trade, r_multiple: f64) -> Trade {
    trade.r_multiple = Some(r_multiple);
    trade
}

pub fn with_tags(mut trade: Trade, tags: &[&str]) -> Trade {
    trade.tags = tags.iter().map(|s| s.to_string()).collect();
    trade
}

/// Config pinned to UTC with the default risk settings, independent of
/// whatever .env the developer has lying around.
pub fn test_config() -> Config {
    Config {
        account_id: "default".to_string(),
        journal_file: "journal.json".to_string(),
        timezone: Tz::UTC,
        risk: RiskSettings::default(),
        log_level: "ERROR".to_string(),
    }
}
