use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::outcome::{TradeResult, TradeSide};

/// A timestamp the way journal documents actually store one: a platform
/// `{seconds, nanos}` object, epoch milliseconds, or an ISO-ish string.
/// All three resolve to the same comparable instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Epoch {
        seconds: i64,
        #[serde(default)]
        nanos: u32,
    },
    Millis(i64),
    Text(String),
}

impl RawTimestamp {
    /// None for anything malformed. Callers fall through to the next
    /// timestamp source instead of failing the whole aggregation.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Epoch { seconds, nanos } => {
                Utc.timestamp_opt(*seconds, *nanos).single()
            }
            RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            RawTimestamp::Text(text) => parse_datetime_text(text),
        }
    }
}

fn parse_datetime_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    None
}

/// One journal trade. Fields beyond symbol, side, entry and size are
/// optional so that partially filled documents still deserialize; every
/// consumer handles the gaps explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    #[serde(default)]
    pub id: String,
    pub symbol: String,
    pub side: TradeSide,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    pub size: f64,
    #[serde(default)]
    pub open_time: Option<RawTimestamp>,
    #[serde(default)]
    pub close_time: Option<RawTimestamp>,
    /// Date-only fallback ("YYYY-MM-DD") for imports without clock times.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub pnl: Option<f64>,
    #[serde(default)]
    pub pnl_points: Option<f64>,
    #[serde(default)]
    pub r_multiple: Option<f64>,
    /// Stored result from an earlier sync. Kept on the wire but never read;
    /// see [`Trade::result`].
    #[serde(default)]
    pub status: Option<TradeResult>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub playbook: Option<String>,
}

impl Trade {
    pub fn result(&self) -> Option<TradeResult> {
        self.pnl.map(TradeResult::from_pnl)
    }

    pub fn pnl_or_zero(&self) -> f64 {
        self.pnl.unwrap_or(0.0)
    }
}

/// Inclusive calendar-date window. Open ends mean unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start)
            && self.end.map_or(true, |end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_timestamp_forms_resolve_to_same_instant() {
        let epoch = RawTimestamp::Epoch {
            seconds: 1_705_320_000,
            nanos: 0,
        };
        let millis = RawTimestamp::Millis(1_705_320_000_000);
        let text = RawTimestamp::Text("2024-01-15T12:00:00Z".to_string());

        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(epoch.resolve(), Some(expected));
        assert_eq!(millis.resolve(), Some(expected));
        assert_eq!(text.resolve(), Some(expected));
    }

    #[test]
    fn text_parsing_accepts_common_exports() {
        let with_offset = RawTimestamp::Text("2024-01-15T07:00:00-05:00".to_string());
        assert_eq!(
            with_offset.resolve(),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
        );

        let no_zone = RawTimestamp::Text("2024-01-15T12:00:00".to_string());
        assert_eq!(
            no_zone.resolve(),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
        );

        let spaced = RawTimestamp::Text("2024-01-15 12:00:00".to_string());
        assert_eq!(
            spaced.resolve(),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
        );

        let date_only = RawTimestamp::Text("2024-01-15".to_string());
        assert_eq!(
            date_only.resolve(),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn malformed_text_resolves_to_none() {
        assert_eq!(RawTimestamp::Text("not a date".to_string()).resolve(), None);
        assert_eq!(RawTimestamp::Text("15/01/2024".to_string()).resolve(), None);
        assert_eq!(RawTimestamp::Text(String::new()).resolve(), None);
    }

    #[test]
    fn untagged_forms_deserialize_from_json() {
        let trade: Trade = serde_json::from_str(
            r#"{
                "symbol": "EURUSD",
                "side": "buy",
                "entry_price": 1.1,
                "size": 1.0,
                "open_time": {"seconds": 1705320000, "nanos": 500},
                "close_time": 1705323600000,
                "pnl": 25.0
            }"#,
        )
        .unwrap();

        assert!(matches!(
            trade.open_time,
            Some(RawTimestamp::Epoch { seconds: 1_705_320_000, nanos: 500 })
        ));
        assert!(matches!(trade.close_time, Some(RawTimestamp::Millis(_))));
        assert_eq!(trade.pnl, Some(25.0));
        assert!(trade.tags.is_empty());
        assert_eq!(trade.r_multiple, None);
    }

    #[test]
    fn result_ignores_stored_status() {
        let trade: Trade = serde_json::from_str(
            r#"{
                "symbol": "NQ",
                "side": "sell",
                "entry_price": 18000.0,
                "size": 2.0,
                "pnl": -40.0,
                "status": "win"
            }"#,
        )
        .unwrap();

        assert_eq!(trade.status, Some(TradeResult::Win));
        assert_eq!(trade.result(), Some(TradeResult::Loss));
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let range = DateRange {
            start: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            end: Some(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
        };
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert!(DateRange::default().contains(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()));
    }
}
