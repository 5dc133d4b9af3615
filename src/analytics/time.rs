use chrono::{DateTime, LocalResult, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::models::Trade;

/// Which timestamp a lookup reaches for first when a trade has both.
/// Calendar placement works off the close, intraday analytics off the open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePreference {
    OpenFirst,
    CloseFirst,
}

/// Best available instant for a trade in the journal timezone:
/// the preferred timestamp, then the other one, then the date-only
/// fallback at the start of that local day. None only when all three
/// are unusable.
pub fn effective_time(trade: &Trade, pref: TimePreference, tz: Tz) -> Option<DateTime<Tz>> {
    let (first, second) = match pref {
        TimePreference::OpenFirst => (&trade.open_time, &trade.close_time),
        TimePreference::CloseFirst => (&trade.close_time, &trade.open_time),
    };

    if let Some(instant) = first.as_ref().and_then(|t| t.resolve()) {
        return Some(instant.with_timezone(&tz));
    }
    if let Some(instant) = second.as_ref().and_then(|t| t.resolve()) {
        return Some(instant.with_timezone(&tz));
    }
    date_field_midnight(trade.date.as_deref()?, tz)
}

pub fn effective_date(trade: &Trade, pref: TimePreference, tz: Tz) -> Option<NaiveDate> {
    effective_time(trade, pref, tz).map(|t| t.date_naive())
}

/// True when at least one real clock timestamp resolves. Session and
/// duration analytics skip trades that only carry a date string, since
/// local midnight would say nothing about when the trade ran.
pub fn has_clock_time(trade: &Trade) -> bool {
    trade.open_time.as_ref().and_then(|t| t.resolve()).is_some()
        || trade.close_time.as_ref().and_then(|t| t.resolve()).is_some()
}

fn date_field_midnight(text: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()?;
    // Spring-forward can skip midnight, and a date-line hop can skip the
    // whole day. Scan for the first wall-clock time the zone really has.
    for quarter in 0u32..24 * 4 {
        let local = date.and_hms_opt(quarter / 4, (quarter % 4) * 15, 0)?;
        match tz.from_local_datetime(&local) {
            LocalResult::Single(t) => return Some(t),
            LocalResult::Ambiguous(earliest, _) => return Some(earliest),
            LocalResult::None => {}
        }
    }
    None
}
