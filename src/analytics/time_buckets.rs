use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::analytics::kpi::profit_factor;
use crate::analytics::time::{effective_time, has_clock_time, TimePreference};
use crate::models::{DurationBucket, Session, Trade, TradeResult};

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Aggregate stats for one bucket of a dimension (a weekday, a session,
/// a duration range, a tag). Zeroed buckets are still emitted so chart
/// axes stay stable across refreshes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStats {
    pub key: String,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub net_pnl: f64,
    /// Fraction 0-1 of decided trades won; breakevens sit out.
    pub win_rate: f64,
    pub avg_r: Option<f64>,
    pub profit_factor: Option<f64>,
}

#[derive(Default)]
pub(crate) struct BucketAcc {
    trades: usize,
    wins: usize,
    losses: usize,
    breakevens: usize,
    net_pnl: f64,
    gross_profit: f64,
    gross_loss: f64,
    r_sum: f64,
    r_count: usize,
}

impl BucketAcc {
    pub(crate) fn add(&mut self, trade: &Trade) {
        let pnl = trade.pnl_or_zero();
        self.trades += 1;
        self.net_pnl += pnl;
        match trade.result() {
            Some(TradeResult::Win) => {
                self.wins += 1;
                self.gross_profit += pnl;
            }
            Some(TradeResult::Loss) => {
                self.losses += 1;
                self.gross_loss += pnl.abs();
            }
            Some(TradeResult::Breakeven) => self.breakevens += 1,
            None => {}
        }
        if let Some(r) = trade.r_multiple {
            self.r_sum += r;
            self.r_count += 1;
        }
    }

    pub(crate) fn finish(&self, key: String, with_profit_factor: bool) -> BucketStats {
        let decided = self.wins + self.losses;
        BucketStats {
            key,
            trades: self.trades,
            wins: self.wins,
            losses: self.losses,
            breakevens: self.breakevens,
            net_pnl: self.net_pnl,
            win_rate: if decided > 0 {
                self.wins as f64 / decided as f64
            } else {
                0.0
            },
            avg_r: if self.r_count > 0 {
                Some(self.r_sum / self.r_count as f64)
            } else {
                None
            },
            profit_factor: if with_profit_factor {
                profit_factor(self.gross_profit, self.gross_loss)
            } else {
                None
            },
        }
    }
}

/// Open and close instants in the journal timezone. None when the trade
/// has no clock time at all; a single timestamp stands in for both ends.
fn trade_clock(trade: &Trade, tz: Tz) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    if !has_clock_time(trade) {
        return None;
    }
    let open = effective_time(trade, TimePreference::OpenFirst, tz)?;
    let close = effective_time(trade, TimePreference::CloseFirst, tz)?;
    Some((open, close))
}

/// Performance by weekday of the effective open, Sunday first.
pub fn weekday_stats(trades: &[Trade], tz: Tz) -> Vec<BucketStats> {
    let mut accs: [BucketAcc; 7] = Default::default();
    for trade in trades {
        let Some((open, _)) = trade_clock(trade, tz) else {
            continue;
        };
        accs[open.weekday().num_days_from_sunday() as usize].add(trade);
    }
    accs.iter()
        .zip(WEEKDAYS)
        .map(|(acc, name)| acc.finish(name.to_string(), false))
        .collect()
}

/// Performance by market session of the local open hour.
pub fn session_stats(trades: &[Trade], tz: Tz) -> Vec<BucketStats> {
    let mut accs: [BucketAcc; 4] = Default::default();
    for trade in trades {
        let Some((open, _)) = trade_clock(trade, tz) else {
            continue;
        };
        let session = Session::from_hour(open.hour());
        let idx = Session::ALL.iter().position(|s| *s == session).unwrap_or(3);
        accs[idx].add(trade);
    }
    accs.iter()
        .zip(Session::ALL)
        .map(|(acc, session)| acc.finish(session.as_str().to_string(), false))
        .collect()
}

/// Performance by holding time, shortest range first.
pub fn duration_stats(trades: &[Trade], tz: Tz) -> Vec<BucketStats> {
    let mut accs: [BucketAcc; 6] = Default::default();
    for trade in trades {
        let Some((open, close)) = trade_clock(trade, tz) else {
            continue;
        };
        let minutes = (close - open).num_minutes();
        let bucket = DurationBucket::from_minutes(minutes);
        let idx = DurationBucket::ALL
            .iter()
            .position(|b| *b == bucket)
            .unwrap_or(0);
        accs[idx].add(trade);
    }
    accs.iter()
        .zip(DurationBucket::ALL)
        .map(|(acc, bucket)| acc.finish(bucket.as_str().to_string(), true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{trade, trade_at, trade_with_r};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn weekday_list_is_complete_and_ordered() {
        // 2024-01-15 is a Monday.
        let monday = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let friday = Utc.with_ymd_and_hms(2024, 1, 19, 10, 0, 0).unwrap();
        let trades = vec![
            trade_at(30.0, monday, Duration::minutes(20)),
            trade_at(-10.0, monday, Duration::minutes(20)),
            trade_at(15.0, friday, Duration::minutes(20)),
        ];

        let stats = weekday_stats(&trades, chrono_tz::UTC);
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[0].key, "Sunday");
        assert_eq!(stats[0].trades, 0);
        assert_eq!(stats[1].key, "Monday");
        assert_eq!(stats[1].trades, 2);
        assert_eq!(stats[1].net_pnl, 20.0);
        assert_eq!(stats[1].win_rate, 0.5);
        assert_eq!(stats[5].key, "Friday");
        assert_eq!(stats[5].trades, 1);
        assert!(stats.iter().all(|s| s.profit_factor.is_none()));
    }

    #[test]
    fn session_follows_local_open_hour() {
        // 02:00 UTC is Asia hours, but 21:00 of the previous evening in
        // New York, which classifies as the New York session.
        let open = Utc.with_ymd_and_hms(2024, 1, 15, 2, 0, 0).unwrap();
        let trades = vec![trade_at(10.0, open, Duration::minutes(30))];

        let utc_stats = session_stats(&trades, chrono_tz::UTC);
        assert_eq!(utc_stats[0].key, "Asia");
        assert_eq!(utc_stats[0].trades, 1);

        let ny_stats = session_stats(&trades, chrono_tz::America::New_York);
        assert_eq!(ny_stats[0].trades, 0);
        assert_eq!(ny_stats[2].key, "New York");
        assert_eq!(ny_stats[2].trades, 1);
    }

    #[test]
    fn duration_edges_land_in_the_right_bucket() {
        let open = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let trades = vec![
            trade_at(1.0, open, Duration::minutes(5)),
            trade_at(2.0, open, Duration::minutes(120)),
        ];

        let stats = duration_stats(&trades, chrono_tz::UTC);
        assert_eq!(stats.len(), 6);
        assert_eq!(stats[1].key, "5-30m");
        assert_eq!(stats[1].trades, 1);
        assert_eq!(stats[3].key, "2-6h");
        assert_eq!(stats[3].trades, 1);
        assert_eq!(stats[0].trades, 0);
    }

    #[test]
    fn duration_buckets_carry_profit_factor() {
        let open = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let trades = vec![
            trade_at(60.0, open, Duration::minutes(10)),
            trade_at(-20.0, open, Duration::minutes(12)),
        ];

        let stats = duration_stats(&trades, chrono_tz::UTC);
        assert_eq!(stats[1].profit_factor, Some(3.0));
        assert_eq!(stats[0].profit_factor, None);
    }

    #[test]
    fn date_only_trades_are_left_out() {
        let mut dated = trade(42.0);
        dated.open_time = None;
        dated.close_time = None;
        dated.date = Some("2024-01-15".to_string());

        let stats = weekday_stats(&[dated.clone()], chrono_tz::UTC);
        assert!(stats.iter().all(|s| s.trades == 0));
        let stats = session_stats(&[dated.clone()], chrono_tz::UTC);
        assert!(stats.iter().all(|s| s.trades == 0));
        let stats = duration_stats(&[dated], chrono_tz::UTC);
        assert!(stats.iter().all(|s| s.trades == 0));
    }

    #[test]
    fn breakevens_do_not_dilute_bucket_win_rate() {
        let open = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let trades = vec![
            trade_at(10.0, open, Duration::minutes(10)),
            trade_at(0.0, open, Duration::minutes(10)),
            trade_at(0.0, open, Duration::minutes(10)),
        ];

        let stats = duration_stats(&trades, chrono_tz::UTC);
        assert_eq!(stats[1].trades, 3);
        assert_eq!(stats[1].breakevens, 2);
        assert_eq!(stats[1].win_rate, 1.0);
    }

    #[test]
    fn single_timestamp_counts_as_zero_duration() {
        let mut one_sided = trade_with_r(8.0, 1.0);
        one_sided.open_time = None;

        let stats = duration_stats(&[one_sided], chrono_tz::UTC);
        assert_eq!(stats[0].key, "0-5m");
        assert_eq!(stats[0].trades, 1);
        assert_eq!(stats[0].avg_r, Some(1.0));
    }
}
