use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::analytics::time::{effective_date, TimePreference};
use crate::models::{Trade, TradeResult};

/// One traded day's rollup. Days with no trades are never materialized;
/// the calendar grid fills gaps on the rendering side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub pnl: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub avg_r: Option<f64>,
    /// How many of the day's trades carried an R multiple. Needed to
    /// reweight `avg_r` when days are folded into larger periods.
    pub r_count: usize,
}

#[derive(Default)]
struct DayAcc {
    pnl: f64,
    trades: usize,
    wins: usize,
    losses: usize,
    breakevens: usize,
    gross_profit: f64,
    gross_loss: f64,
    r_sum: f64,
    r_count: usize,
}

impl DayAcc {
    fn add(&mut self, trade: &Trade) {
        let pnl = trade.pnl_or_zero();
        self.pnl += pnl;
        self.trades += 1;
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

    fn finish(self, date: NaiveDate) -> DailyStats {
        DailyStats {
            date,
            pnl: self.pnl,
            trades: self.trades,
            wins: self.wins,
            losses: self.losses,
            breakevens: self.breakevens,
            gross_profit: self.gross_profit,
            gross_loss: self.gross_loss,
            avg_r: if self.r_count > 0 {
                Some(self.r_sum / self.r_count as f64)
            } else {
                None
            },
            r_count: self.r_count,
        }
    }
}

/// Per-day rollups keyed by effective close date, ascending. Trades with
/// no resolvable date are dropped here.
pub fn daily_stats(trades: &[Trade], tz: Tz) -> Vec<DailyStats> {
    let mut by_day: HashMap<NaiveDate, DayAcc> = HashMap::new();
    for trade in trades {
        let Some(date) = effective_date(trade, TimePreference::CloseFirst, tz) else {
            continue;
        };
        by_day.entry(date).or_default().add(trade);
    }

    let mut days: Vec<DailyStats> = by_day
        .into_iter()
        .map(|(date, acc)| acc.finish(date))
        .collect();
    days.sort_by_key(|d| d.date);
    days
}

/// Calendar view of one month: traded days plus the best and worst day
/// by signed net P&L. Earliest day wins a tie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DailyStats>,
    pub best_day: Option<NaiveDate>,
    pub worst_day: Option<NaiveDate>,
}

pub fn calendar_month(trades: &[Trade], year: i32, month: u32, tz: Tz) -> CalendarMonth {
    let days: Vec<DailyStats> = daily_stats(trades, tz)
        .into_iter()
        .filter(|d| d.date.year() == year && d.date.month() == month)
        .collect();

    let mut best: Option<(NaiveDate, f64)> = None;
    let mut worst: Option<(NaiveDate, f64)> = None;
    for day in &days {
        if best.map_or(true, |(_, pnl)| day.pnl > pnl) {
            best = Some((day.date, day.pnl));
        }
        if worst.map_or(true, |(_, pnl)| day.pnl < pnl) {
            worst = Some((day.date, day.pnl));
        }
    }

    CalendarMonth {
        year,
        month,
        days,
        best_day: best.map(|(date, _)| date),
        worst_day: worst.map(|(date, _)| date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::trade_at;
    use chrono::{Duration, TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn groups_by_close_date_and_sorts_ascending() {
        let jan5 = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        let jan6 = Utc.with_ymd_and_hms(2024, 1, 6, 9, 0, 0).unwrap();
        let trades = vec![
            trade_at(5.0, jan6, Duration::minutes(10)),
            trade_at(50.0, jan5, Duration::minutes(10)),
            trade_at(-30.0, jan5, Duration::minutes(10)),
        ];

        let days = daily_stats(&trades, chrono_tz::UTC);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, day(2024, 1, 5));
        assert_eq!(days[0].pnl, 20.0);
        assert_eq!(days[0].trades, 2);
        assert_eq!(days[0].wins, 1);
        assert_eq!(days[0].losses, 1);
        assert_eq!(days[1].date, day(2024, 1, 6));
        assert_eq!(days[1].pnl, 5.0);
    }

    #[test]
    fn trade_closing_after_midnight_moves_to_next_day() {
        let late_open = Utc.with_ymd_and_hms(2024, 1, 5, 23, 30, 0).unwrap();
        let trades = vec![trade_at(10.0, late_open, Duration::hours(2))];

        let days = daily_stats(&trades, chrono_tz::UTC);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, day(2024, 1, 6));
    }

    #[test]
    fn month_view_picks_best_and_worst() {
        let jan5 = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        let jan6 = Utc.with_ymd_and_hms(2024, 1, 6, 9, 0, 0).unwrap();
        let feb1 = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        let trades = vec![
            trade_at(50.0, jan5, Duration::minutes(10)),
            trade_at(-30.0, jan5, Duration::minutes(10)),
            trade_at(5.0, jan6, Duration::minutes(10)),
            trade_at(999.0, feb1, Duration::minutes(10)),
        ];

        let month = calendar_month(&trades, 2024, 1, chrono_tz::UTC);
        assert_eq!(month.days.len(), 2);
        assert_eq!(month.best_day, Some(day(2024, 1, 5)));
        assert_eq!(month.worst_day, Some(day(2024, 1, 6)));
    }

    #[test]
    fn tied_days_resolve_to_the_earliest() {
        let jan8 = Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let jan9 = Utc.with_ymd_and_hms(2024, 1, 9, 9, 0, 0).unwrap();
        let trades = vec![
            trade_at(25.0, jan8, Duration::minutes(10)),
            trade_at(25.0, jan9, Duration::minutes(10)),
        ];

        let month = calendar_month(&trades, 2024, 1, chrono_tz::UTC);
        assert_eq!(month.best_day, Some(day(2024, 1, 8)));
        assert_eq!(month.worst_day, Some(day(2024, 1, 8)));
    }

    #[test]
    fn empty_month_has_no_best_or_worst() {
        let month = calendar_month(&[], 2024, 3, chrono_tz::UTC);
        assert!(month.days.is_empty());
        assert_eq!(month.best_day, None);
        assert_eq!(month.worst_day, None);
    }
}
