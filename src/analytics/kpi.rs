use std::collections::HashSet;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::analytics::calendar::DailyStats;
use crate::analytics::time::{effective_date, TimePreference};
use crate::models::{Trade, TradeResult};

/// Headline performance numbers for one scope of trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSet {
    pub net_pnl: f64,
    pub gross_profit: f64,
    /// Magnitude of the losing side, always non-negative.
    pub gross_loss: f64,
    /// Percent, 0-100. Breakevens count against it.
    pub win_rate: f64,
    pub profit_factor: Option<f64>,
    pub avg_r: Option<f64>,
    pub trade_count: usize,
    pub day_count: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub breakeven_count: usize,
}

pub fn compute_kpis(trades: &[Trade], tz: Tz) -> KpiSet {
    let mut kpi = KpiSet {
        trade_count: trades.len(),
        ..KpiSet::default()
    };
    let mut r_sum = 0.0;
    let mut r_count = 0usize;
    let mut days: HashSet<NaiveDate> = HashSet::new();

    for trade in trades {
        let pnl = trade.pnl_or_zero();
        kpi.net_pnl += pnl;

        match trade.result() {
            Some(TradeResult::Win) => {
                kpi.win_count += 1;
                kpi.gross_profit += pnl;
            }
            Some(TradeResult::Loss) => {
                kpi.loss_count += 1;
                kpi.gross_loss += pnl.abs();
            }
            Some(TradeResult::Breakeven) => kpi.breakeven_count += 1,
            None => {}
        }

        if let Some(r) = trade.r_multiple {
            r_sum += r;
            r_count += 1;
        }
        if let Some(date) = effective_date(trade, TimePreference::CloseFirst, tz) {
            days.insert(date);
        }
    }

    kpi.day_count = days.len();
    finalize(&mut kpi, r_sum, r_count);
    kpi
}

/// Same KPIs rebuilt from per-day rollups, so a month view does not
/// re-walk every trade. Average R is weighted by each day's R count.
pub fn kpis_from_daily(days: &[DailyStats]) -> KpiSet {
    let mut kpi = KpiSet::default();
    let mut r_sum = 0.0;
    let mut r_count = 0usize;

    for day in days {
        kpi.net_pnl += day.pnl;
        kpi.gross_profit += day.gross_profit;
        kpi.gross_loss += day.gross_loss;
        kpi.trade_count += day.trades;
        kpi.win_count += day.wins;
        kpi.loss_count += day.losses;
        kpi.breakeven_count += day.breakevens;
        if day.trades > 0 {
            kpi.day_count += 1;
        }
        if let Some(avg) = day.avg_r {
            r_sum += avg * day.r_count as f64;
            r_count += day.r_count;
        }
    }

    finalize(&mut kpi, r_sum, r_count);
    kpi
}

fn finalize(kpi: &mut KpiSet, r_sum: f64, r_count: usize) {
    let decided = kpi.win_count + kpi.loss_count + kpi.breakeven_count;
    if decided > 0 {
        kpi.win_rate = kpi.win_count as f64 / decided as f64 * 100.0;
    }
    kpi.profit_factor = profit_factor(kpi.gross_profit, kpi.gross_loss);
    if r_count > 0 {
        kpi.avg_r = Some(r_sum / r_count as f64);
    }
}

/// Gross profit over gross loss magnitude. None when nothing was lost;
/// the dashboards render a dash there, never infinity.
pub fn profit_factor(gross_profit: f64, gross_loss: f64) -> Option<f64> {
    if gross_loss == 0.0 {
        None
    } else {
        Some(gross_profit / gross_loss)
    }
}
