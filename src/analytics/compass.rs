use serde::Serialize;

use crate::analytics::calendar::DailyStats;
use crate::analytics::kpi::kpis_from_daily;
use crate::models::{ScoreLevel, ScoreProfile};

const MAX_NARRATIVE_ITEMS: usize = 3;

/// Everything the score formulas read. Build one with
/// [`CompassInputs::from_daily`] or fill it by hand in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompassInputs {
    /// Percent, 0-100.
    pub win_rate: f64,
    pub profit_factor: Option<f64>,
    /// Average winning trade, magnitude.
    pub avg_win: f64,
    /// Average losing trade, magnitude.
    pub avg_loss: f64,
    pub net_pnl: f64,
    /// Peak-to-trough fall of the cumulative daily P&L curve, magnitude.
    pub max_drawdown: f64,
    pub avg_r: Option<f64>,
    /// Net P&L of each traded day, in date order.
    pub daily_pnl: Vec<f64>,
    pub days_traded: usize,
    pub days_in_period: usize,
}

impl CompassInputs {
    pub fn from_daily(days: &[DailyStats], days_in_period: usize) -> CompassInputs {
        let kpi = kpis_from_daily(days);

        let mut running = 0.0;
        let mut peak = 0.0;
        let mut max_drawdown = 0.0;
        for day in days {
            running += day.pnl;
            if running > peak {
                peak = running;
            }
            if peak - running > max_drawdown {
                max_drawdown = peak - running;
            }
        }

        CompassInputs {
            win_rate: kpi.win_rate,
            profit_factor: kpi.profit_factor,
            avg_win: if kpi.win_count > 0 {
                kpi.gross_profit / kpi.win_count as f64
            } else {
                0.0
            },
            avg_loss: if kpi.loss_count > 0 {
                kpi.gross_loss / kpi.loss_count as f64
            } else {
                0.0
            },
            net_pnl: kpi.net_pnl,
            max_drawdown,
            avg_r: kpi.avg_r,
            daily_pnl: days.iter().map(|d| d.pnl).collect(),
            days_traded: days.iter().filter(|d| d.trades > 0).count(),
            days_in_period,
        }
    }
}

/// Composite 0-100 score with its pillar breakdown. The dashboard
/// profile leaves discipline at 0 and the narrative lists empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompassScore {
    pub score: f64,
    pub level: ScoreLevel,
    pub performance: f64,
    pub consistency: f64,
    pub risk: f64,
    pub discipline: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

pub fn compass_score(inputs: &CompassInputs, profile: ScoreProfile) -> CompassScore {
    match profile {
        ScoreProfile::Dashboard => dashboard_score(inputs),
        ScoreProfile::PeriodSummary => period_summary_score(inputs),
    }
}

fn dashboard_score(inputs: &CompassInputs) -> CompassScore {
    let wr = win_rate_score(inputs.win_rate);
    let pf = dashboard_pf_score(inputs.profit_factor.unwrap_or(0.0));
    let awl = avg_win_loss_score(inputs.avg_win / inputs.avg_loss);
    let dd = drawdown_score(inputs.max_drawdown, inputs.net_pnl);
    let rec = recovery_score(inputs.net_pnl / inputs.max_drawdown);
    let cons = stddev_consistency_score(&inputs.daily_pnl, inputs.net_pnl);

    let score = (wr * 0.2 + pf * 0.2 + awl * 0.2 + dd * 0.15 + rec * 0.15 + cons * 0.1)
        .clamp(0.0, 100.0);

    CompassScore {
        score,
        level: ScoreLevel::from_score(score),
        performance: (wr + pf + awl) / 3.0,
        consistency: cons,
        risk: (dd + rec) / 2.0,
        discipline: 0.0,
        strengths: Vec::new(),
        weaknesses: Vec::new(),
    }
}

fn period_summary_score(inputs: &CompassInputs) -> CompassScore {
    let pf = period_pf_score(inputs.profit_factor.unwrap_or(0.0));
    let avg_r = inputs.avg_r.map_or(0.0, avg_r_score);
    let performance = pf * 0.6 + avg_r * 0.4;

    let consistency = days_traded_consistency_score(inputs);

    let dd = drawdown_score(inputs.max_drawdown, inputs.net_pnl);
    let rec = recovery_score(inputs.net_pnl / inputs.max_drawdown);
    let risk = (dd + rec) / 2.0;

    let discipline = discipline_score(inputs);

    let score = (performance * 0.35 + consistency * 0.25 + risk * 0.25 + discipline * 0.15)
        .clamp(0.0, 100.0);
    let (strengths, weaknesses) = build_narrative(inputs);

    CompassScore {
        score,
        level: ScoreLevel::from_score(score),
        performance,
        consistency,
        risk,
        discipline,
        strengths,
        weaknesses,
    }
}

fn win_rate_score(win_rate: f64) -> f64 {
    if !win_rate.is_finite() || win_rate <= 0.0 {
        return 0.0;
    }
    win_rate.clamp(0.0, 100.0)
}

/// Curve used on the dashboard widget. Flat steps up to 2.0, then a
/// linear climb that tops out at 95.
fn dashboard_pf_score(pf: f64) -> f64 {
    if !pf.is_finite() || pf <= 0.0 {
        0.0
    } else if pf <= 0.8 {
        20.0
    } else if pf <= 1.0 {
        40.0
    } else if pf <= 1.5 {
        65.0
    } else if pf <= 2.0 {
        80.0
    } else if pf >= 3.0 {
        95.0
    } else {
        80.0 + (pf - 2.0) * 15.0
    }
}

/// Curve used on the period review page. Piecewise linear everywhere so
/// small improvements always move the number.
fn period_pf_score(pf: f64) -> f64 {
    if !pf.is_finite() || pf <= 0.0 {
        0.0
    } else if pf >= 3.0 {
        100.0
    } else if pf >= 2.0 {
        80.0 + (pf - 2.0) * 15.0
    } else if pf >= 1.0 {
        60.0 + (pf - 1.0) * 20.0
    } else {
        30.0 + pf * 30.0
    }
}

fn avg_win_loss_score(ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= 0.0 {
        0.0
    } else if ratio >= 4.0 {
        100.0
    } else if ratio >= 3.0 {
        90.0 + (ratio - 3.0) * 10.0
    } else if ratio >= 2.0 {
        70.0 + (ratio - 2.0) * 20.0
    } else if ratio >= 1.0 {
        40.0 + (ratio - 1.0) * 30.0
    } else {
        10.0
    }
}

/// Shallower drawdowns relative to profit score higher. A flat or losing
/// account pins at 10 rather than rewarding inactivity.
fn drawdown_score(max_drawdown: f64, net_pnl: f64) -> f64 {
    if max_drawdown <= 0.0 || net_pnl <= 0.0 {
        return 10.0;
    }
    (100.0 * (1.0 - max_drawdown / (net_pnl.abs() + max_drawdown))).clamp(0.0, 100.0)
}

fn recovery_score(recovery_factor: f64) -> f64 {
    if !recovery_factor.is_finite() || recovery_factor <= 0.0 {
        0.0
    } else if recovery_factor >= 5.0 {
        100.0
    } else if recovery_factor >= 3.0 {
        80.0 + (recovery_factor - 3.0) * 10.0
    } else if recovery_factor >= 2.0 {
        60.0 + (recovery_factor - 2.0) * 20.0
    } else if recovery_factor >= 1.0 {
        30.0 + (recovery_factor - 1.0) * 30.0
    } else {
        10.0
    }
}

/// Clamped to [-0.5, 3] and mapped piecewise: -0.5 scores 0, breakeven R
/// scores 25, 1R scores 60, 2R scores 85, 3R scores 100.
fn avg_r_score(avg_r: f64) -> f64 {
    if !avg_r.is_finite() {
        return 0.0;
    }
    let r = avg_r.clamp(-0.5, 3.0);
    if r >= 2.0 {
        85.0 + (r - 2.0) * 15.0
    } else if r >= 1.0 {
        60.0 + (r - 1.0) * 25.0
    } else if r >= 0.0 {
        25.0 + r * 35.0
    } else {
        (r + 0.5) * 50.0
    }
}

/// Day-to-day volatility relative to total profit. Without two active
/// days and a positive total there is nothing to measure, so the worst
/// ratio is assumed.
fn stddev_consistency_score(daily_pnl: &[f64], total_profit: f64) -> f64 {
    let active: Vec<f64> = daily_pnl.iter().copied().filter(|p| *p != 0.0).collect();
    let ratio = if active.len() >= 2 && total_profit > 0.0 {
        sample_std_dev(&active) / total_profit.abs()
    } else {
        1.0
    };
    (100.0 - ratio * 100.0).clamp(0.0, 100.0)
}

fn days_traded_consistency_score(inputs: &CompassInputs) -> f64 {
    if inputs.days_in_period == 0 {
        return 0.0;
    }
    let mut score = inputs.days_traded as f64 / inputs.days_in_period as f64 * 100.0;
    if let Some(cov) = coefficient_of_variation(&inputs.daily_pnl) {
        if cov > 2.0 {
            score *= 0.7;
        } else if cov > 1.0 {
            score *= 0.85;
        }
    }
    score.clamp(0.0, 100.0)
}

fn discipline_score(inputs: &CompassInputs) -> f64 {
    let pf = inputs.profit_factor.unwrap_or(0.0);
    let wr = inputs.win_rate;

    let mut score = 50.0;
    if wr >= 55.0 && pf >= 1.6 {
        score = 80.0;
    } else if wr >= 45.0 && pf >= 1.3 {
        score = 65.0;
    }
    if wr < 40.0 || pf < 1.0 {
        score = 30.0;
    }

    let losing: Vec<f64> = inputs
        .daily_pnl
        .iter()
        .copied()
        .filter(|p| *p < 0.0)
        .collect();
    if !losing.is_empty() {
        let avg_loss_day = losing.iter().map(|p| p.abs()).sum::<f64>() / losing.len() as f64;
        let outsized = losing
            .iter()
            .filter(|p| p.abs() > 2.0 * avg_loss_day)
            .count();
        if outsized as f64 / losing.len() as f64 > 0.3 {
            score *= 0.7;
        }
    }
    score
}

fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

fn coefficient_of_variation(daily_pnl: &[f64]) -> Option<f64> {
    if daily_pnl.len() < 2 {
        return None;
    }
    let mean = daily_pnl.iter().sum::<f64>() / daily_pnl.len() as f64;
    if mean == 0.0 {
        return None;
    }
    Some(sample_std_dev(daily_pnl) / mean.abs())
}

fn build_narrative(inputs: &CompassInputs) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    let pf = inputs.profit_factor.unwrap_or(0.0);
    let wr = inputs.win_rate;

    let winning_days: Vec<f64> = inputs
        .daily_pnl
        .iter()
        .copied()
        .filter(|p| *p > 0.0)
        .collect();
    let losing_days: Vec<f64> = inputs
        .daily_pnl
        .iter()
        .copied()
        .filter(|p| *p < 0.0)
        .collect();
    let avg_win_day = if winning_days.is_empty() {
        0.0
    } else {
        winning_days.iter().sum::<f64>() / winning_days.len() as f64
    };
    let avg_loss_day = if losing_days.is_empty() {
        0.0
    } else {
        losing_days.iter().map(|p| p.abs()).sum::<f64>() / losing_days.len() as f64
    };
    let traded_ratio = if inputs.days_in_period > 0 {
        inputs.days_traded as f64 / inputs.days_in_period as f64
    } else {
        0.0
    };

    if wr >= 50.0 {
        strengths.push(format!("Win rate of {:.1}% keeps the equity curve steady", wr));
    }
    if pf > 1.5 {
        strengths.push(format!("Profit factor of {:.2} shows winners outrunning losers", pf));
    }
    if avg_loss_day > 0.0 && avg_win_day > 1.5 * avg_loss_day {
        strengths.push(format!(
            "Green days average {:.0} against {:.0} on red days",
            avg_win_day, avg_loss_day
        ));
    }
    if traded_ratio >= 0.7 {
        strengths.push(format!(
            "Active on {} of {} days in the period",
            inputs.days_traded, inputs.days_in_period
        ));
    }
    if let Some(r) = inputs.avg_r.filter(|r| *r > 1.5) {
        strengths.push(format!("Average trade of {:.1}R pays for several attempts", r));
    }

    if wr < 40.0 {
        weaknesses.push(format!("Win rate of {:.1}% puts all the weight on payoff size", wr));
    }
    if pf <= 1.1 {
        weaknesses.push(format!("Profit factor of {:.2} leaves no room for slippage", pf));
    }
    if avg_win_day > 0.0 && avg_loss_day > 1.5 * avg_win_day {
        weaknesses.push(format!(
            "Red days average {:.0} against {:.0} on green days",
            avg_loss_day, avg_win_day
        ));
    }
    if traded_ratio < 0.3 {
        weaknesses.push("Long gaps between sessions make results hard to trust".to_string());
    }

    strengths.truncate(MAX_NARRATIVE_ITEMS);
    weaknesses.truncate(MAX_NARRATIVE_ITEMS);
    if strengths.is_empty() {
        strengths.push("Keep logging trades to surface what is working".to_string());
    }
    if weaknesses.is_empty() {
        weaknesses.push("No standout leak in this period".to_string());
    }
    (strengths, weaknesses)
}
