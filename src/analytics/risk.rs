use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::analytics::calendar::daily_stats;
use crate::models::Trade;

/// Equity base assumed until the account has positive realized history.
pub const DEFAULT_EQUITY_BASE: f64 = 10_000.0;

/// Loss caps and profit targets as percent of the rolling equity base.
/// A zero value disables that check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSettings {
    pub max_daily_loss_pct: f64,
    pub max_weekly_loss_pct: f64,
    pub target_daily_profit_pct: f64,
    pub target_weekly_profit_pct: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        RiskSettings {
            max_daily_loss_pct: 3.0,
            max_weekly_loss_pct: 6.0,
            target_daily_profit_pct: 2.0,
            target_weekly_profit_pct: 5.0,
        }
    }
}

/// Where today and this week stand against the equity base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskProgress {
    pub daily_pnl: f64,
    pub daily_pct: f64,
    pub daily_base: f64,
    pub weekly_pnl: f64,
    pub weekly_pct: f64,
    pub weekly_base: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum RiskState {
    DailyLocked { message: String },
    WeeklyLocked { message: String },
    DailyWarning { message: String },
    WeeklyWarning { message: String },
    DailyTarget { message: String },
    WeeklyTarget { message: String },
    None,
}

impl RiskState {
    pub fn label(&self) -> &'static str {
        match self {
            RiskState::DailyLocked { .. } => "daily-locked",
            RiskState::WeeklyLocked { .. } => "weekly-locked",
            RiskState::DailyWarning { .. } => "daily-warning",
            RiskState::WeeklyWarning { .. } => "weekly-warning",
            RiskState::DailyTarget { .. } => "daily-target",
            RiskState::WeeklyTarget { .. } => "weekly-target",
            RiskState::None => "none",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            RiskState::DailyLocked { message }
            | RiskState::WeeklyLocked { message }
            | RiskState::DailyWarning { message }
            | RiskState::WeeklyWarning { message }
            | RiskState::DailyTarget { message }
            | RiskState::WeeklyTarget { message } => Some(message),
            RiskState::None => None,
        }
    }
}

/// Daily and weekly P&L against their equity bases. The daily base is
/// cumulative realized P&L strictly before today, the weekly base the
/// same before Monday of the current week, both in the journal timezone;
/// a non-positive history falls back to the default base.
pub fn risk_progress(trades: &[Trade], now: DateTime<Utc>, tz: Tz) -> RiskProgress {
    let today = now.with_timezone(&tz).date_naive();
    let week_start = start_of_week(today);

    let mut before_today = 0.0;
    let mut before_week = 0.0;
    let mut daily_pnl = 0.0;
    let mut weekly_pnl = 0.0;

    for day in daily_stats(trades, tz) {
        if day.date < today {
            before_today += day.pnl;
        }
        if day.date < week_start {
            before_week += day.pnl;
        }
        if day.date == today {
            daily_pnl = day.pnl;
        }
        if day.date >= week_start {
            weekly_pnl += day.pnl;
        }
    }

    let daily_base = if before_today > 0.0 {
        before_today
    } else {
        DEFAULT_EQUITY_BASE
    };
    let weekly_base = if before_week > 0.0 {
        before_week
    } else {
        DEFAULT_EQUITY_BASE
    };

    RiskProgress {
        daily_pnl,
        daily_pct: daily_pnl / daily_base * 100.0,
        daily_base,
        weekly_pnl,
        weekly_pct: weekly_pnl / weekly_base * 100.0,
        weekly_base,
    }
}

/// First matching state wins: daily lock, weekly lock, daily warning,
/// weekly warning, daily target, weekly target.
pub fn evaluate_guard(progress: &RiskProgress, settings: &RiskSettings) -> RiskState {
    let daily_loss = -progress.daily_pct;
    let weekly_loss = -progress.weekly_pct;

    if settings.max_daily_loss_pct > 0.0 && daily_loss >= settings.max_daily_loss_pct {
        return RiskState::DailyLocked {
            message: format!(
                "Daily loss of {:.2}% has used {:.0}% of the {:.1}% cap. Trading is done for today.",
                daily_loss,
                daily_loss / settings.max_daily_loss_pct * 100.0,
                settings.max_daily_loss_pct
            ),
        };
    }
    if settings.max_weekly_loss_pct > 0.0 && weekly_loss >= settings.max_weekly_loss_pct {
        return RiskState::WeeklyLocked {
            message: format!(
                "Weekly loss of {:.2}% has used {:.0}% of the {:.1}% cap. Step away until Monday.",
                weekly_loss,
                weekly_loss / settings.max_weekly_loss_pct * 100.0,
                settings.max_weekly_loss_pct
            ),
        };
    }
    if settings.max_daily_loss_pct > 0.0 {
        let usage = daily_loss / settings.max_daily_loss_pct;
        if usage >= 0.5 {
            return RiskState::DailyWarning {
                message: format!(
                    "Daily loss of {:.2}% is {:.0}% of the {:.1}% cap. Size down.",
                    daily_loss,
                    usage * 100.0,
                    settings.max_daily_loss_pct
                ),
            };
        }
    }
    if settings.max_weekly_loss_pct > 0.0 {
        let usage = weekly_loss / settings.max_weekly_loss_pct;
        if usage >= 0.5 {
            return RiskState::WeeklyWarning {
                message: format!(
                    "Weekly loss of {:.2}% is {:.0}% of the {:.1}% cap. Size down.",
                    weekly_loss,
                    usage * 100.0,
                    settings.max_weekly_loss_pct
                ),
            };
        }
    }
    if settings.target_daily_profit_pct > 0.0
        && progress.daily_pct >= settings.target_daily_profit_pct
    {
        return RiskState::DailyTarget {
            message: format!(
                "Daily profit of {:.2}% has reached {:.0}% of the {:.1}% goal.",
                progress.daily_pct,
                progress.daily_pct / settings.target_daily_profit_pct * 100.0,
                settings.target_daily_profit_pct
            ),
        };
    }
    if settings.target_weekly_profit_pct > 0.0
        && progress.weekly_pct >= settings.target_weekly_profit_pct
    {
        return RiskState::WeeklyTarget {
            message: format!(
                "Weekly profit of {:.2}% has reached {:.0}% of the {:.1}% goal.",
                progress.weekly_pct,
                progress.weekly_pct / settings.target_weekly_profit_pct * 100.0,
                settings.target_weekly_profit_pct
            ),
        };
    }
    RiskState::None
}

pub fn evaluate(
    trades: &[Trade],
    settings: &RiskSettings,
    now: DateTime<Utc>,
    tz: Tz,
) -> (RiskProgress, RiskState) {
    let progress = risk_progress(trades, now, tz);
    let state = evaluate_guard(&progress, settings);
    (progress, state)
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
