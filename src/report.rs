use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::analytics::calendar::{calendar_month, daily_stats, CalendarMonth, DailyStats};
use crate::analytics::compass::{compass_score, CompassInputs, CompassScore};
use crate::analytics::kpi::{compute_kpis, KpiSet};
use crate::analytics::risk::{evaluate, RiskProgress, RiskState};
use crate::analytics::tags::tag_stats;
use crate::analytics::time_buckets::{duration_stats, session_stats, weekday_stats, BucketStats};
use crate::config::Config;
use crate::models::{ScoreProfile, Trade};

/// Everything the journal dashboard binds to, derived in one pass over
/// the trade snapshot. Plain data, rebuilt on every refresh; feeding the
/// same snapshot twice produces an identical report.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub kpis: KpiSet,
    pub compass: CompassScore,
    pub period_review: CompassScore,
    pub risk_progress: RiskProgress,
    pub risk_state: RiskState,
    pub weekdays: Vec<BucketStats>,
    pub sessions: Vec<BucketStats>,
    pub durations: Vec<BucketStats>,
    pub tags: Vec<BucketStats>,
    pub month: CalendarMonth,
}

impl DashboardReport {
    pub fn build(trades: &[Trade], cfg: &Config, now: DateTime<Utc>) -> Self {
        let tz = cfg.timezone;
        let days = daily_stats(trades, tz);
        let inputs = CompassInputs::from_daily(&days, period_days(&days));
        let (risk_progress, risk_state) = evaluate(trades, &cfg.risk, now, tz);
        let today = now.with_timezone(&tz).date_naive();

        DashboardReport {
            generated_at: now,
            kpis: compute_kpis(trades, tz),
            compass: compass_score(&inputs, ScoreProfile::Dashboard),
            period_review: compass_score(&inputs, ScoreProfile::PeriodSummary),
            risk_progress,
            risk_state,
            weekdays: weekday_stats(trades, tz),
            sessions: session_stats(trades, tz),
            durations: duration_stats(trades, tz),
            tags: tag_stats(trades),
            month: calendar_month(trades, today.year(), today.month(), tz),
        }
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(70));
        println!("  TRADE COMPASS");
        println!("{}", "=".repeat(70));
        println!(
            "  Generated:   {}",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        println!();
        println!("  COMPASS SCORE");
        println!("  ───────────────────────────────────");
        println!(
            "  Dashboard:   {:.1} ({})",
            self.compass.score, self.compass.level
        );
        println!(
            "  Period:      {:.1} ({})",
            self.period_review.score, self.period_review.level
        );
        println!(
            "  Pillars:     perf {:.0} | consistency {:.0} | risk {:.0} | discipline {:.0}",
            self.period_review.performance,
            self.period_review.consistency,
            self.period_review.risk,
            self.period_review.discipline
        );
        for line in &self.period_review.strengths {
            println!("  + {}", line);
        }
        for line in &self.period_review.weaknesses {
            println!("  - {}", line);
        }
        println!();
        println!("  PERFORMANCE");
        println!("  ───────────────────────────────────");
        println!("  Net PnL:     ${:+.2}", self.kpis.net_pnl);
        println!(
            "  Trades:      {} over {} days",
            self.kpis.trade_count, self.kpis.day_count
        );
        println!(
            "  Win/Loss/BE: {} / {} / {}",
            self.kpis.win_count, self.kpis.loss_count, self.kpis.breakeven_count
        );
        println!("  Win Rate:    {:.1}%", self.kpis.win_rate);
        println!("  Profit Factor: {}", fmt_opt(self.kpis.profit_factor));
        println!("  Avg R:       {}", fmt_opt(self.kpis.avg_r));
        println!();
        println!("  RISK");
        println!("  ───────────────────────────────────");
        println!(
            "  Today:       ${:+.2} ({:+.2}% of {:.0})",
            self.risk_progress.daily_pnl,
            self.risk_progress.daily_pct,
            self.risk_progress.daily_base
        );
        println!(
            "  Week:        ${:+.2} ({:+.2}% of {:.0})",
            self.risk_progress.weekly_pnl,
            self.risk_progress.weekly_pct,
            self.risk_progress.weekly_base
        );
        println!("  State:       {}", self.risk_state.label());
        if let Some(message) = self.risk_state.message() {
            println!("  {}", message);
        }

        print_buckets("BY WEEKDAY", &self.weekdays);
        print_buckets("BY SESSION", &self.sessions);
        print_buckets("BY DURATION", &self.durations);
        print_buckets("BY TAG", &self.tags);

        println!();
        println!("  CALENDAR {}-{:02}", self.month.year, self.month.month);
        println!("  ───────────────────────────────────");
        if self.month.days.is_empty() {
            println!("  No trades this month");
        }
        for day in &self.month.days {
            println!(
                "  {}: ${:+.2} ({} trades)",
                day.date.format("%Y-%m-%d"),
                day.pnl,
                day.trades
            );
        }
        if let Some(best) = self.month.best_day {
            println!("  Best:        {}", best.format("%Y-%m-%d"));
        }
        if let Some(worst) = self.month.worst_day {
            println!("  Worst:       {}", worst.format("%Y-%m-%d"));
        }
        println!("{}", "=".repeat(70));
    }
}

fn print_buckets(title: &str, buckets: &[BucketStats]) {
    if buckets.iter().all(|b| b.trades == 0) {
        return;
    }
    println!();
    println!("  {}", title);
    println!("  ───────────────────────────────────");
    for b in buckets {
        println!(
            "  {:>12}: {} trades | WR {:.0}% | PnL ${:+.2}",
            b.key,
            b.trades,
            b.win_rate * 100.0,
            b.net_pnl
        );
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

fn period_days(days: &[DailyStats]) -> usize {
    match (days.first(), days.last()) {
        (Some(first), Some(last)) => (last.date - first.date).num_days() as usize + 1,
        _ => 0,
    }
}
