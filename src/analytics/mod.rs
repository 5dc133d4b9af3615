pub mod calendar;
pub mod compass;
pub mod kpi;
pub mod risk;
pub mod tags;
pub mod time;
pub mod time_buckets;

pub use calendar::{calendar_month, daily_stats, CalendarMonth, DailyStats};
pub use compass::{compass_score, CompassInputs, CompassScore};
pub use kpi::{compute_kpis, kpis_from_daily, KpiSet};
pub use risk::{evaluate_guard, risk_progress, RiskProgress, RiskSettings, RiskState};
pub use tags::tag_stats;
pub use time::{effective_date, effective_time, has_clock_time, TimePreference};
pub use time_buckets::{duration_stats, session_stats, weekday_stats, BucketStats};
