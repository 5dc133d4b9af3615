use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::analytics::risk::RiskSettings;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be zero (disabled) or positive, got {1}")]
    NegativePercent(&'static str, f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub account_id: String,
    pub journal_file: String,
    /// Timezone all calendar days, weekdays and session hours resolve in.
    pub timezone: Tz,
    pub risk: RiskSettings,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let tz_name = env("JOURNAL_TZ", "UTC");
        let timezone = tz_name.parse::<Tz>().unwrap_or_else(|_| {
            warn!("Unknown JOURNAL_TZ '{}', falling back to UTC", tz_name);
            Tz::UTC
        });

        Config {
            account_id: env("ACCOUNT_ID", "default"),
            journal_file: env("JOURNAL_FILE", "journal.json"),
            timezone,
            risk: RiskSettings {
                max_daily_loss_pct: env("MAX_DAILY_LOSS_PCT", "3.0").parse().unwrap_or(3.0),
                max_weekly_loss_pct: env("MAX_WEEKLY_LOSS_PCT", "6.0").parse().unwrap_or(6.0),
                target_daily_profit_pct: env("TARGET_DAILY_PROFIT_PCT", "2.0")
                    .parse()
                    .unwrap_or(2.0),
                target_weekly_profit_pct: env("TARGET_WEEKLY_PROFIT_PCT", "5.0")
                    .parse()
                    .unwrap_or(5.0),
            },
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let percents = [
            ("MAX_DAILY_LOSS_PCT", self.risk.max_daily_loss_pct),
            ("MAX_WEEKLY_LOSS_PCT", self.risk.max_weekly_loss_pct),
            ("TARGET_DAILY_PROFIT_PCT", self.risk.target_daily_profit_pct),
            ("TARGET_WEEKLY_PROFIT_PCT", self.risk.target_weekly_profit_pct),
        ];
        for (name, value) in percents {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::NegativePercent(name, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_percent_is_rejected() {
        let mut cfg = Config {
            account_id: "default".to_string(),
            journal_file: "journal.json".to_string(),
            timezone: Tz::UTC,
            risk: RiskSettings::default(),
            log_level: "INFO".to_string(),
        };
        assert!(cfg.validate().is_ok());

        cfg.risk.max_weekly_loss_pct = -1.0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("MAX_WEEKLY_LOSS_PCT"));

        cfg.risk.max_weekly_loss_pct = 0.0;
        assert!(cfg.validate().is_ok());
    }
}
