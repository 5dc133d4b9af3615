use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use chrono_tz::Tz;
use thiserror::Error;
use tracing::debug;

use crate::analytics::time::{effective_date, TimePreference};
use crate::models::Trade;
use crate::source::{TradeQuery, TradeSource};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("could not read journal file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("journal file {path} is not a trade array")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads an already-normalized journal export, a JSON array of trades.
/// Broker-specific import formats are converted upstream of this file.
pub struct JsonFileSource {
    path: PathBuf,
    timezone: Tz,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>, timezone: Tz) -> Self {
        JsonFileSource {
            path: path.as_ref().to_path_buf(),
            timezone,
        }
    }

    fn load(&self) -> Result<Vec<Trade>, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl TradeSource for JsonFileSource {
    async fn fetch_trades(&self, query: &TradeQuery) -> Result<Vec<Trade>> {
        let all = self.load()?;
        let total = all.len();

        let trades: Vec<Trade> = all
            .into_iter()
            .filter(|t| matches_query(t, query, self.timezone))
            .collect();

        debug!(
            "{} of {} journal trades in scope for account '{}'",
            trades.len(),
            total,
            query.account_id
        );
        Ok(trades)
    }
}

fn matches_query(trade: &Trade, query: &TradeQuery, tz: Tz) -> bool {
    if let Some(symbol) = &query.symbol {
        if !trade.symbol.eq_ignore_ascii_case(symbol) {
            return false;
        }
    }
    if let Some(range) = &query.range {
        match effective_date(trade, TimePreference::CloseFirst, tz) {
            Some(date) => {
                if !range.contains(date) {
                    return false;
                }
            }
            // Undatable trades only survive an unbounded query.
            None => return false,
        }
    }
    true
}
