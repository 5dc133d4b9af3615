pub mod json_file;

pub use json_file::JsonFileSource;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DateRange, Trade};

/// Scope of a trade fetch. Account scoping belongs to the source; the
/// analytics core aggregates whatever slice it is handed.
#[derive(Debug, Clone, Default)]
pub struct TradeQuery {
    pub account_id: String,
    pub range: Option<DateRange>,
    pub symbol: Option<String>,
}

#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn fetch_trades(&self, query: &TradeQuery) -> Result<Vec<Trade>>;
}
