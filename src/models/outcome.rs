use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeResult {
    Win,
    Loss,
    Breakeven,
}

impl TradeResult {
    /// Classification by P&L sign. Stored result fields can go stale after
    /// an edit; every aggregation derives the result through here instead.
    pub fn from_pnl(pnl: f64) -> TradeResult {
        if pnl > 0.0 {
            TradeResult::Win
        } else if pnl < 0.0 {
            TradeResult::Loss
        } else {
            TradeResult::Breakeven
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeResult::Win => "win",
            TradeResult::Loss => "loss",
            TradeResult::Breakeven => "breakeven",
        }
    }
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLevel {
    Weak,
    Developing,
    Solid,
    Strong,
    Elite,
}

impl ScoreLevel {
    pub fn from_score(score: f64) -> ScoreLevel {
        if score < 40.0 {
            ScoreLevel::Weak
        } else if score < 60.0 {
            ScoreLevel::Developing
        } else if score < 75.0 {
            ScoreLevel::Solid
        } else if score < 90.0 {
            ScoreLevel::Strong
        } else {
            ScoreLevel::Elite
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLevel::Weak => "Weak",
            ScoreLevel::Developing => "Developing",
            ScoreLevel::Solid => "Solid",
            ScoreLevel::Strong => "Strong",
            ScoreLevel::Elite => "Elite",
        }
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which Compass Score formula set to apply. The dashboard widget and the
/// period review page use different curves and weights; merging them would
/// change the numbers users already see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreProfile {
    Dashboard,
    PeriodSummary,
}
