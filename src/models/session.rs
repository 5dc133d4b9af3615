use serde::{Deserialize, Serialize};
use std::fmt;

/// Market session a trade was opened in, by local hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    Asia,
    London,
    NewYork,
    Other,
}

impl Session {
    pub const ALL: [Session; 4] = [
        Session::Asia,
        Session::London,
        Session::NewYork,
        Session::Other,
    ];

    /// Hour boundaries are half-open: 7:00 already belongs to London,
    /// 14:00 to New York, 22:00 to the off-hours bucket.
    pub fn from_hour(hour: u32) -> Session {
        match hour {
            0..=6 => Session::Asia,
            7..=13 => Session::London,
            14..=21 => Session::NewYork,
            _ => Session::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Asia => "Asia",
            Session::London => "London",
            Session::NewYork => "New York",
            Session::Other => "Other",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Holding-time bucket, from scalps to multi-day swings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "0-5m")]
    M0To5,
    #[serde(rename = "5-30m")]
    M5To30,
    #[serde(rename = "30m-120m")]
    M30To120,
    #[serde(rename = "2-6h")]
    H2To6,
    #[serde(rename = "6-24h")]
    H6To24,
    #[serde(rename = "24h+")]
    H24Plus,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 6] = [
        DurationBucket::M0To5,
        DurationBucket::M5To30,
        DurationBucket::M30To120,
        DurationBucket::H2To6,
        DurationBucket::H6To24,
        DurationBucket::H24Plus,
    ];

    /// Buckets are half-open on the right: exactly 5 minutes is 5-30m,
    /// exactly 120 minutes is 2-6h. Negative durations from clock skew
    /// clamp into the first bucket.
    pub fn from_minutes(minutes: i64) -> DurationBucket {
        match minutes.max(0) {
            0..=4 => DurationBucket::M0To5,
            5..=29 => DurationBucket::M5To30,
            30..=119 => DurationBucket::M30To120,
            120..=359 => DurationBucket::H2To6,
            360..=1439 => DurationBucket::H6To24,
            _ => DurationBucket::H24Plus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::M0To5 => "0-5m",
            DurationBucket::M5To30 => "5-30m",
            DurationBucket::M30To120 => "30m-120m",
            DurationBucket::H2To6 => "2-6h",
            DurationBucket::H6To24 => "6-24h",
            DurationBucket::H24Plus => "24h+",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
