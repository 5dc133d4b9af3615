pub mod outcome;
pub mod session;
pub mod trade;

pub use outcome::*;
pub use session::{DurationBucket, Session};
pub use trade::{DateRange, RawTimestamp, Trade};
