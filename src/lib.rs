pub mod analytics;
pub mod config;
pub mod models;
pub mod report;
pub mod source;
#[cfg(test)]
pub mod test_helpers;
