//! Error types for the bucketing engine.

use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("Series name must not be empty")]
    InvalidSeriesName,

    #[error("Unsupported interval '{0}' (expected week, month, quarter or year)")]
    UnsupportedInterval(String),

    #[error("Week start must be a day of week 0-6 (Sunday = 0), got {0}")]
    InvalidWeekStart(i64),

    #[error("No samples ingested; nothing to aggregate")]
    NoData,

    #[error("Sum of values for '{series}' at {at} overflows i64")]
    ValueOverflow { series: String, at: DateTime<Utc> },

    #[error("Timestamp {0} has no interval start within the supported date range")]
    OutOfRange(DateTime<Utc>),
}

pub type Result<T> = std::result::Result<T, ChartError>;
