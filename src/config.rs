use crate::error::Result;
use crate::models::{Interval, WeekStart};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

pub const INTERVAL_ENV: &str = "CHART_INTERVAL";
pub const WEEK_START_ENV: &str = "CHART_WEEK_START";

/// Bucket granularity and weekly anchor for one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub interval: Interval,
    /// Only consulted when `interval` is `Week`.
    #[serde(default)]
    pub week_start: WeekStart,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            interval: Interval::Month,
            week_start: WeekStart::MONDAY,
        }
    }
}

impl AggregationConfig {
    pub fn new(interval: Interval, week_start: WeekStart) -> Self {
        Self { interval, week_start }
    }

    /// Validates raw option values, e.g. `("week", 1)`.
    pub fn parse(interval: &str, week_start: i64) -> Result<Self> {
        Ok(Self {
            interval: interval.parse()?,
            week_start: WeekStart::new(week_start)?,
        })
    }

    /// Reads `CHART_INTERVAL` / `CHART_WEEK_START`, loading `.env` first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(INTERVAL_ENV) {
            config.interval = raw.parse()?;
        }

        if let Some(raw) = lookup(WEEK_START_ENV) {
            let day: i64 = raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("{} must be an integer 0-6, got '{}': {}", WEEK_START_ENV, raw, e))?;
            config.week_start = WeekStart::new(day)?;
        }

        Ok(config)
    }
}

/// Log filter for the binaries: `RUST_LOG` when it is set and valid, else `default_directive`.
pub fn log_filter(default_directive: &str) -> EnvFilter {
    let raw = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    log_filter_from(raw.as_deref(), default_directive)
}

fn log_filter_from(raw: Option<&str>, default_directive: &str) -> EnvFilter {
    raw.filter(|r| !r.trim().is_empty())
        .and_then(|r| EnvFilter::try_new(r).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive))
}
