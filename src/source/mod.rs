use async_trait::async_trait;
use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use crate::core::engine::ChartEngine;
use crate::models::Sample;
use tracing::info;

pub mod csv_file;
pub mod json_file;

pub use csv_file::CsvSource;
pub use json_file::JsonSource;

/// Anything that can produce raw samples for the engine.
#[async_trait]
pub trait SampleSource: Send + Sync {
    fn name(&self) -> &str;
    async fn load(&self) -> Result<Vec<Sample>>;
}

/// Loads every sample from `source` into `engine`. Stops at the first rejected sample.
pub async fn load_into(source: &dyn SampleSource, engine: &mut ChartEngine) -> Result<usize> {
    let samples = source.load().await?;
    let count = samples.len();

    for sample in samples {
        engine
            .ingest(&sample.series, sample.timestamp, sample.value)
            .map_err(|e| anyhow!("{}: sample at {} rejected: {}", source.name(), sample.timestamp, e))?;
    }

    info!("{}: loaded {} samples", source.name(), count);
    Ok(count)
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(anyhow!("Unrecognized timestamp '{}'", raw))
}
