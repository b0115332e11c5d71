use crate::error::{ChartError, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;

/// Raw samples of one series, keyed by exact UTC instant.
pub type RawSeries = BTreeMap<DateTime<Utc>, i64>;

/// Owns every named series seen during a run.
///
/// Samples landing on the same exact instant are merged by addition, so
/// ingestion order never changes the stored totals.
#[derive(Debug, Default, Clone)]
pub struct SeriesStore {
    series: BTreeMap<String, RawSeries>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the series `name` at `instant`, creating the series on first use.
    ///
    /// Fails with `ValueOverflow` when the merged total leaves the `i64` range;
    /// the store is not modified in that case.
    pub fn add_sample<Tz: TimeZone>(&mut self, name: &str, instant: DateTime<Tz>, value: i64) -> Result<()> {
        let name = validate_name(name)?;
        let instant = instant.with_timezone(&Utc);

        let current = self
            .series
            .get(name)
            .and_then(|raw| raw.get(&instant))
            .copied()
            .unwrap_or(0);
        let total = current.checked_add(value).ok_or_else(|| ChartError::ValueOverflow {
            series: name.to_string(),
            at: instant,
        })?;

        self.series.entry(name.to_string()).or_default().insert(instant, total);

        Ok(())
    }

    /// Declares a series without samples. Existing data is left untouched.
    pub fn register_series(&mut self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.series.entry(name.to_string()).or_default();
        Ok(())
    }

    /// Known series names in lexicographic order.
    pub fn series_names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&RawSeries> {
        self.series.get(name.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawSeries)> {
        self.series.iter()
    }

    /// Number of distinct (series, instant) entries.
    pub fn sample_count(&self) -> usize {
        self.series.values().map(|s| s.len()).sum()
    }

    /// True when no series holds a single sample.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(|s| s.is_empty())
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ChartError::InvalidSeriesName);
    }
    Ok(trimmed)
}
