use crate::config::AggregationConfig;
use crate::core::store::{RawSeries, SeriesStore};
use crate::core::timeseries::{aligned_bounds, bucket_series, canonical_sequence};
use crate::error::Result;
use crate::models::{AggregatedSeries, DataPoint};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    /// Ingestion allowed; no aggregation reflects the current data.
    Collecting,
    /// The cached aggregation matches the raw store.
    Aggregated,
}

/// Result of one aggregation run. Every series shares `canonical` as its timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub config: AggregationConfig,
    pub canonical: Vec<DateTime<Utc>>,
    pub series: BTreeMap<String, Vec<DataPoint>>,
}

impl Aggregation {
    pub fn series_names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&[DataPoint]> {
        self.series.get(name).map(|points| points.as_slice())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn to_series(&self) -> Vec<AggregatedSeries> {
        self.series
            .iter()
            .map(|(name, points)| AggregatedSeries { name: name.clone(), points: points.clone() })
            .collect()
    }
}

/// Ingest-then-aggregate engine over an owned `SeriesStore`.
#[derive(Debug, Default)]
pub struct ChartEngine {
    store: SeriesStore,
    aggregation: Option<Aggregation>,
}

impl ChartEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: SeriesStore) -> Self {
        Self { store, aggregation: None }
    }

    pub fn state(&self) -> EngineState {
        if self.aggregation.is_some() {
            EngineState::Aggregated
        } else {
            EngineState::Collecting
        }
    }

    pub fn ingest<Tz: TimeZone>(&mut self, series: &str, instant: DateTime<Tz>, value: i64) -> Result<()> {
        self.store.add_sample(series, instant, value)?;
        self.aggregation = None;
        Ok(())
    }

    pub fn register_series(&mut self, series: &str) -> Result<()> {
        self.store.register_series(series)
    }

    pub fn series_names(&self) -> Vec<String> {
        self.store.series_names()
    }

    pub fn raw(&self, series: &str) -> Option<&RawSeries> {
        self.store.get(series)
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Last aggregation, if the store has not changed since.
    pub fn aggregation(&self) -> Option<&Aggregation> {
        self.aggregation.as_ref()
    }

    /// Recomputes buckets for every non-empty series from the current raw data.
    ///
    /// Either every series is produced on the same canonical timeline or an
    /// error is returned and the previous state is kept.
    pub fn aggregate(&mut self, config: &AggregationConfig) -> Result<&Aggregation> {
        let (min, max) = aligned_bounds(&self.store, config)?;
        let canonical = canonical_sequence(min, max, config.interval);

        debug!(
            "Engine: canonical timeline {} .. {} ({} {} buckets)",
            min,
            max,
            canonical.len(),
            config.interval
        );

        let series: BTreeMap<String, Vec<DataPoint>> = self
            .store
            .iter()
            .filter(|(_, raw)| !raw.is_empty())
            .map(|(name, raw)| -> Result<(String, Vec<DataPoint>)> {
                Ok((name.clone(), bucket_series(name, raw, &canonical, config)?))
            })
            .collect::<Result<_>>()?;

        info!(
            "Engine: aggregated {} series into {} {} buckets",
            series.len(),
            canonical.len(),
            config.interval
        );

        Ok(&*self.aggregation.insert(Aggregation {
            config: *config,
            canonical,
            series,
        }))
    }

    /// Parses raw option values and aggregates; `"day"` fails with `UnsupportedInterval`.
    pub fn inflate(&mut self, interval: &str, week_start: i64) -> Result<&Aggregation> {
        let config = AggregationConfig::parse(interval, week_start)?;
        self.aggregate(&config)
    }
}
