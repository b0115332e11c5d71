//! Calendar-aligned bucketing for chart series.
//!
//! Samples are ingested per named series, then aggregated onto week, month,
//! quarter or year boundaries. Every output series shares one gap-free
//! timeline, with zero-valued buckets wherever a series had no data.

pub mod error;
pub mod models;
pub mod config;
pub mod core;
pub mod source;
pub mod export;
pub mod analysis;

pub use crate::config::AggregationConfig;
pub use crate::core::engine::{Aggregation, ChartEngine, EngineState};
pub use crate::error::{ChartError, Result};
pub use crate::models::{AggregatedSeries, DataPoint, Interval, Sample, WeekStart};
