use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::analysis::projection::{project_linear, ProjectedPoint};
use crate::config::AggregationConfig;
use crate::core::engine::{Aggregation, ChartEngine};
use crate::export::{self, ExportFormat};
use crate::source::{self, CsvSource, JsonSource, SampleSource};

/// Picks a loader from the file extension (`.csv` or `.json`).
pub fn source_for_path(path: &Path) -> Result<Box<dyn SampleSource>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvSource::new(path))),
        "json" => Ok(Box::new(JsonSource::new(path))),
        _ => Err(anyhow!("Cannot infer sample format of {} (expected .csv or .json)", path.display())),
    }
}

/// Loads every input file into a fresh engine and aggregates it.
pub async fn load_and_aggregate(inputs: &[PathBuf], config: &AggregationConfig) -> Result<Aggregation> {
    let mut engine = ChartEngine::new();

    // 1. Ingest all sources
    for path in inputs {
        let source = source_for_path(path)?;
        source::load_into(source.as_ref(), &mut engine)
            .await
            .with_context(|| format!("loading {}", path.display()))?;
    }

    // 2. Aggregate onto one canonical timeline
    let aggregation = engine.aggregate(config)?.clone();
    info!(
        "Orchestrator: {} series, {} buckets per series",
        aggregation.len(),
        aggregation.canonical.len()
    );
    Ok(aggregation)
}

pub async fn render_files(inputs: &[PathBuf], config: &AggregationConfig, format: ExportFormat) -> Result<String> {
    let aggregation = load_and_aggregate(inputs, config).await?;
    export::render(&aggregation, format)
}

pub fn project_all(aggregation: &Aggregation, periods: usize) -> BTreeMap<String, Vec<ProjectedPoint>> {
    aggregation
        .series
        .iter()
        .map(|(name, points)| (name.clone(), project_linear(points, aggregation.config.interval, periods)))
        .collect()
}
