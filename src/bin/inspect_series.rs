use anyhow::Result;
use chart_buckets_lib::config::log_filter;
use chart_buckets_lib::core::engine::ChartEngine;
use chart_buckets_lib::core::orchestrator::source_for_path;
use chart_buckets_lib::source::load_into;
use std::path::PathBuf;

/// Prints a per-series summary of the raw store, before any bucketing.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter("warn"))
        .init();

    let inputs: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if inputs.is_empty() {
        anyhow::bail!("usage: inspect_series <samples.csv|samples.json>...");
    }

    let mut engine = ChartEngine::new();
    for path in &inputs {
        let source = source_for_path(path)?;
        load_into(source.as_ref(), &mut engine).await?;
    }

    println!("\n{:<24} | {:<8} | {:<25} | {:<25} | {:<12}", "Series", "Points", "First", "Last", "Total");
    println!("{}", "-".repeat(106));

    for name in engine.series_names() {
        let Some(raw) = engine.raw(&name) else { continue };
        let first = raw.keys().next().map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string());
        let last = raw.keys().next_back().map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string());
        let total: i64 = raw.values().sum();
        println!("{:<24} | {:<8} | {:<25} | {:<25} | {:<12}", name, raw.len(), first, last, total);
    }

    println!("\n{} distinct samples across {} series.", engine.store().sample_count(), engine.series_names().len());
    Ok(())
}
