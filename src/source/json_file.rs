use async_trait::async_trait;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use crate::models::Sample;
use super::{parse_timestamp, SampleSource};

#[derive(Deserialize, Debug)]
struct JsonRow {
    series: String,
    timestamp: String,
    value: Value,
}

/// Reads an array of `{ "series", "timestamp", "value" }` objects.
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_samples(content: &str) -> Result<Vec<Sample>> {
        let rows: Vec<JsonRow> = serde_json::from_str(content)?;

        rows.into_iter()
            .enumerate()
            .map(|(i, row)| -> Result<Sample> {
                // Integers only: 1.5 or "3" are rejected, never coerced
                let value = row
                    .value
                    .as_i64()
                    .ok_or_else(|| anyhow!("entry {}: value {} is not an integer", i, row.value))?;
                let timestamp = parse_timestamp(&row.timestamp).with_context(|| format!("entry {}", i))?;

                Ok(Sample {
                    series: row.series,
                    timestamp,
                    value,
                })
            })
            .collect()
    }
}

#[async_trait]
impl SampleSource for JsonSource {
    fn name(&self) -> &str {
        "JSON Source"
    }

    async fn load(&self) -> Result<Vec<Sample>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        Self::parse_samples(&content).with_context(|| format!("invalid JSON samples in {}", self.path.display()))
    }
}
