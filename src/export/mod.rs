//! Serializers that turn an aggregation into chart-library payloads.

pub mod rickshaw;
pub mod table;
pub mod bullet;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Rickshaw,
    Csv,
    Bullet,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Rickshaw => "rickshaw",
            ExportFormat::Csv => "csv",
            ExportFormat::Bullet => "bullet",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rickshaw" | "json" => Ok(ExportFormat::Rickshaw),
            "csv" => Ok(ExportFormat::Csv),
            "bullet" => Ok(ExportFormat::Bullet),
            other => Err(anyhow::anyhow!("Unknown export format '{}'", other)),
        }
    }
}

/// Renders `aggregation` in the requested format.
pub fn render(aggregation: &crate::core::engine::Aggregation, format: ExportFormat) -> anyhow::Result<String> {
    match format {
        ExportFormat::Rickshaw => rickshaw::to_json(aggregation),
        ExportFormat::Csv => table::to_csv_string(aggregation),
        ExportFormat::Bullet => bullet::to_json(aggregation),
    }
}
