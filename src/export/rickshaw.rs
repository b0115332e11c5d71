use anyhow::Result;
use serde::Serialize;
use crate::core::engine::Aggregation;

#[derive(Debug, Serialize, PartialEq)]
pub struct RickshawPoint {
    /// Unix seconds
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RickshawSeries {
    pub name: String,
    pub data: Vec<RickshawPoint>,
}

pub fn build(aggregation: &Aggregation) -> Vec<RickshawSeries> {
    aggregation
        .series
        .iter()
        .map(|(name, points)| RickshawSeries {
            name: name.clone(),
            data: points
                .iter()
                .map(|p| RickshawPoint { x: p.timestamp.timestamp(), y: p.value })
                .collect(),
        })
        .collect()
}

pub fn to_json(aggregation: &Aggregation) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build(aggregation))?)
}
