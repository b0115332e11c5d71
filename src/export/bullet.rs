use anyhow::Result;
use serde::Serialize;
use crate::core::engine::Aggregation;
use crate::models::DataPoint;

/// nvd3-style bullet chart entry for one series.
#[derive(Debug, Serialize, PartialEq)]
pub struct BulletChart {
    pub title: String,
    pub subtitle: String,
    /// [min, mean, max] over all buckets
    pub ranges: Vec<f64>,
    /// Latest bucket
    pub measures: Vec<f64>,
    /// Previous bucket, empty when there is only one
    pub markers: Vec<f64>,
}

pub fn summarize(name: &str, subtitle: &str, points: &[DataPoint]) -> Option<BulletChart> {
    let latest = points.last()?;
    let values: Vec<i64> = points.iter().map(|p| p.value).collect();

    let min = values.iter().copied().min()? as f64;
    let max = values.iter().copied().max()? as f64;
    let mean = values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64;

    let markers = if points.len() >= 2 {
        vec![points[points.len() - 2].value as f64]
    } else {
        Vec::new()
    };

    Some(BulletChart {
        title: name.to_string(),
        subtitle: subtitle.to_string(),
        ranges: vec![min, mean, max],
        measures: vec![latest.value as f64],
        markers,
    })
}

pub fn build(aggregation: &Aggregation) -> Vec<BulletChart> {
    let subtitle = format!("per {}", aggregation.config.interval);
    aggregation
        .series
        .iter()
        .filter_map(|(name, points)| summarize(name, &subtitle, points))
        .collect()
}

pub fn to_json(aggregation: &Aggregation) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build(aggregation))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn points(values: &[i64]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint {
                timestamp: Utc.with_ymd_and_hms(2023, i as u32 + 1, 1, 0, 0, 0).unwrap(),
                value: *v,
            })
            .collect()
    }

    #[test]
    fn test_summary_values() {
        let chart = summarize("signups", "per month", &points(&[4, 0, 8, 6])).unwrap();
        assert_eq!(chart.ranges, vec![0.0, 4.5, 8.0]);
        assert_eq!(chart.measures, vec![6.0]);
        assert_eq!(chart.markers, vec![8.0]);
    }

    #[test]
    fn test_single_point_has_no_marker() {
        let chart = summarize("signups", "per month", &points(&[3])).unwrap();
        assert!(chart.markers.is_empty());
        assert!(summarize("empty", "per month", &[]).is_none());
    }

    #[test]
    fn test_mean_of_bucket_values_near_i64_max() {
        let chart = summarize("bytes", "per month", &points(&[i64::MAX, i64::MAX])).unwrap();
        assert_eq!(chart.ranges[1], i64::MAX as f64);
    }
}
