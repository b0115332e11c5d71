use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::core::calendar::advance;
use crate::models::{DataPoint, Interval};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn value_at(&self, index: f64) -> f64 {
        self.intercept + self.slope * index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Least squares line over bucket index (0, 1, 2, ...) -> value.
/// Needs at least two points.
pub fn fit_line(points: &[DataPoint]) -> Option<LinearFit> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;

    for (i, p) in points.iter().enumerate() {
        let x = i as f64;
        let y = p.value as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n_f * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n_f;

    Some(LinearFit { slope, intercept })
}

/// Extends `points` by `periods` buckets along the fitted line.
pub fn project_linear(points: &[DataPoint], interval: Interval, periods: usize) -> Vec<ProjectedPoint> {
    let (Some(fit), Some(last)) = (fit_line(points), points.last()) else {
        return Vec::new();
    };

    let mut projected = Vec::with_capacity(periods);
    let mut timestamp = last.timestamp;

    for step in 0..periods {
        let Some(next) = advance(timestamp, interval) else {
            break;
        };
        timestamp = next;
        projected.push(ProjectedPoint {
            timestamp,
            value: fit.value_at((points.len() + step) as f64),
        });
    }

    projected
}
