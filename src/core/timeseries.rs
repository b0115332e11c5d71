use crate::config::AggregationConfig;
use crate::core::calendar::{advance, interval_start};
use crate::core::store::{RawSeries, SeriesStore};
use crate::error::{ChartError, Result};
use crate::models::{DataPoint, Interval};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Earliest and latest raw instant across every series (not yet aligned).
pub fn global_bounds(store: &SeriesStore) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;

    for (_, raw) in store.iter() {
        // BTreeMap keys are sorted, so first/last are the series extremes
        let (Some((first, _)), Some((last, _))) = (raw.first_key_value(), raw.last_key_value()) else {
            continue;
        };

        bounds = Some(match bounds {
            Some((min, max)) => (min.min(*first), max.max(*last)),
            None => (*first, *last),
        });
    }

    bounds.ok_or(ChartError::NoData)
}

/// Global bounds floored to interval starts.
pub fn aligned_bounds(store: &SeriesStore, config: &AggregationConfig) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let (min, max) = global_bounds(store)?;
    Ok((
        interval_start(min, config.interval, config.week_start)?,
        interval_start(max, config.interval, config.week_start)?,
    ))
}

/// Every interval start from `aligned_min` to `aligned_max`, both inclusive.
pub fn canonical_sequence(
    aligned_min: DateTime<Utc>,
    aligned_max: DateTime<Utc>,
    interval: Interval,
) -> Vec<DateTime<Utc>> {
    let mut sequence = Vec::new();
    let mut current = Some(aligned_min);

    while let Some(ts) = current {
        if ts > aligned_max {
            break;
        }
        sequence.push(ts);
        current = advance(ts, interval);
    }

    sequence
}

/// Re-buckets one raw series onto interval starts and zero-fills the canonical timeline.
///
/// Values landing in the same bucket are summed; a sum leaving the `i64`
/// range fails with `ValueOverflow` naming `name` and the bucket. The result
/// is ordered by timestamp and never mutates its inputs.
pub fn bucket_series(
    name: &str,
    raw: &RawSeries,
    canonical: &[DateTime<Utc>],
    config: &AggregationConfig,
) -> Result<Vec<DataPoint>> {
    // 1. Aggregate raw samples per bucket key
    let mut buckets: BTreeMap<DateTime<Utc>, i64> = BTreeMap::new();
    for (instant, value) in raw {
        let key = interval_start(*instant, config.interval, config.week_start)?;
        let total = buckets.entry(key).or_insert(0);
        *total = total.checked_add(*value).ok_or_else(|| ChartError::ValueOverflow {
            series: name.to_string(),
            at: key,
        })?;
    }

    // 2. Zero-fill gaps on the shared timeline
    for ts in canonical {
        buckets.entry(*ts).or_insert(0);
    }

    // 3. Ordered output (BTreeMap iteration is chronological)
    Ok(buckets
        .into_iter()
        .map(|(timestamp, value)| DataPoint { timestamp, value })
        .collect())
}
