use chart_buckets_lib::core::calendar::interval_start;
use chart_buckets_lib::{AggregationConfig, ChartEngine, ChartError, DataPoint, Interval, WeekStart};
use chrono::{DateTime, TimeZone, Utc};
use rand::seq::SliceRandom;

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[test]
fn quarter_buckets_sum_and_zero_fill() {
    let mut engine = ChartEngine::new();
    engine.ingest("A", day(2023, 1, 15), 10).unwrap();
    engine.ingest("A", day(2023, 2, 20), 5).unwrap();
    engine.ingest("A", day(2023, 7, 10), 3).unwrap();

    let agg = engine.inflate("quarter", 1).unwrap();
    assert_eq!(
        agg.get("A").unwrap(),
        &[
            DataPoint { timestamp: day(2023, 1, 1), value: 15 },
            DataPoint { timestamp: day(2023, 4, 1), value: 0 },
            DataPoint { timestamp: day(2023, 7, 1), value: 3 },
        ]
    );
}

#[test]
fn weekly_bucket_anchors_on_preceding_monday() {
    let mut engine = ChartEngine::new();
    engine.ingest("B", Utc.with_ymd_and_hms(2023, 3, 8, 10, 0, 0).unwrap(), 4).unwrap();

    let agg = engine.aggregate(&AggregationConfig::new(Interval::Week, WeekStart::MONDAY)).unwrap();
    assert_eq!(agg.get("B").unwrap(), &[DataPoint { timestamp: day(2023, 3, 6), value: 4 }]);
}

#[test]
fn duplicate_instants_merge_before_bucketing() {
    let mut engine = ChartEngine::new();
    let t = Utc.with_ymd_and_hms(2023, 4, 2, 15, 30, 0).unwrap();
    engine.ingest("C", t, 4).unwrap();
    engine.ingest("C", t, 6).unwrap();

    let raw = engine.raw("C").unwrap();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[&t], 10);
}

#[test]
fn unsupported_interval_produces_no_output() {
    let mut engine = ChartEngine::new();
    engine.ingest("A", day(2023, 1, 1), 1).unwrap();

    let err = engine.inflate("day", 1).unwrap_err();
    assert!(matches!(err, ChartError::UnsupportedInterval(_)));
    assert!(engine.aggregation().is_none());
}

#[test]
fn empty_engine_reports_no_data() {
    let mut engine = ChartEngine::new();
    assert_eq!(engine.aggregate(&AggregationConfig::default()).unwrap_err(), ChartError::NoData);
}

#[test]
fn series_without_samples_is_absent_from_output() {
    let mut engine = ChartEngine::new();
    engine.ingest("A", day(2023, 1, 10), 2).unwrap();
    engine.ingest("A", day(2023, 3, 20), 5).unwrap();
    engine.register_series("B").unwrap();

    assert_eq!(engine.series_names(), vec!["A", "B"]);

    let agg = engine.inflate("month", 1).unwrap();
    assert_eq!(agg.series_names(), vec!["A"]);
    assert!(agg.get("B").is_none());
    assert_eq!(agg.get("A").unwrap().iter().map(|p| p.value).collect::<Vec<_>>(), vec![2, 0, 5]);
}

#[test]
fn every_series_shares_the_canonical_timeline() {
    let mut engine = ChartEngine::new();
    engine.ingest("early", day(2022, 11, 3), 1).unwrap();
    engine.ingest("late", day(2023, 5, 28), 1).unwrap();
    engine.ingest("middle", day(2023, 1, 31), 1).unwrap();

    let agg = engine.inflate("month", 1).unwrap();
    // Nov 2022 .. May 2023 inclusive
    assert_eq!(agg.canonical.len(), 7);
    assert_eq!(agg.canonical.first(), Some(&day(2022, 11, 1)));
    assert_eq!(agg.canonical.last(), Some(&day(2023, 5, 1)));

    for (name, points) in &agg.series {
        let stamps: Vec<_> = points.iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, agg.canonical, "series {}", name);
        assert_eq!(points.iter().filter(|p| p.value == 0).count(), 6, "series {}", name);
    }
}

#[test]
fn weekly_canonical_length_matches_span() {
    let mut engine = ChartEngine::new();
    engine.ingest("A", day(2023, 1, 4), 1).unwrap();
    engine.ingest("A", day(2023, 3, 29), 1).unwrap();

    let agg = engine.aggregate(&AggregationConfig::new(Interval::Week, WeekStart::SUNDAY)).unwrap();
    let first = *agg.canonical.first().unwrap();
    let last = *agg.canonical.last().unwrap();
    let expected = ((last - first).num_days() / 7 + 1) as usize;

    assert_eq!(agg.canonical.len(), expected);
    assert!(agg.canonical.windows(2).all(|w| (w[1] - w[0]).num_days() == 7));
}

#[test]
fn aggregation_conserves_totals_regardless_of_order() {
    let mut samples: Vec<(&str, DateTime<Utc>, i64)> = Vec::new();
    for i in 0..120u32 {
        let ts = day(2021, 1, 1) + chrono::Duration::hours(i as i64 * 61);
        samples.push(("alpha", ts, (i % 7) as i64 - 2));
        samples.push(("beta", ts + chrono::Duration::days(400), (i % 5) as i64));
        // exact duplicates exercise the raw merge rule
        samples.push(("alpha", ts, 1));
    }

    let run = |samples: &[(&str, DateTime<Utc>, i64)], interval: &str| {
        let mut engine = ChartEngine::new();
        for (name, ts, value) in samples {
            engine.ingest(name, *ts, *value).unwrap();
        }
        engine.inflate(interval, 3).unwrap().clone()
    };

    for interval in ["week", "month", "quarter", "year"] {
        let ordered = run(&samples[..], interval);

        let mut shuffled = samples.clone();
        shuffled.shuffle(&mut rand::thread_rng());
        assert_eq!(run(&shuffled[..], interval), ordered, "interval {}", interval);

        for name in ["alpha", "beta"] {
            let raw_total: i64 = samples.iter().filter(|s| s.0 == name).map(|s| s.2).sum();
            let bucket_total: i64 = ordered.get(name).unwrap().iter().map(|p| p.value).sum();
            assert_eq!(bucket_total, raw_total, "{} / {}", name, interval);
        }
    }
}

#[test]
fn zero_filled_buckets_have_no_contributing_samples() {
    let mut engine = ChartEngine::new();
    let stamps = [day(2020, 2, 29), day(2020, 12, 31), day(2023, 6, 15)];
    for ts in stamps {
        engine.ingest("A", ts, 1).unwrap();
    }

    let agg = engine.inflate("quarter", 1).unwrap();
    let contributing: Vec<_> = stamps
        .iter()
        .map(|ts| interval_start(*ts, Interval::Quarter, WeekStart::MONDAY).unwrap())
        .collect();

    for point in agg.get("A").unwrap() {
        if contributing.contains(&point.timestamp) {
            assert_eq!(point.value, 1);
        } else {
            assert_eq!(point.value, 0);
        }
    }
}

#[test]
fn reaggregation_after_more_ingestion_recomputes() {
    let mut engine = ChartEngine::new();
    engine.ingest("A", day(2023, 1, 1), 1).unwrap();
    assert_eq!(engine.inflate("year", 1).unwrap().canonical.len(), 1);

    engine.ingest("A", day(2025, 8, 1), 1).unwrap();
    let agg = engine.inflate("year", 1).unwrap();
    assert_eq!(agg.canonical, vec![day(2023, 1, 1), day(2024, 1, 1), day(2025, 1, 1)]);
    assert_eq!(agg.get("A").unwrap()[1].value, 0);
}

#[test]
fn overflowing_values_are_rejected_not_wrapped() {
    let mut engine = ChartEngine::new();
    engine.ingest("bytes", day(2023, 1, 1), i64::MAX).unwrap();
    assert_eq!(
        engine.ingest("bytes", day(2023, 1, 1), 1).unwrap_err(),
        ChartError::ValueOverflow { series: "bytes".to_string(), at: day(2023, 1, 1) }
    );

    engine.ingest("bytes", day(2023, 1, 2), 1).unwrap();
    assert_eq!(
        engine.inflate("month", 1).unwrap_err(),
        ChartError::ValueOverflow { series: "bytes".to_string(), at: day(2023, 1, 1) }
    );
    assert!(engine.aggregation().is_none());
}
