use anyhow::{anyhow, Result};
use std::io::Write;
use crate::core::engine::Aggregation;

/// Writes one row per canonical timestamp and one column per series.
pub fn write_csv<W: Write>(aggregation: &Aggregation, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["timestamp".to_string()];
    header.extend(aggregation.series.keys().cloned());
    writer.write_record(&header)?;

    for (row, ts) in aggregation.canonical.iter().enumerate() {
        let mut record = vec![ts.to_rfc3339()];
        for (name, points) in &aggregation.series {
            let point = points
                .get(row)
                .filter(|p| p.timestamp == *ts)
                .ok_or_else(|| anyhow!("series '{}' is not aligned with the canonical timeline at {}", name, ts))?;
            record.push(point.value.to_string());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(aggregation: &Aggregation) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(aggregation, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
