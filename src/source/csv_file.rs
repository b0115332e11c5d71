use async_trait::async_trait;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use crate::models::Sample;
use super::{parse_timestamp, SampleSource};

/// Reads `series,timestamp,value` rows from a CSV file.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_samples(content: &str) -> Result<Vec<Sample>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut samples = Vec::new();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let (Some(series), Some(timestamp), Some(value)) = (record.get(0), record.get(1), record.get(2)) else {
                return Err(anyhow!("line {}: expected 3 columns (series,timestamp,value)", line));
            };

            let timestamp = parse_timestamp(timestamp).with_context(|| format!("line {}", line))?;
            let value: i64 = value
                .parse()
                .map_err(|_| anyhow!("line {}: value '{}' is not an integer", line, value))?;

            samples.push(Sample {
                series: series.to_string(),
                timestamp,
                value,
            });
        }

        Ok(samples)
    }
}

#[async_trait]
impl SampleSource for CsvSource {
    fn name(&self) -> &str {
        "CSV Source"
    }

    async fn load(&self) -> Result<Vec<Sample>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        Self::parse_samples(&content).with_context(|| format!("invalid CSV in {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_valid_rows() {
        let content = "series,timestamp,value\n\
                       signups, 2023-01-15 ,10\n\
                       signups,2023-02-20T08:30:00Z,5\n";

        let samples = CsvSource::parse_samples(content).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].series, "signups");
        assert_eq!(samples[0].timestamp, Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap());
        assert_eq!(samples[1].value, 5);
    }

    #[test]
    fn test_parse_rejects_float_value() {
        let content = "series,timestamp,value\nA,2023-01-15,1.5\n";
        let err = CsvSource::parse_samples(content).unwrap_err();
        assert!(err.to_string().contains("not an integer"), "{}", err);
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let content = "series,timestamp,value\nA,yesterday,1\n";
        assert!(CsvSource::parse_samples(content).is_err());
    }
}
