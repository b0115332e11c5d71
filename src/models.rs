use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, Weekday};
use std::fmt;
use std::str::FromStr;
use crate::error::ChartError;

/// Calendar granularity used to bucket samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Week,
    Month,
    Quarter,
    Year,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Week => "week",
            Interval::Month => "month",
            Interval::Quarter => "quarter",
            Interval::Year => "year",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Interval::Week),
            "month" => Ok(Interval::Month),
            "quarter" => Ok(Interval::Quarter),
            "year" => Ok(Interval::Year),
            _ => Err(ChartError::UnsupportedInterval(s.to_string())),
        }
    }
}

/// Day-of-week anchor for weekly buckets. 0 = Sunday ... 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct WeekStart(u8);

impl WeekStart {
    pub const SUNDAY: WeekStart = WeekStart(0);
    pub const MONDAY: WeekStart = WeekStart(1);

    pub fn new(day: i64) -> Result<Self, ChartError> {
        if (0..=6).contains(&day) {
            Ok(WeekStart(day as u8))
        } else {
            Err(ChartError::InvalidWeekStart(day))
        }
    }

    pub fn days_from_sunday(&self) -> u32 {
        self.0 as u32
    }

    pub fn weekday(&self) -> Weekday {
        match self.0 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::MONDAY
    }
}

impl TryFrom<i64> for WeekStart {
    type Error = ChartError;

    fn try_from(day: i64) -> Result<Self, Self::Error> {
        WeekStart::new(day)
    }
}

impl From<WeekStart> for u8 {
    fn from(ws: WeekStart) -> u8 {
        ws.0
    }
}

impl From<Weekday> for WeekStart {
    fn from(day: Weekday) -> Self {
        WeekStart(day.num_days_from_sunday() as u8)
    }
}

/// A single raw observation before bucketing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Sample {
    pub series: String,
    pub timestamp: DateTime<Utc>,
    pub value: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: i64,
}

/// One output series, already aligned to the canonical timeline.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AggregatedSeries {
    pub name: String,
    pub points: Vec<DataPoint>,
}
