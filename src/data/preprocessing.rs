use chrono::{Duration, NaiveDate};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::region::Region;

/// Number of columns the model consumes: region_code, relative_day.
pub const FEATURE_COUNT: usize = 2;

/// Reference date the relative day feature is counted from (2006-01-01).
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2006, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Every day from start to end, ascending. Empty when start > end.
    pub fn days(&self) -> Vec<NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(|d| *d <= end).collect()
    }

    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub region_code: i64,
    pub relative_day: i64,
}

impl FeatureRow {
    pub fn new(region: Region, date: NaiveDate) -> Self {
        FeatureRow {
            region_code: region.code(),
            relative_day: relative_day(date),
        }
    }

    /// Calendar date this row was encoded from.
    pub fn date(&self) -> NaiveDate {
        epoch() + Duration::days(self.relative_day)
    }
}

/// Whole days elapsed since the epoch; negative before it.
pub fn relative_day(date: NaiveDate) -> i64 {
    (date - epoch()).num_days()
}

pub fn encode_features(region: Region, range: &DateRange) -> Vec<FeatureRow> {
    range
        .days()
        .into_iter()
        .map(|date| FeatureRow::new(region, date))
        .collect()
}

/// Builds the `(rows, 2)` input matrix, region_code in column 0.
pub fn feature_table(rows: &[FeatureRow]) -> Array2<f64> {
    let mut table = Array2::zeros((rows.len(), FEATURE_COUNT));
    for (i, row) in rows.iter().enumerate() {
        table[[i, 0]] = row.region_code as f64;
        table[[i, 1]] = row.relative_day as f64;
    }
    table
}
