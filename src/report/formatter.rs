use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, PredictionResult};

/// Date format used in the result table.
pub const TABLE_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub date: NaiveDate,
    pub predicted_passengers: i64,
}

/// One point of the line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub passengers: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Predicted Passenger")]
    pub predicted_passenger: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionOutput {
    pub rows: Vec<PredictionRow>,
    pub chart: Vec<ChartPoint>,
    pub table: Vec<TableRow>,
}

impl PredictionOutput {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn display(&self) {
        println!("\nPrediction Results:");
        if self.table.is_empty() {
            println!("No dates in the selected range.");
            return;
        }
        println!("{:<12} {:>20}", "Date", "Predicted Passenger");
        for row in &self.table {
            println!("{:<12} {:>20}", row.date, row.predicted_passenger);
        }
    }
}

/// Casts a raw model output to a passenger count.
///
/// Truncates toward zero and keeps negative values as they are.
pub fn to_passenger_count(raw: f64) -> PredictionResult<i64> {
    if !raw.is_finite() {
        return Err(PredictionError::inference(format!(
            "model produced non-finite value {}",
            raw
        )));
    }
    let truncated = raw.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(PredictionError::inference(format!(
            "model produced {} which does not fit a passenger count",
            raw
        )));
    }
    Ok(truncated as i64)
}

/// Pairs each date with its prediction, keeping order.
pub fn format_predictions(dates: &[NaiveDate], raw: &[f64]) -> PredictionResult<PredictionOutput> {
    if dates.len() != raw.len() {
        return Err(PredictionError::schema_mismatch(format!(
            "model returned {} predictions for {} dates",
            raw.len(),
            dates.len()
        )));
    }

    let rows = dates
        .iter()
        .zip(raw)
        .map(|(&date, &value)| -> PredictionResult<PredictionRow> {
            Ok(PredictionRow {
                date,
                predicted_passengers: to_passenger_count(value)?,
            })
        })
        .collect::<PredictionResult<Vec<_>>>()?;

    let chart = rows
        .iter()
        .map(|r| ChartPoint {
            date: r.date,
            passengers: r.predicted_passengers,
        })
        .collect();
    let table = rows
        .iter()
        .map(|r| TableRow {
            date: r.date.format(TABLE_DATE_FORMAT).to_string(),
            predicted_passenger: r.predicted_passengers,
        })
        .collect();

    Ok(PredictionOutput { rows, chart, table })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(to_passenger_count(100.7).unwrap(), 100);
        assert_eq!(to_passenger_count(200.2).unwrap(), 200);
        assert_eq!(to_passenger_count(0.99).unwrap(), 0);
        assert_eq!(to_passenger_count(-3.7).unwrap(), -3);
        assert_eq!(to_passenger_count(-0.5).unwrap(), 0);
    }

    #[test]
    fn non_finite_is_an_inference_error() {
        for raw in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                to_passenger_count(raw),
                Err(PredictionError::Inference(_))
            ));
        }
    }

    #[test]
    fn out_of_range_is_an_inference_error() {
        for raw in [1e19, -1e19, 9.3e18, f64::MAX] {
            assert!(matches!(
                to_passenger_count(raw),
                Err(PredictionError::Inference(_))
            ));
        }
        assert_eq!(to_passenger_count(-9.2e18).unwrap(), -9_200_000_000_000_000_000);
    }

    #[test]
    fn huge_prediction_fails_the_whole_table() {
        let dates = [date(2020, 1, 1), date(2020, 1, 2)];
        let err = format_predictions(&dates, &[10.0, 1e19]).unwrap_err();
        assert!(matches!(err, PredictionError::Inference(_)));
    }

    #[test]
    fn table_uses_day_month_year() {
        let out = format_predictions(&[date(2020, 1, 2)], &[5.5]).unwrap();
        assert_eq!(
            out.table,
            vec![TableRow {
                date: "02-01-2020".to_string(),
                predicted_passenger: 5
            }]
        );
        assert_eq!(
            out.chart,
            vec![ChartPoint {
                date: date(2020, 1, 2),
                passengers: 5
            }]
        );
    }

    #[test]
    fn keeps_input_order() {
        let dates = [date(2021, 3, 1), date(2021, 3, 2), date(2021, 3, 3)];
        let out = format_predictions(&dates, &[3.0, 1.0, 2.0]).unwrap();
        let counts: Vec<i64> = out.chart.iter().map(|p| p.passengers).collect();
        assert_eq!(counts, vec![3, 1, 2]);
        assert_eq!(out.rows[2].date, dates[2]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = format_predictions(&[date(2021, 3, 1)], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch(_)));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let out = format_predictions(&[], &[]).unwrap();
        assert!(out.is_empty());
        assert!(out.chart.is_empty());
        assert!(out.table.is_empty());
    }

    #[test]
    fn table_serializes_with_display_headers() {
        let row = TableRow {
            date: "01-01-2020".to_string(),
            predicted_passenger: 100,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Date"], "01-01-2020");
        assert_eq!(json["Predicted Passenger"], 100);
    }
}
