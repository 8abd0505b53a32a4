use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use crate::error::{PredictionError, PredictionResult};
use crate::report::formatter::{ChartPoint, TABLE_DATE_FORMAT};

pub const CHART_TITLE: &str = "Predicted Amount of Commuter Passenger over Time";
const ROYAL_BLUE: RGBColor = RGBColor(65, 105, 225);
const MAX_X_LABELS: usize = 10;

fn render_err<E: std::fmt::Display>(err: E) -> PredictionError {
    PredictionError::render(err.to_string())
}

/// Y axis bounds with some headroom above the highest point.
pub fn value_range(series: &[ChartPoint]) -> (i64, i64) {
    let min = series.iter().map(|p| p.passengers).min().unwrap_or(0).min(0);
    let max = series.iter().map(|p| p.passengers).max().unwrap_or(0);
    let headroom = (max.saturating_sub(min) / 10).max(1);
    (min, max.saturating_add(headroom))
}

/// Renders the prediction series as a dark-themed line chart PNG.
pub fn create_plot(series: &[ChartPoint], path: &Path) -> PredictionResult<()> {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&BLACK).map_err(render_err)?;

    let title_style = ("sans-serif", 24).into_font().color(&WHITE);
    if series.is_empty() {
        let centre = (500, 300);
        root.draw_text(
            CHART_TITLE,
            &title_style.pos(Pos::new(HPos::Center, VPos::Center)),
            centre,
        )
        .map_err(render_err)?;
        root.present().map_err(render_err)?;
        info!(path = %path.display(), "empty chart written");
        return Ok(());
    }

    let (y_min, y_max) = value_range(series);
    let last = (series.len() as i32 - 1).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, title_style)
        .margin(20)
        .x_label_area_size(100)
        .y_label_area_size(80)
        .build_cartesian_2d(0i32..last, y_min..y_max)
        .map_err(render_err)?;

    let date_label = |idx: &i32| {
        series
            .get(*idx as usize)
            .map(|p| p.date.format(TABLE_DATE_FORMAT).to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .axis_style(&WHITE)
        .x_labels(MAX_X_LABELS.min(series.len()))
        .x_label_formatter(&date_label)
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .color(&WHITE)
                .transform(FontTransform::Rotate90),
        )
        .y_label_style(("sans-serif", 12).into_font().color(&WHITE))
        .axis_desc_style(("sans-serif", 14).into_font().color(&WHITE))
        .x_desc("Date")
        .y_desc("Predicted Passenger")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            series
                .iter()
                .enumerate()
                .map(|(i, p)| (i as i32, p.passengers)),
            &ROYAL_BLUE,
        ))
        .map_err(render_err)?;

    // A single day has no line segment to draw.
    if series.len() == 1 {
        chart
            .draw_series(std::iter::once(Circle::new(
                (0, series[0].passengers),
                3,
                ROYAL_BLUE.filled(),
            )))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    info!(path = %path.display(), points = series.len(), "chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, passengers: i64) -> ChartPoint {
        ChartPoint {
            date: NaiveDate::from_ymd_opt(2022, 6, day).unwrap(),
            passengers,
        }
    }

    #[test]
    fn range_starts_at_zero_for_positive_series() {
        let (lo, hi) = value_range(&[point(1, 100), point(2, 300)]);
        assert_eq!(lo, 0);
        assert_eq!(hi, 330);
    }

    #[test]
    fn range_includes_negative_values() {
        let (lo, hi) = value_range(&[point(1, -20), point(2, 80)]);
        assert_eq!(lo, -20);
        assert_eq!(hi, 90);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let (lo, hi) = value_range(&[point(1, i64::MAX)]);
        assert_eq!((lo, hi), (0, i64::MAX));

        let (lo, hi) = value_range(&[point(1, i64::MIN), point(2, 10)]);
        assert_eq!(lo, i64::MIN);
        assert!(hi > 10);
    }

    #[test]
    fn flat_series_still_has_height() {
        let (lo, hi) = value_range(&[point(1, 0)]);
        assert!(hi > lo);
    }
}
