//! Draws the yearly aurora-visibility chart.
//!
//! The layout keeps the established visual language for this data: a light
//! gray base line of all Kp readings on a fixed 0..9 axis, bold blue vertical
//! lines with red markers where a reading crosses the storm threshold, dashed
//! seasonal markers at the equinoxes and solstices, and the smoothed sunspot
//! trend on a right-hand secondary axis.

use crate::chart::error::ChartError;
use crate::types::reading::ClassifiedReading;
use crate::types::sunspot::SunspotTrendPoint;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::info;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1600, 800);
const BASE_LINE: RGBColor = RGBColor(221, 221, 221);
const SEASON_LINE: RGBColor = RGBColor(150, 150, 150);
const TREND_LINE: RGBColor = RGBColor(235, 117, 0);

/// Approximate equinox and solstice dates, stable enough for reference lines.
const SEASON_MARKS: [(u32, u32); 4] = [(3, 20), (6, 21), (9, 22), (12, 21)];

/// Chart file name for a year; the only thing that varies is the year itself.
pub fn chart_file_name(year: i32) -> String {
    format!("kp_index_{}.png", year)
}

/// Renders the chart for `year` into `output_dir` and returns the path of the
/// written PNG. Fails only on I/O or drawing-backend errors; never retried.
pub fn render_year(
    year: i32,
    readings: &[ClassifiedReading],
    trend: &[SunspotTrendPoint],
    output_dir: &Path,
) -> Result<PathBuf, ChartError> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| ChartError::OutputDirCreation(output_dir.to_path_buf(), e))?;
    let path = output_dir.join(chart_file_name(year));

    // One day of padding on each side, so January 1 is not glued to the axis.
    let x_start = ymd(year, 1, 1) - Duration::days(1);
    let x_end = ymd(year + 1, 1, 1) + Duration::days(1);

    let trend_points = trend_overlay_points(trend, year);
    let trend_axis_max = trend_points
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.15;

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| ChartError::render(&path, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Aurora borealis visibility throughout {}", year),
            ("sans-serif", 36),
        )
        .margin(24)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .right_y_label_area_size(56)
        .build_cartesian_2d(RangedDateTime::from(x_start..x_end), 0f64..9f64)
        .map_err(|e| ChartError::render(&path, e))?
        .set_secondary_coord(RangedDateTime::from(x_start..x_end), 0f64..trend_axis_max);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(13)
        .x_label_formatter(&|dt: &NaiveDateTime| dt.format("%b %d").to_string())
        .y_desc("Kp index")
        .draw()
        .map_err(|e| ChartError::render(&path, e))?;

    chart
        .configure_secondary_axes()
        .y_desc("Sunspot number (smoothed)")
        .draw()
        .map_err(|e| ChartError::render(&path, e))?;

    // Seasonal reference lines go first so the data draws over them.
    for (month, day) in SEASON_MARKS {
        let t = ymd(year, month, day);
        chart
            .draw_series(DashedLineSeries::new(
                [(t, 0f64), (t, 9f64)],
                6,
                4,
                SEASON_LINE.stroke_width(1),
            ))
            .map_err(|e| ChartError::render(&path, e))?;
    }

    chart
        .draw_series(LineSeries::new(
            readings.iter().map(|r| (r.time.naive_utc(), r.kp)),
            BASE_LINE.stroke_width(1),
        ))
        .map_err(|e| ChartError::render(&path, e))?;

    let storms: Vec<&ClassifiedReading> =
        readings.iter().filter(|r| r.is_storm()).collect();

    chart
        .draw_series(storms.iter().map(|r| {
            PathElement::new(
                vec![(r.time.naive_utc(), 0f64), (r.time.naive_utc(), r.kp)],
                BLUE.stroke_width(3),
            )
        }))
        .map_err(|e| ChartError::render(&path, e))?
        .label("Good visibility days")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));

    chart
        .draw_series(
            storms
                .iter()
                .map(|r| Circle::new((r.time.naive_utc(), r.kp), 4, RED.filled())),
        )
        .map_err(|e| ChartError::render(&path, e))?
        .label("Events")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    if !trend_points.is_empty() {
        chart
            .draw_secondary_series(LineSeries::new(
                trend_points.iter().cloned(),
                TREND_LINE.stroke_width(2),
            ))
            .map_err(|e| ChartError::render(&path, e))?
            .label("Sunspot trend")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], TREND_LINE.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.75))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ChartError::render(&path, e))?;

    drop(chart);
    root.present().map_err(|e| ChartError::render(&path, e))?;
    drop(root);
    info!("Chart saved to {:?}", path);
    Ok(path)
}

/// Interpolates the yearly smoothed trend across the rendered year.
///
/// SILSO stamps yearly values at mid-year, so the overlay runs from the value
/// halfway to the previous year, through this year's value at July, to the
/// value halfway to the next year. Empty when the trend series has no value
/// for the requested year.
fn trend_overlay_points(trend: &[SunspotTrendPoint], year: i32) -> Vec<(NaiveDateTime, f64)> {
    let value_for = |y: i32| trend.iter().find(|p| p.year == y).map(|p| p.smoothed);
    let Some(current) = value_for(year) else {
        return Vec::new();
    };
    let prev = value_for(year - 1).unwrap_or(current);
    let next = value_for(year + 1).unwrap_or(current);

    vec![
        (ymd(year, 1, 1), midpoint(prev, current)),
        (ymd(year, 7, 2), current),
        (ymd(year + 1, 1, 1), midpoint(current, next)),
    ]
}

fn midpoint(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_default()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
}
