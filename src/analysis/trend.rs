//! Smoothed solar-cycle trend over the yearly sunspot totals.

use crate::types::sunspot::{SunspotTotal, SunspotTrendPoint};

/// One solar cycle, in years. The default smoothing window.
pub const SOLAR_CYCLE_YEARS: usize = 11;

/// Centered moving average over the yearly totals.
///
/// The window is clamped at the series edges, so early and late years average
/// over fewer neighbors instead of being dropped. Output order matches input
/// order, one point per input year. Purely a visual aid; nothing downstream
/// makes decisions on it.
pub fn sunspot_trend(totals: &[SunspotTotal], window: usize) -> Vec<SunspotTrendPoint> {
    let half = window.max(1) / 2;
    totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(totals.len() - 1);
            let neighbors = &totals[lo..=hi];
            let smoothed =
                neighbors.iter().map(|s| s.total).sum::<f64>() / neighbors.len() as f64;
            SunspotTrendPoint {
                year: t.year,
                total: t.total,
                smoothed,
            }
        })
        .collect()
}
