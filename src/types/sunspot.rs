//! Types for the yearly sunspot series and its smoothed solar-cycle trend.

use serde::{Deserialize, Serialize};

/// Yearly mean total sunspot number, as published by SILSO.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunspotTotal {
    pub year: i32,
    pub total: f64,
    /// Whether SILSO marks the value as definitive. Recent years stay
    /// provisional until the series is finalized.
    pub definitive: bool,
}

/// One point of the smoothed solar-cycle trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunspotTrendPoint {
    pub year: i32,
    /// Raw yearly total.
    pub total: f64,
    /// Centered moving average of the totals around `year`.
    pub smoothed: f64,
}
