//! Core types for planetary Kp-index readings and their storm classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// First year for which the GFZ service provides Kp values.
pub const FIRST_KP_YEAR: i32 = 1932;

/// Kp cutoff above which a reading counts as a geomagnetic storm event.
///
/// The comparison is strict: a reading exactly at the cutoff is quiet.
pub const KP_STORM_THRESHOLD: f64 = 5.0;

/// A single Kp-index observation.
///
/// Kp is reported on a 0..=9 scale in three-hour intervals; `time` is the UTC
/// start of the interval. Readings are immutable once fetched or cached and
/// are collected into a time-ordered sequence per year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpReading {
    pub time: DateTime<Utc>,
    pub kp: f64,
}

/// Storm classification of a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormClass {
    Quiet,
    Storm,
}

/// A reading together with its threshold classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedReading {
    pub time: DateTime<Utc>,
    pub kp: f64,
    pub class: StormClass,
}

impl ClassifiedReading {
    pub fn is_storm(&self) -> bool {
        self.class == StormClass::Storm
    }
}
