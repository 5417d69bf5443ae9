//! Threshold classification of Kp readings into storm and quiet events.

use crate::types::reading::{ClassifiedReading, KpReading, StormClass, KP_STORM_THRESHOLD};

/// Classifies readings against [`KP_STORM_THRESHOLD`], preserving order.
///
/// The comparison is strict: a reading exactly at the threshold is quiet.
pub fn classify(readings: &[KpReading]) -> Vec<ClassifiedReading> {
    readings
        .iter()
        .map(|r| ClassifiedReading {
            time: r.time,
            kp: r.kp,
            class: if r.kp > KP_STORM_THRESHOLD {
                StormClass::Storm
            } else {
                StormClass::Quiet
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(hour: u32, kp: f64) -> KpReading {
        KpReading {
            time: Utc.with_ymd_and_hms(2020, 3, 1, hour, 0, 0).unwrap(),
            kp,
        }
    }

    #[test]
    fn values_above_the_threshold_are_storms() {
        let classified = classify(&[reading(0, 5.333), reading(3, 9.0)]);

        assert!(classified.iter().all(ClassifiedReading::is_storm));
    }

    #[test]
    fn the_threshold_itself_is_quiet() {
        let classified = classify(&[reading(0, 5.0)]);

        assert_eq!(classified[0].class, StormClass::Quiet);
    }

    #[test]
    fn values_below_the_threshold_are_quiet() {
        let classified = classify(&[reading(0, 0.0), reading(3, 4.667)]);

        assert!(classified.iter().all(|c| !c.is_storm()));
    }

    #[test]
    fn classification_preserves_order_and_values() {
        let readings = vec![reading(0, 2.0), reading(3, 6.0), reading(6, 1.0)];

        let classified = classify(&readings);

        assert_eq!(classified.len(), readings.len());
        for (c, r) in classified.iter().zip(readings.iter()) {
            assert_eq!(c.time, r.time);
            assert_eq!(c.kp, r.kp);
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let readings = vec![reading(0, 2.0), reading(3, 6.0)];

        assert_eq!(classify(&readings), classify(&readings));
    }
}
