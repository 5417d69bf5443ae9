//! Flat-file cache of Kp readings, one JSON file per year.
//!
//! The on-disk format is `{"times": [...], "kp_index": [...]}` with
//! `%Y-%m-%dT%H:%M:%SZ` timestamps, the format earlier tooling for this data
//! wrote, so existing cache directories stay readable.

use crate::kp_data::error::KpDataError;
use crate::types::reading::KpReading;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Serialize, Deserialize)]
struct CachedYear {
    times: Vec<String>,
    kp_index: Vec<f64>,
}

/// Explicit cache-store handle over a directory of per-year data files.
pub struct KpCacheStore {
    cache_dir: PathBuf,
}

impl KpCacheStore {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    pub fn year_file(&self, year: i32) -> PathBuf {
        self.cache_dir.join(format!("kp_index_{}.json", year))
    }

    /// Returns the cached readings for `year`, or `None` when no file exists.
    ///
    /// Entries whose timestamp does not parse are dropped rather than failing
    /// the whole file.
    pub async fn read(&self, year: i32) -> Result<Option<Vec<KpReading>>, KpDataError> {
        let path = self.year_file(year);
        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(KpDataError::CacheRead(path, e)),
        };
        let cached: CachedYear =
            serde_json::from_str(&json).map_err(|e| KpDataError::CacheDecode(path.clone(), e))?;
        let readings = cached
            .times
            .iter()
            .zip(cached.kp_index.iter())
            .filter_map(|(raw, &kp)| parse_cache_time(raw).map(|time| KpReading { time, kp }))
            .collect();
        Ok(Some(readings))
    }

    /// Persists `readings` for `year`, replacing any previous file.
    pub async fn write(&self, year: i32, readings: &[KpReading]) -> Result<(), KpDataError> {
        let path = self.year_file(year);
        let cached = CachedYear {
            times: readings
                .iter()
                .map(|r| r.time.format(TIME_FORMAT).to_string())
                .collect(),
            kp_index: readings.iter().map(|r| r.kp).collect(),
        };
        let json =
            serde_json::to_string(&cached).map_err(|e| KpDataError::CacheEncode(path.clone(), e))?;
        fs::write(&path, json)
            .await
            .map_err(|e| KpDataError::CacheWrite(path.clone(), e))?;
        info!("Cached {} Kp readings for {} to {:?}", readings.len(), year, path);
        Ok(())
    }
}

fn parse_cache_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_readings(year: i32) -> Vec<KpReading> {
        (0..4)
            .map(|i| KpReading {
                time: Utc.with_ymd_and_hms(year, 1, 1, i * 3, 0, 0).unwrap(),
                kp: 1.0 + i as f64,
            })
            .collect()
    }

    #[tokio::test]
    async fn round_trip_preserves_readings() {
        let dir = tempfile::tempdir().unwrap();
        let store = KpCacheStore::new(dir.path());
        let readings = sample_readings(2020);

        store.write(2020, &readings).await.unwrap();
        let loaded = store.read(2020).await.unwrap().unwrap();

        assert_eq!(loaded, readings);
    }

    #[tokio::test]
    async fn missing_year_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = KpCacheStore::new(dir.path());

        assert!(store.read(1999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = KpCacheStore::new(dir.path());

        store.write(2020, &sample_readings(2020)).await.unwrap();
        let replacement = vec![KpReading {
            time: Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap(),
            kp: 7.33,
        }];
        store.write(2020, &replacement).await.unwrap();

        let loaded = store.read(2020).await.unwrap().unwrap();
        assert_eq!(loaded, replacement);
    }

    #[tokio::test]
    async fn writes_one_file_per_year() {
        let dir = tempfile::tempdir().unwrap();
        let store = KpCacheStore::new(dir.path());

        store.write(2019, &sample_readings(2019)).await.unwrap();
        store.write(2020, &sample_readings(2020)).await.unwrap();

        assert!(store.year_file(2019).exists());
        assert!(store.year_file(2020).exists());
        assert_eq!(
            store.year_file(2020).file_name().unwrap(),
            "kp_index_2020.json"
        );
    }

    #[tokio::test]
    async fn garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = KpCacheStore::new(dir.path());
        tokio::fs::write(store.year_file(2020), b"not json")
            .await
            .unwrap();

        let err = store.read(2020).await.unwrap_err();
        assert!(matches!(err, KpDataError::CacheDecode(_, _)));
    }

    #[tokio::test]
    async fn unparseable_cached_timestamps_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = KpCacheStore::new(dir.path());
        let json = r#"{"times": ["2020-01-01T00:00:00Z", "garbage"], "kp_index": [2.0, 3.0]}"#;
        tokio::fs::write(store.year_file(2020), json).await.unwrap();

        let loaded = store.read(2020).await.unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].kp, 2.0);
    }
}
