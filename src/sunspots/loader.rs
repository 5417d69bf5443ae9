//! Loads the SILSO yearly mean total sunspot number series, caching the raw
//! CSV locally so the multi-decade history is fetched at most once.

use crate::sunspots::error::SunspotError;
use crate::types::reading::FIRST_KP_YEAR;
use crate::types::sunspot::SunspotTotal;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;

const SILSO_YEARLY_URL: &str = "https://www.sidc.be/SILSO/DATA/SN_y_tot_V2.0.csv";
const CACHE_FILE_NAME: &str = "sunspot_totals.csv";

pub struct SunspotLoader {
    cache_dir: PathBuf,
    http: Client,
    url: String,
}

impl SunspotLoader {
    pub fn new(cache_dir: &Path) -> Self {
        Self::with_url(cache_dir, SILSO_YEARLY_URL)
    }

    /// URL override so callers can point the loader at a fixture server or an
    /// unroutable endpoint.
    pub fn with_url(cache_dir: &Path, url: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            http: Client::new(),
            url: url.into(),
        }
    }

    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE_NAME)
    }

    /// Loads the full yearly series, fetching and caching the raw CSV on a
    /// miss. Yearly totals for a year are published only after the year
    /// closes, so an existing cache file is reused as-is.
    pub async fn load(&self, offline: bool) -> Result<Vec<SunspotTotal>, SunspotError> {
        let path = self.cache_file();
        let bytes = match fs::read(&path).await {
            Ok(bytes) => {
                info!("Cache hit for sunspot totals at {:?}", path);
                bytes
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if offline {
                    return Err(SunspotError::NoCachedData);
                }
                warn!("Cache miss for sunspot totals. Downloading from {}", self.url);
                let bytes = self.download().await?;
                fs::write(&path, &bytes)
                    .await
                    .map_err(|e| SunspotError::CacheWrite(path.clone(), e))?;
                info!("Cached sunspot totals to {:?}", path);
                bytes
            }
            Err(e) => return Err(SunspotError::CacheRead(path, e)),
        };

        let totals = parse_sunspot_csv(&bytes)?;
        let definitive = totals.iter().filter(|t| t.definitive).count();
        info!(
            "Loaded {} yearly sunspot totals ({} definitive)",
            totals.len(),
            definitive
        );
        Ok(totals)
    }

    async fn download(&self) -> Result<Vec<u8>, SunspotError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SunspotError::NetworkRequest(self.url.clone(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    SunspotError::HttpStatus {
                        url: self.url.clone(),
                        status,
                        source: e,
                    }
                } else {
                    SunspotError::NetworkRequest(self.url.clone(), e)
                });
            }
        };
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SunspotError::NetworkRequest(self.url.clone(), e))?;
        Ok(bytes.to_vec())
    }
}

/// Parses the raw SILSO yearly CSV (semicolon separated, no header, numeric
/// fields padded with spaces) into per-year totals.
///
/// Years before the supported Kp range are dropped, as are rows carrying the
/// negative missing-value sentinel. Rows that do not parse are skipped rather
/// than failing the series.
pub fn parse_sunspot_csv(bytes: &[u8]) -> Result<Vec<SunspotTotal>, SunspotError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let mut totals = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(row) = parse_row(&record) else {
            continue;
        };
        if row.year >= FIRST_KP_YEAR && row.total >= 0.0 {
            totals.push(row);
        }
    }
    Ok(totals)
}

// SILSO stamps yearly means at mid-year (1932.5), flags definitive values in
// the last column and uses -1 for years without a computed mean.
fn parse_row(record: &StringRecord) -> Option<SunspotTotal> {
    let year: f64 = record.get(0)?.parse().ok()?;
    let total: f64 = record.get(1)?.parse().ok()?;
    let definitive = record
        .get(4)
        .and_then(|v| v.parse::<i32>().ok())
        .unwrap_or(0)
        == 1;
    Some(SunspotTotal {
        year: year.floor() as i32,
        total,
        definitive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
1930.5;  35.7;  3.2; 8989;1
1931.5;  21.2;  2.1; 9011;1
1932.5;  11.8;  1.4; 9529;1
1933.5;   5.7;  0.9; 9401;1
2023.5; 125.5;  7.5;14000;0
2024.5;  -1.0; -1.0;   -1;0
";

    #[test]
    fn parses_and_filters_the_series() {
        let totals = parse_sunspot_csv(FIXTURE.as_bytes()).unwrap();

        // Pre-1932 rows and the -1 sentinel row are gone.
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].year, 1932);
        assert_eq!(totals[0].total, 11.8);
        assert!(totals[0].definitive);
        assert_eq!(totals[2].year, 2023);
        assert!(!totals[2].definitive);
    }

    #[test]
    fn skips_rows_that_do_not_parse() {
        let ragged = "not;a;row\n1932.5; 11.8; 1.4; 9529;1\n";

        let totals = parse_sunspot_csv(ragged.as_bytes()).unwrap();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].year, 1932);
    }

    #[tokio::test]
    async fn offline_miss_is_a_no_cache_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = SunspotLoader::with_url(dir.path(), "http://127.0.0.1:1/");

        let err = loader.load(true).await.unwrap_err();

        assert!(matches!(err, SunspotError::NoCachedData));
    }

    #[tokio::test]
    async fn cached_file_is_served_without_touching_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let loader = SunspotLoader::with_url(dir.path(), "http://127.0.0.1:1/");
        tokio::fs::write(loader.cache_file(), FIXTURE).await.unwrap();

        let totals = loader.load(false).await.unwrap();

        assert_eq!(totals.len(), 3);
    }

    #[tokio::test]
    async fn unreachable_remote_without_cache_surfaces_the_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = SunspotLoader::with_url(dir.path(), "http://127.0.0.1:1/");

        let err = loader.load(false).await.unwrap_err();

        assert!(matches!(err, SunspotError::NetworkRequest(_, _)));
        assert!(!loader.cache_file().exists());
    }
}
