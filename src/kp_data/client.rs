//! HTTP client for the GFZ Potsdam Kp-index web service, plus the narrow
//! parsing seam that turns a raw service response into validated readings.

use crate::kp_data::error::KpDataError;
use crate::types::reading::KpReading;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

const GFZ_BASE_URL: &str = "https://kp.gfz-potsdam.de/app/json/";
const GFZ_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Raw shape of the GFZ JSON response: parallel arrays of timestamps, index
/// values and status flags. `status` is carried by the service when definitive
/// values are requested; nothing downstream consumes it.
#[derive(Debug, Deserialize)]
struct GfzResponse {
    datetime: Vec<String>,
    #[serde(rename = "Kp")]
    kp: Vec<Option<f64>>,
    #[serde(default)]
    #[allow(dead_code)]
    status: Option<Vec<String>>,
}

pub struct GfzClient {
    http: Client,
    base_url: String,
}

impl GfzClient {
    pub fn new() -> Self {
        Self::with_base_url(GFZ_BASE_URL)
    }

    /// Base-URL override so callers can point the client at a fixture server
    /// or an unroutable endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Downloads the raw response bytes for one calendar year of Kp values.
    pub async fn fetch_year(&self, year: i32) -> Result<Vec<u8>, KpDataError> {
        let url = format!(
            "{}?start={}-01-01T00:00:00Z&end={}-12-31T23:59:59Z&index=Kp&status=def",
            self.base_url, year, year
        );
        info!("Fetching Kp data from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| KpDataError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    KpDataError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    KpDataError::NetworkRequest(url, e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| KpDataError::NetworkRequest(url.clone(), e))?;
        info!("Downloaded {} bytes of Kp data for {}", bytes.len(), year);
        Ok(bytes.to_vec())
    }
}

impl Default for GfzClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a raw GFZ response into time-ordered readings.
///
/// Partial responses are accepted best-effort: the `datetime` and `Kp` arrays
/// are zipped to the shorter length, null values and unparseable timestamps
/// are dropped. Only a payload that does not decode as the expected JSON shape
/// is an error.
pub fn parse_kp_response(bytes: &[u8]) -> Result<Vec<KpReading>, KpDataError> {
    let response: GfzResponse = serde_json::from_slice(bytes)?;

    let expected = response.datetime.len().min(response.kp.len());
    let mut readings: Vec<KpReading> = response
        .datetime
        .iter()
        .zip(response.kp.iter())
        .filter_map(|(raw, kp)| {
            let kp = (*kp)?;
            let time = parse_gfz_time(raw)?;
            Some(KpReading { time, kp })
        })
        .collect();
    if readings.len() < expected {
        warn!(
            "Dropped {} incomplete entries from Kp response",
            expected - readings.len()
        );
    }
    readings.sort_by_key(|r| r.time);
    Ok(readings)
}

fn parse_gfz_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, GFZ_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
