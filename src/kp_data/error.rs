use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KpDataError {
    #[error("Failed to read cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode cached Kp data from '{0}'")]
    CacheDecode(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode Kp data for cache file '{0}'")]
    CacheEncode(PathBuf, #[source] serde_json::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse Kp service response")]
    JsonParse(#[from] serde_json::Error),

    #[error("No Kp data available for year {year}")]
    NoDataForYear {
        year: i32,
        #[source]
        last_error: Option<Box<KpDataError>>,
    },
}
