use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SunspotError {
    #[error("Failed to read sunspot cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write sunspot cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse sunspot CSV data")]
    CsvRead(#[from] csv::Error),

    #[error("No cached sunspot data available while offline")]
    NoCachedData,
}
