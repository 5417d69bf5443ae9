use crate::chart::error::ChartError;
use crate::kp_data::error::KpDataError;
use crate::sunspots::error::SunspotError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KpIndexError {
    #[error(transparent)]
    KpData(#[from] KpDataError),

    #[error(transparent)]
    Sunspot(#[from] SunspotError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("Year {year} is outside the supported range {min}..={max}")]
    InvalidYear { year: i32, min: i32, max: i32 },

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
