//! Main entry point for working with Kp-index data.
//!
//! [`KpIndex`] ties the per-year cache store, the GFZ remote client, the
//! sunspot series and the chart renderer into one pipeline: load a year,
//! classify its readings against the storm threshold, and render the yearly
//! chart. It manages a local cache directory so completed years are fetched
//! at most once.
//!
//! Create an instance with [`KpIndex::new()`] for the default cache directory
//! or [`KpIndex::with_cache_folder()`] for a custom location.
//!
//! # Examples
//!
//! ```no_run
//! # use kpindex::{KpIndex, KpIndexError};
//! # async fn run() -> Result<(), KpIndexError> {
//! let client = KpIndex::new().await?;
//! let chart = client.render_year().year(2023).call().await?;
//! println!("chart written to {}", chart.display());
//! # Ok(())
//! # }
//! ```

use crate::analysis::storm;
use crate::analysis::trend;
use crate::chart;
use crate::error::KpIndexError;
use crate::kp_data::loader::KpDataLoader;
use crate::sunspots::loader::SunspotLoader;
use crate::types::reading::{ClassifiedReading, KpReading, FIRST_KP_YEAR};
use crate::types::sunspot::SunspotTrendPoint;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use chrono::{Datelike, Utc};
use log::warn;
use std::path::PathBuf;
use tokio::task;

pub struct KpIndex {
    loader: KpDataLoader,
    sunspots: SunspotLoader,
}

#[bon]
impl KpIndex {
    /// Creates a client using `cache_folder` for all persisted data. The
    /// directory is created if it does not exist.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, KpIndexError> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| KpIndexError::CacheDirCreation(cache_folder.clone(), e))?;
        Ok(Self {
            loader: KpDataLoader::new(&cache_folder),
            sunspots: SunspotLoader::new(&cache_folder),
        })
    }

    /// Creates a client using the default cache directory, resolved through
    /// the `dirs` crate (e.g. `~/.cache/kpindex_cache` on Linux).
    pub async fn new() -> Result<Self, KpIndexError> {
        let cache_folder = get_cache_dir().map_err(KpIndexError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Loads the time-ordered Kp readings for one year.
    ///
    /// The year is validated against the supported range before any cache or
    /// network access happens. This method uses a builder pattern:
    ///
    /// * `.year(i32)`: **Required.** The year to load.
    /// * `.offline(bool)`: Optional. Never contact the remote service;
    ///   defaults to `false`.
    #[builder]
    pub async fn kp_year(
        &self,
        year: i32,
        offline: Option<bool>,
    ) -> Result<Vec<KpReading>, KpIndexError> {
        validate_year(year)?;
        Ok(self.loader.load_year(year, offline.unwrap_or(false)).await?)
    }

    /// Loads one year of readings and classifies each against the storm
    /// threshold. Same builder arguments as [`KpIndex::kp_year`].
    #[builder]
    pub async fn classified_year(
        &self,
        year: i32,
        offline: Option<bool>,
    ) -> Result<Vec<ClassifiedReading>, KpIndexError> {
        let readings = self
            .kp_year()
            .year(year)
            .maybe_offline(offline)
            .call()
            .await?;
        Ok(storm::classify(&readings))
    }

    /// Computes the smoothed solar-cycle trend over the full sunspot series.
    ///
    /// * `.window(usize)`: Optional. Smoothing window in years; defaults to
    ///   one solar cycle ([`trend::SOLAR_CYCLE_YEARS`]).
    /// * `.offline(bool)`: Optional. Never contact the remote service.
    #[builder]
    pub async fn sunspot_trend(
        &self,
        window: Option<usize>,
        offline: Option<bool>,
    ) -> Result<Vec<SunspotTrendPoint>, KpIndexError> {
        let totals = self.sunspots.load(offline.unwrap_or(false)).await?;
        Ok(trend::sunspot_trend(
            &totals,
            window.unwrap_or(trend::SOLAR_CYCLE_YEARS),
        ))
    }

    /// Runs the whole pipeline for one year and returns the path of the
    /// written chart.
    ///
    /// * `.year(i32)`: **Required.** The year to chart.
    /// * `.offline(bool)`: Optional. Never contact the remote services.
    /// * `.output_dir(PathBuf)`: Optional. Defaults to the current directory.
    ///
    /// The trend overlay is decorative: when the sunspot series cannot be
    /// loaded the chart is still rendered, without the overlay.
    #[builder]
    pub async fn render_year(
        &self,
        year: i32,
        offline: Option<bool>,
        output_dir: Option<PathBuf>,
    ) -> Result<PathBuf, KpIndexError> {
        let classified = self
            .classified_year()
            .year(year)
            .maybe_offline(offline)
            .call()
            .await?;
        let trend = match self.sunspot_trend().maybe_offline(offline).call().await {
            Ok(trend) => trend,
            Err(e) => {
                warn!("Sunspot trend unavailable, rendering without overlay: {}", e);
                Vec::new()
            }
        };

        let output_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
        let path = task::spawn_blocking(move || {
            chart::render::render_year(year, &classified, &trend, &output_dir)
        })
        .await??;
        Ok(path)
    }
}

fn validate_year(year: i32) -> Result<(), KpIndexError> {
    let max = Utc::now().year();
    if year < FIRST_KP_YEAR || year > max {
        return Err(KpIndexError::InvalidYear {
            year,
            min: FIRST_KP_YEAR,
            max,
        });
    }
    Ok(())
}
