mod analysis;
mod chart;
mod error;
mod kp_data;
mod kpindex;
mod sunspots;
mod types;
mod utils;

pub use error::KpIndexError;
pub use kpindex::*;

pub use analysis::storm::classify;
pub use analysis::trend::{sunspot_trend, SOLAR_CYCLE_YEARS};

pub use chart::error::ChartError;
pub use chart::render::{chart_file_name, render_year};

pub use kp_data::client::{parse_kp_response, GfzClient};
pub use kp_data::error::KpDataError;
pub use kp_data::loader::KpDataLoader;
pub use kp_data::store::KpCacheStore;

pub use sunspots::error::SunspotError;
pub use sunspots::loader::{parse_sunspot_csv, SunspotLoader};

pub use types::reading::{
    ClassifiedReading, KpReading, StormClass, FIRST_KP_YEAR, KP_STORM_THRESHOLD,
};
pub use types::sunspot::{SunspotTotal, SunspotTrendPoint};
