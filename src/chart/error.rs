use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Chart rendering failed for '{path}': {message}")]
    Render { path: PathBuf, message: String },
}

impl ChartError {
    // The drawing backend's error type is generic over the backend; flatten it
    // to its message so callers get one concrete error enum.
    pub(crate) fn render<E: Display>(path: &Path, e: E) -> Self {
        ChartError::Render {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}
