/// Dashboard error types
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the dashboard document or reading configuration.
///
/// An empty result set is never an error: every derived output has a defined
/// empty state instead.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The startup document could not be read
    #[error("failed to read dashboard data from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The startup document is not valid dashboard JSON
    #[error("failed to parse dashboard data: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment setting has an unusable value
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    /// True for the failures that abort dashboard initialization.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, DashboardError::Read { .. } | DashboardError::Parse(_))
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
