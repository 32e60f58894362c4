/// Runtime configuration read from environment variables
///
/// | Variable              | Default                     |
/// |-----------------------|-----------------------------|
/// | `FUNDSCOPE_DATA`      | `data/dashboard_data.json`  |
/// | `FUNDSCOPE_TABLE_ROWS`| `30`                        |
/// | `FUNDSCOPE_OUTPUT`    | `html` (or `json`)          |

use crate::error::{DashboardError, Result};
use crate::present::DEFAULT_TABLE_ROWS;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_VAR: &str = "FUNDSCOPE_DATA";
pub const TABLE_ROWS_VAR: &str = "FUNDSCOPE_TABLE_ROWS";
pub const OUTPUT_VAR: &str = "FUNDSCOPE_OUTPUT";

pub const DEFAULT_DATA_PATH: &str = "data/dashboard_data.json";

/// How rendered frames are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(DashboardError::Config(format!(
                "{} must be html or json, got {:?}",
                OUTPUT_VAR, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub table_rows: usize,
    pub output: OutputFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            table_rows: DEFAULT_TABLE_ROWS,
            output: OutputFormat::default(),
        }
    }
}

impl DashboardConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`; unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DashboardConfig::default();

        if let Some(path) = lookup(DATA_VAR).filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(path);
        }

        if let Some(rows) = lookup(TABLE_ROWS_VAR) {
            config.table_rows = rows.trim().parse().map_err(|_| {
                DashboardError::Config(format!(
                    "{} must be a non-negative integer, got {:?}",
                    TABLE_ROWS_VAR, rows
                ))
            })?;
        }

        if let Some(output) = lookup(OUTPUT_VAR) {
            config.output = output.parse()?;
        }

        Ok(config)
    }
}
