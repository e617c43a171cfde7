use std::path::PathBuf;

use nf_area::AreaError;
use nf_controls::ControlError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Canvas error: {0}")]
    Area(#[from] AreaError),

    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    #[error("Failed to read config file: {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}
