use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaleoError>;

#[derive(Error, Debug)]
pub enum PaleoError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data not found at {} and downloading is disabled", path.display())]
    DataUnavailable { path: PathBuf },

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NetCDF error: {0}")]
    Dataset(#[from] netcdf::Error),

    #[error("Unrecognized proxy category code {code} at site {site}")]
    UnrecognizedCategory { code: i32, site: usize },

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PaleoError {
    pub fn fetch(url: &str, message: impl Into<String>) -> Self {
        PaleoError::Fetch {
            url: url.to_string(),
            message: message.into(),
        }
    }
}
