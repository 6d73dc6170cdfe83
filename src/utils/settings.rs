use crate::error::Result;
use crate::utils::constants::*;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Runtime settings layered from defaults, an optional `paleoclimate.toml`
/// and `PALEOCLIMATE_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    #[validate(url)]
    pub base_url: String,

    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,

    #[validate(range(min = 1))]
    pub connect_timeout_secs: u64,

    #[validate(range(max = 20))]
    pub max_retries: u32,

    #[validate(range(max = 3600))]
    pub initial_retry_delay_secs: u64,

    #[validate(range(min = 1))]
    pub max_retry_delay_secs: u64,

    #[validate(range(max = 18))]
    pub map_zoom: u8,

    #[validate(length(min = 1))]
    pub tile_url: String,

    pub tile_attribution: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: MANN2008A_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_retry_delay_secs: DEFAULT_INITIAL_RETRY_DELAY_SECS,
            max_retry_delay_secs: DEFAULT_MAX_RETRY_DELAY_SECS,
            map_zoom: DEFAULT_MAP_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
        }
    }
}

impl Settings {
    /// Load settings. An explicit file must exist; the default
    /// `paleoclimate.toml` in the working directory is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(SETTINGS_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(SETTINGS_ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn initial_retry_delay(&self) -> Duration {
        Duration::from_secs(self.initial_retry_delay_secs)
    }

    pub fn max_retry_delay(&self) -> Duration {
        Duration::from_secs(self.max_retry_delay_secs)
    }

    /// Join the base URL with a remote file name.
    pub fn dataset_url(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), filename)
    }
}
