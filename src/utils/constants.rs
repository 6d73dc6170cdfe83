/// Remote archive layout
pub const MANN2008A_URL: &str =
    "https://www1.ncdc.noaa.gov/pub/data/paleo/reconstructions/pcn/proxy/mann2008/";

/// File names
pub const MANN2008_INFILLED_FILE: &str = "mann2008infilled.nc";
pub const MANN2008_ORIGINAL_FILE: &str = "mann2008original.nc";
pub const DEFAULT_MAP_FILE: &str = "map_of_data_types.html";
pub const SETTINGS_FILE: &str = "paleoclimate";

/// Cache directory resolution
pub const DATA_HOME_ENV: &str = "PALEOCLIMATE_SCIPY_DATA";
pub const DEFAULT_DATA_HOME: &str = "~/paleoclimate_scipy";
pub const SETTINGS_ENV_PREFIX: &str = "PALEOCLIMATE";

/// Variable names in the proxy network files
pub const VAR_LATITUDE: &str = "lat";
pub const VAR_LONGITUDE: &str = "lon";
pub const VAR_DATA_TYPE: &str = "data_type";

/// Global attribute names
pub const ATTR_TITLE: &str = "title";
pub const ATTR_HISTORY: &str = "history";

/// Proxy category code bounds
pub const MIN_CATEGORY_CODE: i32 = 2000;
pub const MAX_CATEGORY_CODE: i32 = 9999;
pub const CATEGORY_BAND_WIDTH: i32 = 1000;
pub const CATEGORY_BAND_OFFSET: i32 = 2;

/// Marker defaults
pub const DEFAULT_MARKER_RADIUS: u32 = 4;

/// Download defaults
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_RETRY_DELAY_SECS: u64 = 2;
pub const DEFAULT_MAX_RETRY_DELAY_SECS: u64 = 60;

/// Map defaults
pub const DEFAULT_MAP_ZOOM: u8 = 2;
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
