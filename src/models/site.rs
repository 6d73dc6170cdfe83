use serde::{Deserialize, Serialize};
use validator::Validate;

/// One proxy measurement site from the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProxySite {
    pub index: usize,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    // Some archives store longitudes as 0..360 east.
    #[validate(range(min = -180.0, max = 360.0))]
    pub longitude: f64,

    pub code: i32,
}

impl ProxySite {
    pub fn new(index: usize, latitude: f64, longitude: f64, code: i32) -> Self {
        Self {
            index,
            latitude,
            longitude,
            code,
        }
    }
}
