//! Data sets from the Paleoclimatology Reconstructions Network.

pub mod fetch;
pub mod home;
pub mod loader;

pub use fetch::{Fetcher, HttpFetcher};
pub use home::{ensure_data_home, get_data_home};
pub use loader::{mann2008a, DatasetLoader};

use crate::utils::constants::{MANN2008_INFILLED_FILE, MANN2008_ORIGINAL_FILE};
use serde::{Deserialize, Serialize};

/// Which of the two Mann et al. (2008) proxy data products to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    Infilled,
    Raw,
}

impl Variant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "infilled" => Some(Variant::Infilled),
            "raw" | "original" => Some(Variant::Raw),
            _ => None,
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            Variant::Infilled => MANN2008_INFILLED_FILE,
            Variant::Raw => MANN2008_ORIGINAL_FILE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::Infilled => "Infilled proxy data",
            Variant::Raw => "Original (raw) proxy data",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Variant::from_name(s)
            .ok_or_else(|| format!("unknown variant '{}', expected 'infilled' or 'raw'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_name() {
        assert_eq!(Variant::from_name("infilled"), Some(Variant::Infilled));
        assert_eq!(Variant::from_name("RAW"), Some(Variant::Raw));
        assert_eq!(Variant::from_name("original"), Some(Variant::Raw));
        assert_eq!(Variant::from_name("smoothed"), None);
    }

    #[test]
    fn test_variant_filename() {
        assert_eq!(Variant::Infilled.filename(), "mann2008infilled.nc");
        assert_eq!(Variant::Raw.filename(), "mann2008original.nc");
        assert_eq!(Variant::default(), Variant::Infilled);
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("raw".parse::<Variant>(), Ok(Variant::Raw));
        assert!("other".parse::<Variant>().is_err());
    }
}
