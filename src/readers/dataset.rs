use crate::error::{PaleoError, Result};
use crate::models::ProxySite;
use crate::utils::constants::{
    ATTR_HISTORY, ATTR_TITLE, VAR_DATA_TYPE, VAR_LATITUDE, VAR_LONGITUDE,
};
use netcdf::AttributeValue;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionInfo {
    pub name: String,
    pub len: usize,
    pub unlimited: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub path: PathBuf,
    pub title: Option<String>,
    pub history: Option<String>,
    pub dimensions: Vec<DimensionInfo>,
    pub variables: Vec<String>,
}

impl DatasetSummary {
    pub fn display_summary(&self) -> String {
        let mut summary = format!("Dataset: {}\n", self.path.display());

        if let Some(title) = &self.title {
            summary.push_str(&format!("  Title: {}\n", title));
        }
        if let Some(history) = &self.history {
            summary.push_str(&format!("  History: {}\n", history));
        }

        summary.push_str("  Dimensions:\n");
        for dim in &self.dimensions {
            if dim.unlimited {
                summary.push_str(&format!("    {}: unlimited ({})\n", dim.name, dim.len));
            } else {
                summary.push_str(&format!("    {}: {}\n", dim.name, dim.len));
            }
        }

        summary.push_str(&format!("  Variables: {}\n", self.variables.join(", ")));
        summary
    }
}

/// Read-only handle over a cached proxy network NetCDF file.
///
/// The underlying file is closed when the handle is dropped.
pub struct ProxyDataset {
    path: PathBuf,
    file: netcdf::File,
}

impl ProxyDataset {
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Opening dataset");
        let file = netcdf::open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn title(&self) -> Option<String> {
        self.string_attribute(ATTR_TITLE)
    }

    pub fn history(&self) -> Option<String> {
        self.string_attribute(ATTR_HISTORY)
    }

    pub fn dimensions(&self) -> Vec<DimensionInfo> {
        self.file
            .dimensions()
            .map(|dim| DimensionInfo {
                name: dim.name(),
                len: dim.len(),
                unlimited: dim.is_unlimited(),
            })
            .collect()
    }

    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.file.dimension(name).map(|dim| dim.len())
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|var| var.name()).collect()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    /// Read a whole numeric variable, converted to `f64`.
    pub fn read_f64(&self, name: &str) -> Result<Vec<f64>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| PaleoError::MissingData(format!("variable '{}'", name)))?;

        read_numeric(&var)
    }

    /// Read latitude, longitude and data type code for every site.
    ///
    /// Codes are truncated toward zero, so a float-typed `data_type`
    /// variable behaves like an integer one.
    pub fn read_sites(&self) -> Result<Vec<ProxySite>> {
        let lat = self.read_f64(VAR_LATITUDE)?;
        let lon = self.read_f64(VAR_LONGITUDE)?;
        let data_type = self.read_f64(VAR_DATA_TYPE)?;

        if lat.len() != lon.len() || lat.len() != data_type.len() {
            return Err(PaleoError::InvalidFormat(format!(
                "site arrays differ in length: {}={}, {}={}, {}={}",
                VAR_LATITUDE,
                lat.len(),
                VAR_LONGITUDE,
                lon.len(),
                VAR_DATA_TYPE,
                data_type.len()
            )));
        }

        let mut sites = Vec::with_capacity(lat.len());
        for (index, ((latitude, longitude), code)) in
            lat.into_iter().zip(lon).zip(data_type).enumerate()
        {
            let site = ProxySite::new(index, latitude, longitude, code as i32);
            site.validate()?;
            sites.push(site);
        }

        debug!(sites = sites.len(), "Read proxy sites");
        Ok(sites)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            path: self.path.clone(),
            title: self.title(),
            history: self.history(),
            dimensions: self.dimensions(),
            variables: self.variable_names(),
        }
    }

    fn string_attribute(&self, name: &str) -> Option<String> {
        match self.file.attribute(name)?.value().ok()? {
            AttributeValue::Str(value) => Some(value),
            AttributeValue::Strs(values) => Some(values.join("\n")),
            _ => None,
        }
    }
}

// Proxy network files store coordinates and codes as float, int or short.
fn read_numeric(var: &netcdf::Variable) -> Result<Vec<f64>> {
    if let Ok(values) = var.get_values::<f64, _>(..) {
        return Ok(values);
    }
    if let Ok(values) = var.get_values::<f32, _>(..) {
        return Ok(values.into_iter().map(f64::from).collect());
    }
    if let Ok(values) = var.get_values::<i32, _>(..) {
        return Ok(values.into_iter().map(f64::from).collect());
    }
    if let Ok(values) = var.get_values::<i16, _>(..) {
        return Ok(values.into_iter().map(f64::from).collect());
    }
    Ok(var
        .get_values::<i64, _>(..)?
        .into_iter()
        .map(|v| v as f64)
        .collect())
}

impl std::fmt::Debug for ProxyDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyDataset")
            .field("path", &self.path)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_read_sites() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("network.nc");
        fixture::write_default_network(&path);

        let dataset = ProxyDataset::open(&path)?;
        let sites = dataset.read_sites()?;

        assert_eq!(sites.len(), 3);
        assert_eq!(sites[0].code, 8000);
        assert_eq!(sites[1].index, 1);
        assert!((sites[1].latitude - -12.5).abs() < 1e-6);
        assert!((sites[2].longitude - -111.5).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_codes_are_truncated() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("network.nc");
        fixture::write_network(&path, &[0.0, 1.0], &[0.0, 1.0], &[3000.9, 8001.2]);

        let sites = ProxyDataset::open(&path)?.read_sites()?;
        assert_eq!(sites[0].code, 3000);
        assert_eq!(sites[1].code, 8001);
        Ok(())
    }

    #[test]
    fn test_mismatched_array_lengths() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("network.nc");
        fixture::write_mismatched_network(&path);

        let dataset = ProxyDataset::open(&path)?;
        match dataset.read_sites() {
            Err(PaleoError::InvalidFormat(message)) => {
                assert!(message.contains("data_type=3"));
                assert!(message.contains("lat=2"));
            }
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_fill_value_coordinate_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("network.nc");
        fixture::write_network(&path, &[10.0, 20.0], &[30.0, 9.96921e36], &[3000.0, 8000.0]);

        let dataset = ProxyDataset::open(&path)?;
        assert!(matches!(
            dataset.read_sites(),
            Err(PaleoError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_metadata() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("network.nc");
        fixture::write_default_network(&path);

        let dataset = ProxyDataset::open(&path)?;
        assert_eq!(dataset.title().as_deref(), Some("Test Proxy Network"));
        assert!(dataset.history().unwrap().starts_with("Data formatted"));
        assert_eq!(dataset.dimension_len("site"), Some(3));

        let mut names = dataset.variable_names();
        names.sort();
        assert_eq!(names, vec!["data_type", "lat", "lon"]);

        let summary = dataset.summary();
        let time = summary
            .dimensions
            .iter()
            .find(|d| d.name == "time")
            .unwrap();
        assert!(time.unlimited);
        assert!(summary.display_summary().contains("site: 3"));
        Ok(())
    }

    #[test]
    fn test_missing_variable() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("network.nc");
        fixture::write_default_network(&path);

        let dataset = ProxyDataset::open(&path)?;
        assert!(!dataset.has_variable("proxy_data"));
        assert!(matches!(
            dataset.read_f64("proxy_data"),
            Err(PaleoError::MissingData(_))
        ));
        Ok(())
    }

    #[test]
    fn test_open_non_netcdf_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("garbage.nc");
        std::fs::write(&path, b"not a netcdf file")?;

        assert!(matches!(
            ProxyDataset::open(&path),
            Err(PaleoError::Dataset(_))
        ));
        Ok(())
    }
}
