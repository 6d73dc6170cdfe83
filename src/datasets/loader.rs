use crate::datasets::{ensure_data_home, Fetcher, HttpFetcher, Variant};
use crate::error::{PaleoError, Result};
use crate::readers::ProxyDataset;
use crate::utils::settings::Settings;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolves, downloads and opens the proxy network files.
///
/// Nothing is cached in memory: every call re-resolves the data home and
/// re-opens the file. A download lands in a temporary file next to its final
/// location and is renamed into place only once complete.
pub struct DatasetLoader<F: Fetcher = HttpFetcher> {
    fetcher: F,
    settings: Settings,
}

impl DatasetLoader<HttpFetcher> {
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let fetcher = HttpFetcher::new(&settings)?;
        Ok(Self::new(fetcher, settings))
    }
}

impl<F: Fetcher> DatasetLoader<F> {
    pub fn new(fetcher: F, settings: Settings) -> Self {
        Self { fetcher, settings }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Path the variant is cached at. Creates the data home if needed.
    pub fn cached_path(&self, variant: Variant, data_home: Option<&Path>) -> Result<PathBuf> {
        let data_home = ensure_data_home(data_home)?;
        Ok(data_home.join(variant.filename()))
    }

    /// Make sure the variant is present locally, downloading it if allowed.
    pub async fn ensure_cached(
        &self,
        variant: Variant,
        data_home: Option<&Path>,
        download_if_missing: bool,
    ) -> Result<PathBuf> {
        let archive_path = self.cached_path(variant, data_home)?;

        if archive_path.exists() {
            debug!(path = %archive_path.display(), "Using cached data");
            return Ok(archive_path);
        }

        if !download_if_missing {
            return Err(PaleoError::DataUnavailable { path: archive_path });
        }

        let cache_dir = archive_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let url = self.settings.dataset_url(variant.filename());
        info!(
            url = %url,
            data_home = %cache_dir.display(),
            "Downloading data from {} to {}",
            url,
            cache_dir.display()
        );

        let partial = tempfile::Builder::new()
            .prefix(&format!(".{}.", variant.filename()))
            .suffix(".partial")
            .tempfile_in(&cache_dir)?;

        let bytes = self.fetcher.fetch(&url, partial.path()).await?;
        if bytes == 0 {
            return Err(PaleoError::fetch(&url, "server returned an empty file"));
        }

        partial.persist(&archive_path).map_err(|e| e.error)?;
        info!(path = %archive_path.display(), bytes, "Cached data set");

        Ok(archive_path)
    }

    /// Return an open handle on the requested variant.
    pub async fn load(
        &self,
        variant: Variant,
        data_home: Option<&Path>,
        download_if_missing: bool,
    ) -> Result<ProxyDataset> {
        let path = self
            .ensure_cached(variant, data_home, download_if_missing)
            .await?;
        ProxyDataset::open(&path)
    }
}

/// Data for the 2008 PNAS paper on proxy-based climate reconstructions
/// (Mann et al., "Proxy-based reconstructions of hemispheric and global
/// surface temperature variations over the past two millennia").
///
/// The data is held in two NetCDF files of roughly 100 MB each, one for the
/// infilled and one for the original proxy records, extracted from the
/// Paleoclimatology Reconstructions Network v1.0.1. By default they are cached
/// under `~/paleoclimate_scipy/`.
pub async fn mann2008a(
    variant: Variant,
    data_home: Option<&Path>,
    download_if_missing: bool,
) -> Result<ProxyDataset> {
    DatasetLoader::from_settings(Settings::default())?
        .load(variant, data_home, download_if_missing)
        .await
}
