//! Reproduces figure 1 of Mann et al. (2008), with sites coloured by proxy
//! data type instead of by record length.

use crate::datasets::{DatasetLoader, Fetcher, Variant};
use crate::error::Result;
use crate::models::MarkerStyler;
use crate::processors::{MappingReport, SiteMapper};
use crate::readers::ProxyDataset;
use crate::writers::{MapOptions, MapWriter};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything needed to turn one cached variant into a map file.
#[derive(Debug, Clone)]
pub struct MapRequest {
    pub variant: Variant,
    pub data_home: Option<PathBuf>,
    pub download_if_missing: bool,
    pub output: PathBuf,
    pub options: MapOptions,
}

/// Style every site of an open dataset and write the map to `output`.
///
/// All sites are styled before anything touches the disk, so an
/// unrecognized category leaves no output file behind.
pub fn render_proxy_network(
    dataset: &ProxyDataset,
    output: &Path,
    styler: MarkerStyler,
    options: MapOptions,
) -> Result<MappingReport> {
    let sites = dataset.read_sites()?;
    let (markers, report) = SiteMapper::new(styler).map_sites(&sites)?;

    let mut writer = MapWriter::new(options);
    if let Some(title) = dataset.title() {
        writer = writer.with_title(&title);
    }
    writer.write(&markers, output)?;

    info!(
        sites = report.total_sites,
        categories = report.categories.len(),
        output = %output.display(),
        "Rendered proxy network"
    );
    Ok(report)
}

/// Load the requested variant through `loader` and render it.
pub async fn map_proxy_network<F: Fetcher>(
    loader: &DatasetLoader<F>,
    request: &MapRequest,
    styler: MarkerStyler,
) -> Result<MappingReport> {
    let dataset = loader
        .load(
            request.variant,
            request.data_home.as_deref(),
            request.download_if_missing,
        )
        .await?;

    render_proxy_network(&dataset, &request.output, styler, request.options.clone())
}
