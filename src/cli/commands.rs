use crate::cli::args::{Cli, Commands, DatasetArgs};
use crate::datasets::{DatasetLoader, Fetcher, HttpFetcher};
use crate::models::{MarkerStyler, ProxyTypeTable};
use crate::processors::{map_proxy_network, MapRequest};
use crate::readers::ProxyDataset;
use crate::utils::settings::Settings;
use crate::writers::MapOptions;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, Level};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    debug!(?settings, "Loaded settings");

    let fetcher = HttpFetcher::new(&settings)?.with_silent(cli.quiet);
    let loader = DatasetLoader::new(fetcher, settings.clone());

    match cli.command {
        Commands::Fetch { dataset } => {
            let path = loader
                .ensure_cached(
                    dataset.variant,
                    dataset.data_home.as_deref(),
                    dataset.download_if_missing(),
                )
                .await?;

            let metadata = std::fs::metadata(&path)?;
            let modified: DateTime<Local> = metadata.modified()?.into();

            println!("{}: {}", dataset.variant, path.display());
            println!("  Size: {} bytes", metadata.len());
            println!("  Cached: {}", modified.format("%Y-%m-%d %H:%M:%S"));
        }

        Commands::Info { dataset } => {
            let data = open(&loader, &dataset).await?;
            println!("{}", data.summary().display_summary());
            println!("{}", proxy_type_counts(&data, &ProxyTypeTable::default())?);
        }

        Commands::Map {
            dataset,
            output,
            zoom,
        } => {
            let mut options = MapOptions::from_settings(&settings);
            if let Some(zoom) = zoom {
                options.zoom = zoom;
            }

            let request = MapRequest {
                variant: dataset.variant,
                data_home: dataset.data_home.clone(),
                download_if_missing: dataset.download_if_missing(),
                output: output.clone(),
                options,
            };

            println!("Mapping {}...", dataset.variant);
            let report = map_proxy_network(&loader, &request, MarkerStyler::default())
                .await
                .with_context(|| format!("Failed to map {}", dataset.variant))?;

            println!("\n{}", report.generate_summary());
            println!("Map written to {}", output.display());
        }
    }

    Ok(())
}

async fn open<F: Fetcher>(
    loader: &DatasetLoader<F>,
    dataset: &DatasetArgs,
) -> crate::error::Result<ProxyDataset> {
    loader
        .load(
            dataset.variant,
            dataset.data_home.as_deref(),
            dataset.download_if_missing(),
        )
        .await
}

/// Site counts per data type code, flagging codes the table does not know.
fn proxy_type_counts(dataset: &ProxyDataset, table: &ProxyTypeTable) -> Result<String> {
    let sites = dataset.read_sites()?;

    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for site in &sites {
        *counts.entry(site.code).or_insert(0) += 1;
    }

    let mut summary = format!("Proxy Types ({} sites):\n", sites.len());
    for (code, count) in &counts {
        let label = table.label(*code).unwrap_or("(unrecognized)");
        summary.push_str(&format!("  {:>5}  {:<14} {:>5}\n", code, label, count));
    }
    Ok(summary)
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init()
                .ok();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .try_init()
                .ok();
        }
    }

    Ok(())
}
