use crate::datasets::Variant;
use crate::utils::constants::DEFAULT_MAP_FILE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paleoclimate")]
#[command(about = "Paleoclimatology Reconstructions Network data sets and proxy maps")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: ./paleoclimate.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide download progress")]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    #[arg(long, default_value = "infilled", help = "Data product: infilled or raw")]
    pub variant: Variant,

    #[arg(
        long,
        help = "Download and cache folder [default: $PALEOCLIMATE_SCIPY_DATA or ~/paleoclimate_scipy]"
    )]
    pub data_home: Option<PathBuf>,

    #[arg(long, help = "Fail instead of downloading when the data is not cached")]
    pub no_download: bool,
}

impl DatasetArgs {
    pub fn download_if_missing(&self) -> bool {
        !self.no_download
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the data set into the cache if it is not there yet
    Fetch {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Display metadata and proxy type counts for a data set
    Info {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Render proxy sites on a world map, styled by data type
    Map {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[arg(short, long, default_value = DEFAULT_MAP_FILE)]
        output: PathBuf,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=18))]
        zoom: Option<u8>,
    },
}
