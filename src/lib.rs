pub mod cli;
pub mod datasets;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use datasets::{mann2008a, DatasetLoader, Variant};
pub use error::{PaleoError, Result};
