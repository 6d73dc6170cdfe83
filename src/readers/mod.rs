pub mod dataset;

pub use dataset::{DatasetSummary, DimensionInfo, ProxyDataset};
