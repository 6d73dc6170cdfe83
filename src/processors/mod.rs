pub mod network_map;
pub mod site_mapper;

pub use network_map::{map_proxy_network, render_proxy_network, MapRequest};
pub use site_mapper::{CategoryCount, MappingReport, SiteMapper, SiteMarker};
