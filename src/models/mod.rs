pub mod proxy_type;
pub mod site;

pub use proxy_type::{MarkerStyle, MarkerStyler, Palette, ProxyTypeTable};
pub use site::ProxySite;
