pub mod map_writer;

pub use map_writer::{polygon_svg, MapOptions, MapWriter};
