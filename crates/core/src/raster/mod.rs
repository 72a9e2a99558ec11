//! Raster data structures

mod bounds;
mod element;
mod geotransform;
mod grid;

pub use bounds::BoundingBox;
pub use element::RasterElement;
pub use geotransform::GeoTransform;
pub use grid::{Raster, RasterStatistics};
