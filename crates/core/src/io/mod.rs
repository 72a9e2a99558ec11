//! Raster I/O
//!
//! The conditioning core itself has no file-format surface; these readers
//! and writers are the adapters that move grids between GeoTIFF files and
//! in-memory [`crate::raster::Raster`] values.

#[cfg(feature = "gdal")]
mod gdal_io;
#[cfg(not(feature = "gdal"))]
mod native;

#[cfg(feature = "gdal")]
pub use gdal_io::{read_geotiff, write_geotiff};

#[cfg(not(feature = "gdal"))]
pub use native::{read_geotiff, write_geotiff};
