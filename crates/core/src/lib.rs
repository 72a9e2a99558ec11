//! # hydroburn-core
//!
//! Core types and I/O for hydroburn, a toolkit that hydrologically
//! conditions DTM rasters by burning culvert and bridge flow paths into the
//! elevation surface.
//!
//! This crate provides:
//! - `Raster<T>`: single-band georeferenced grid
//! - `GeoTransform` / `BoundingBox`: pixel↔map mapping and map-space extents
//! - `LineZ` / `Horseshoe`: crossing geometries before and after sampling
//! - GeoTIFF I/O (native `tiff` backend, GDAL behind the `gdal` feature)
//!
//! The conditioning algorithms themselves live in `hydroburn-adjust`.

pub mod crs;
pub mod error;
pub mod io;
pub mod raster;
pub mod vector;

pub use crs::Crs;
pub use error::{Error, Result};
pub use raster::{BoundingBox, GeoTransform, Raster, RasterElement};
pub use vector::{Horseshoe, LineZ, Point3};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::Crs;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{BoundingBox, GeoTransform, Raster, RasterElement};
    pub use crate::vector::{Horseshoe, LineZ, Point3};
    pub use crate::Algorithm;
}

/// Core trait for conditioning algorithms.
///
/// Algorithms are pure transformations of input data under a parameter
/// struct; no process-wide configuration is consulted anywhere.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
