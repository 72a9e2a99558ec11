//! Error types for hydroburn

use thiserror::Error;

/// Main error type for hydroburn operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("rotated or sheared geotransform is not supported")]
    RotatedTransform,

    #[error(
        "window [{x_min}, {x_max}] x [{y_min}, {y_max}] lies entirely outside the raster extent"
    )]
    WindowOutOfBounds {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[cfg(feature = "gdal")]
    #[error("GDAL error: {0}")]
    Gdal(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "gdal")]
impl From<gdal::errors::GdalError> for Error {
    fn from(e: gdal::errors::GdalError) -> Self {
        Error::Gdal(e.to_string())
    }
}

/// Result type alias for hydroburn operations
pub type Result<T> = std::result::Result<T, Error>;
