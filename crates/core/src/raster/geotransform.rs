//! Affine georeferencing for rasters

use serde::{Deserialize, Serialize};

/// Affine transformation between pixel indices and map coordinates.
///
/// ```text
/// x = origin_x + col * pixel_width  + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// For north-up rasters `row_rotation` and `col_rotation` are 0 and
/// `pixel_height` is negative. The conditioning algorithms only accept
/// axis-aligned grids; check with [`GeoTransform::is_axis_aligned`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left raster corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left raster corner
    pub origin_y: f64,
    /// Cell size in X direction
    pub pixel_width: f64,
    /// Cell size in Y direction (negative for north-up)
    pub pixel_height: f64,
    /// Row rotation term (0 for axis-aligned grids)
    pub row_rotation: f64,
    /// Column rotation term (0 for axis-aligned grids)
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Axis-aligned transform from origin and pixel size
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// From GDAL coefficient order
    /// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// To GDAL coefficient order
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Map coordinates of a pixel's center
    pub fn pixel_to_geo(&self, col: usize, row: usize) -> (f64, f64) {
        self.fractional_pixel_to_geo(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Map coordinates of a pixel's top-left corner
    pub fn pixel_to_geo_corner(&self, col: usize, row: usize) -> (f64, f64) {
        self.fractional_pixel_to_geo(col as f64, row as f64)
    }

    /// Map coordinates of a fractional pixel position
    pub fn fractional_pixel_to_geo(&self, col: f64, row: f64) -> (f64, f64) {
        let x = self.origin_x + col * self.pixel_width + row * self.row_rotation;
        let y = self.origin_y + col * self.col_rotation + row * self.pixel_height;
        (x, y)
    }

    /// Fractional pixel coordinates of a map position, `(col, row)`.
    ///
    /// Inverts the affine mapping; `.floor()` gives the containing cell.
    /// Returns NaN for a degenerate (zero-determinant) transform.
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let det = self.pixel_width * self.pixel_height - self.row_rotation * self.col_rotation;
        if det.abs() < 1e-12 {
            return (f64::NAN, f64::NAN);
        }

        let dx = x - self.origin_x;
        let dy = y - self.origin_y;

        let col = (self.pixel_height * dx - self.row_rotation * dy) / det;
        let row = (self.pixel_width * dy - self.col_rotation * dx) / det;

        (col, row)
    }

    /// Whether both rotation terms are zero.
    ///
    /// Sampling and burning reject grids that fail this check.
    pub fn is_axis_aligned(&self) -> bool {
        self.row_rotation.abs() < 1e-12 && self.col_rotation.abs() < 1e-12
    }

    /// Axis-aligned with negative pixel height (the usual GeoTIFF layout)
    pub fn is_north_up(&self) -> bool {
        self.is_axis_aligned() && self.pixel_height < 0.0
    }

    /// Cell size in X (assumes square cells for display purposes)
    pub fn cell_size(&self) -> f64 {
        self.pixel_width.abs()
    }

    /// Length of a pixel's diagonal in map units.
    ///
    /// Half of this is the default spacing for horseshoe profile samples.
    pub fn diagonal_pixel_size(&self) -> f64 {
        self.pixel_width.hypot(self.pixel_height)
    }

    /// Map-space extent of a `cols` x `rows` grid as
    /// `(x_min, y_min, x_max, y_max)`
    pub fn extent(&self, cols: usize, rows: usize) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.fractional_pixel_to_geo(0.0, 0.0);
        let (x1, y1) = self.fractional_pixel_to_geo(cols as f64, 0.0);
        let (x2, y2) = self.fractional_pixel_to_geo(0.0, rows as f64);
        let (x3, y3) = self.fractional_pixel_to_geo(cols as f64, rows as f64);

        let x_min = x0.min(x1).min(x2).min(x3);
        let x_max = x0.max(x1).max(x2).max(x3);
        let y_min = y0.min(y1).min(y2).min(y3);
        let y_max = y0.max(y1).max(y2).max(y3);

        (x_min, y_min, x_max, y_max)
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pixel_geo_roundtrip() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);

        let (x, y) = gt.pixel_to_geo(5, 10);
        let (col, row) = gt.geo_to_pixel(x, y);

        assert_relative_eq!(col, 5.5, epsilon = 1e-10);
        assert_relative_eq!(row, 10.5, epsilon = 1e-10);
    }

    #[test]
    fn inverse_handles_south_up() {
        let gt = GeoTransform::new(0.0, 0.0, 1.0, 1.0);
        let (col, row) = gt.geo_to_pixel(3.5, 7.25);
        assert_relative_eq!(col, 3.5);
        assert_relative_eq!(row, 7.25);
    }

    #[test]
    fn extent_of_grid() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let (x_min, y_min, x_max, y_max) = gt.extent(100, 100);

        assert_relative_eq!(x_min, 0.0);
        assert_relative_eq!(y_min, 0.0);
        assert_relative_eq!(x_max, 100.0);
        assert_relative_eq!(y_max, 100.0);
    }

    #[test]
    fn axis_alignment_check() {
        assert!(GeoTransform::new(0.0, 0.0, 1.0, -1.0).is_axis_aligned());
        assert!(GeoTransform::new(0.0, 0.0, 1.0, -1.0).is_north_up());
        assert!(!GeoTransform::new(0.0, 0.0, 1.0, 1.0).is_north_up());

        let mut sheared = GeoTransform::new(0.0, 0.0, 1.0, -1.0);
        sheared.row_rotation = 0.1;
        assert!(!sheared.is_axis_aligned());
    }

    #[test]
    fn diagonal_pixel_size_is_hypot() {
        let gt = GeoTransform::new(0.0, 0.0, 3.0, -4.0);
        assert_relative_eq!(gt.diagonal_pixel_size(), 5.0);
    }
}
