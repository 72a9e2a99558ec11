//! Bilinear elevation sampling
//!
//! Builds a sampling function over a raster's cell-center grid. Sampling
//! never fails per call: a query outside the covered range, or one whose
//! 2x2 neighborhood touches nodata, yields NaN for that point and callers
//! treat finiteness as the validity signal.

use hydroburn_core::raster::Raster;
use hydroburn_core::{Error, Result};

/// Bilinear interpolator over an immutable raster snapshot.
///
/// The covered range is the hull of the cell centers: the outermost
/// half-pixel ring of the raster is outside it, which is why extracted
/// windows carry at least a one-pixel margin around the geometry they
/// serve. Sampling is deterministic and holds no mutable state.
#[derive(Debug)]
pub struct RasterInterpolator<'a> {
    grid: &'a Raster<f64>,
    origin_x: f64,
    origin_y: f64,
    pixel_width: f64,
    pixel_height: f64,
    rows: usize,
    cols: usize,
}

impl<'a> RasterInterpolator<'a> {
    /// Build an interpolator over `grid`.
    ///
    /// Rejects rotated geotransforms and grids smaller than 2x2 (no 2x2
    /// neighborhood exists anywhere on such a grid).
    pub fn new(grid: &'a Raster<f64>) -> Result<Self> {
        let gt = grid.transform();
        if !gt.is_axis_aligned() {
            return Err(Error::RotatedTransform);
        }

        let (rows, cols) = grid.shape();
        if rows < 2 || cols < 2 {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        Ok(Self {
            grid,
            origin_x: gt.origin_x,
            origin_y: gt.origin_y,
            pixel_width: gt.pixel_width,
            pixel_height: gt.pixel_height,
            rows,
            cols,
        })
    }

    /// Elevation at a single map coordinate, NaN when invalid
    pub fn sample_one(&self, x: f64, y: f64) -> f64 {
        // Fractional cell-center indices: cell (i, j) has its center at
        // x = origin_x + (i + 0.5) * pixel_width (and likewise for y)
        let u = (x - self.origin_x) / self.pixel_width - 0.5;
        let v = (y - self.origin_y) / self.pixel_height - 0.5;

        let u_max = (self.cols - 1) as f64;
        let v_max = (self.rows - 1) as f64;
        if !(u >= 0.0 && u <= u_max && v >= 0.0 && v <= v_max) {
            return f64::NAN;
        }

        let i0 = (u.floor() as usize).min(self.cols - 2);
        let j0 = (v.floor() as usize).min(self.rows - 2);
        let fu = u - i0 as f64;
        let fv = v - j0 as f64;

        // Bounds established above
        let z00 = unsafe { self.grid.get_unchecked(j0, i0) };
        let z01 = unsafe { self.grid.get_unchecked(j0, i0 + 1) };
        let z10 = unsafe { self.grid.get_unchecked(j0 + 1, i0) };
        let z11 = unsafe { self.grid.get_unchecked(j0 + 1, i0 + 1) };

        if self.grid.is_nodata(z00)
            || self.grid.is_nodata(z01)
            || self.grid.is_nodata(z10)
            || self.grid.is_nodata(z11)
        {
            return f64::NAN;
        }

        let top = z00 + fu * (z01 - z00);
        let bottom = z10 + fu * (z11 - z10);
        top + fv * (bottom - top)
    }

    /// Elevations at parallel coordinate arrays.
    ///
    /// `xs` and `ys` must have equal length; the result has the same
    /// length, with NaN marking each invalid point.
    pub fn sample(&self, xs: &[f64], ys: &[f64]) -> Vec<f64> {
        debug_assert_eq!(xs.len(), ys.len());
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| self.sample_one(x, y))
            .collect()
    }
}

/// Validity predicate over a batch of sampled elevations.
///
/// A feature is usable only if every sampled value is finite; partial data
/// is discarded by the caller rather than burned.
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}
