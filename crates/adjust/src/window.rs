//! Raster window extraction
//!
//! Cuts a pixel-aligned sub-raster covering a map-space bounding box plus a
//! margin. The margin keeps at least one ring of neighbor cells around the
//! box so bilinear sampling at the box edges has full 2x2 support.

use hydroburn_core::raster::{BoundingBox, GeoTransform, Raster};
use hydroburn_core::{Error, Result};
use ndarray::s;

/// Read-only capabilities window extraction needs from a raster backend.
///
/// Implemented by the in-memory [`Raster<f64>`]; adapters around other
/// raster libraries implement the same surface.
pub trait RasterSource {
    fn geotransform(&self) -> GeoTransform;

    /// Grid dimensions as (rows, cols)
    fn shape(&self) -> (usize, usize);

    fn nodata(&self) -> Option<f64>;

    /// Copy a pixel window into a new, independently owned raster.
    ///
    /// The window is guaranteed to lie inside the source extent.
    fn read_window(&self, window: &PixelWindow) -> Result<Raster<f64>>;
}

/// A pixel-aligned window into a source raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub cols: usize,
    pub rows: usize,
}

impl RasterSource for Raster<f64> {
    fn geotransform(&self) -> GeoTransform {
        *self.transform()
    }

    fn shape(&self) -> (usize, usize) {
        self.shape()
    }

    fn nodata(&self) -> Option<f64> {
        self.nodata()
    }

    fn read_window(&self, window: &PixelWindow) -> Result<Raster<f64>> {
        let (rows, cols) = self.shape();
        if window.row_off + window.rows > rows || window.col_off + window.cols > cols {
            return Err(Error::IndexOutOfBounds {
                row: window.row_off + window.rows,
                col: window.col_off + window.cols,
                rows,
                cols,
            });
        }

        let data = self
            .data()
            .slice(s![
                window.row_off..window.row_off + window.rows,
                window.col_off..window.col_off + window.cols
            ])
            .to_owned();

        let gt = self.transform();
        let (origin_x, origin_y) =
            gt.fractional_pixel_to_geo(window.col_off as f64, window.row_off as f64);

        let mut out = Raster::from_array(data);
        out.set_transform(GeoTransform::new(
            origin_x,
            origin_y,
            gt.pixel_width,
            gt.pixel_height,
        ));
        out.set_crs(self.crs().cloned());
        out.set_nodata(self.nodata());
        Ok(out)
    }
}

/// Parameters for window extraction
#[derive(Debug, Clone, Copy)]
pub struct WindowParams {
    /// Extra pixels on every side of the bounding box. Must be at least 1
    /// for the window to support bilinear sampling at the box edges.
    pub margin_pixels: usize,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self { margin_pixels: 1 }
    }
}

/// Extract the minimal pixel-aligned window covering `bbox` plus margin.
///
/// The window is clamped to the source extent; a box entirely outside the
/// source is an error. The output grid has its origin shifted to the
/// window's top-left pixel, the source's pixel size and nodata sentinel,
/// and owns a copy of the selected cells.
pub fn extract_window<S: RasterSource>(
    source: &S,
    bbox: &BoundingBox,
    params: &WindowParams,
) -> Result<Raster<f64>> {
    let gt = source.geotransform();
    if !gt.is_axis_aligned() {
        return Err(Error::RotatedTransform);
    }

    let (rows, cols) = source.shape();
    let margin = params.margin_pixels as i64;

    // Fractional pixel coordinates of two opposite box corners; with an
    // axis-aligned transform the other two corners add nothing.
    let (c_a, r_a) = gt.geo_to_pixel(bbox.x_min, bbox.y_min);
    let (c_b, r_b) = gt.geo_to_pixel(bbox.x_max, bbox.y_max);

    // Cell hull of the box (exclusive upper bound), expanded by the margin
    let col_lo = c_a.min(c_b).floor() as i64 - margin;
    let col_hi = c_a.max(c_b).floor() as i64 + 1 + margin;
    let row_lo = r_a.min(r_b).floor() as i64 - margin;
    let row_hi = r_a.max(r_b).floor() as i64 + 1 + margin;

    if col_hi <= 0 || row_hi <= 0 || col_lo >= cols as i64 || row_lo >= rows as i64 {
        return Err(Error::WindowOutOfBounds {
            x_min: bbox.x_min,
            x_max: bbox.x_max,
            y_min: bbox.y_min,
            y_max: bbox.y_max,
        });
    }

    let col_off = col_lo.max(0) as usize;
    let row_off = row_lo.max(0) as usize;
    let col_end = (col_hi.min(cols as i64)) as usize;
    let row_end = (row_hi.min(rows as i64)) as usize;

    source.read_window(&PixelWindow {
        col_off,
        row_off,
        cols: col_end - col_off,
        rows: row_end - row_off,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_raster() -> Raster<f64> {
        let mut raster = Raster::new(10, 10);
        raster.set_transform(GeoTransform::new(0.0, 10.0, 1.0, -1.0));
        raster.set_nodata(Some(-9999.0));
        for row in 0..10 {
            for col in 0..10 {
                raster.set(row, col, (row * 10 + col) as f64).unwrap();
            }
        }
        raster
    }

    #[test]
    fn window_covers_bbox_with_margin() {
        let source = source_raster();
        // Map box x in [2.2, 4.8], y in [6.1, 7.9] -> cols 2..5, rows 2..4
        let bbox = BoundingBox::new(2.2, 4.8, 6.1, 7.9);

        let window = extract_window(&source, &bbox, &WindowParams { margin_pixels: 1 }).unwrap();

        // 3 hull cols + 2 margin, 2 hull rows + 2 margin
        assert_eq!(window.shape(), (4, 5));
        assert_eq!(window.transform().origin_x, 1.0);
        assert_eq!(window.transform().origin_y, 9.0);
        assert_eq!(window.nodata(), Some(-9999.0));

        // Cell values are copied from the source position
        assert_eq!(window.get(0, 0).unwrap(), source.get(1, 1).unwrap());
        assert_eq!(window.get(3, 4).unwrap(), source.get(4, 5).unwrap());
    }

    #[test]
    fn window_is_clamped_at_the_edge() {
        let source = source_raster();
        let bbox = BoundingBox::new(0.1, 0.9, 9.1, 9.9);

        let window = extract_window(&source, &bbox, &WindowParams { margin_pixels: 2 }).unwrap();

        // Margin would reach col -2 and row -2; clamped to the source
        assert_eq!(window.transform().origin_x, 0.0);
        assert_eq!(window.transform().origin_y, 10.0);
        assert_eq!(window.shape(), (3, 3));
    }

    #[test]
    fn window_entirely_outside_is_an_error() {
        let source = source_raster();
        let bbox = BoundingBox::new(100.0, 101.0, 100.0, 101.0);

        assert!(matches!(
            extract_window(&source, &bbox, &WindowParams::default()),
            Err(Error::WindowOutOfBounds { .. })
        ));
    }

    #[test]
    fn rotated_transform_is_rejected() {
        let mut source = source_raster();
        let mut gt = *source.transform();
        gt.row_rotation = 0.5;
        source.set_transform(gt);

        let bbox = BoundingBox::new(2.0, 4.0, 2.0, 4.0);
        assert!(matches!(
            extract_window(&source, &bbox, &WindowParams::default()),
            Err(Error::RotatedTransform)
        ));
    }

    #[test]
    fn source_is_not_mutated() {
        let source = source_raster();
        let before = source.clone();
        let bbox = BoundingBox::new(2.0, 4.0, 2.0, 4.0);
        let mut window = extract_window(&source, &bbox, &WindowParams::default()).unwrap();

        // Mutating the copy must not alias back
        window.set(0, 0, 12345.0).unwrap();
        for row in 0..10 {
            for col in 0..10 {
                assert_eq!(source.get(row, col).unwrap(), before.get(row, col).unwrap());
            }
        }
    }
}
