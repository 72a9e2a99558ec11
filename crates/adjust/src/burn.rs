//! 3D line burning
//!
//! Rasterizes 3D line geometries into a raster band, overwriting elevation
//! along each segment's footprint. Traversal is a full supercover: every
//! cell the geometric path passes through is visited, so near-axis-aligned
//! culvert lines cannot leave gaps at cell boundaries.

use hydroburn_core::raster::{GeoTransform, Raster};
use hydroburn_core::vector::{LineZ, Point3};
use hydroburn_core::{Algorithm, Error, Result};

/// Intervals shorter than this (in segment parameter space) are corner
/// touches produced by coincident row/column crossings; they carry no area.
const MIN_SPAN: f64 = 1e-12;

/// Parameters for line burning
#[derive(Debug, Clone, Default)]
pub struct BurnParams {
    /// Lines to burn, processed in order; later lines overwrite earlier
    /// ones at shared cells.
    pub lines: Vec<LineZ>,
}

/// Line burning as an [`Algorithm`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BurnLines;

impl Algorithm for BurnLines {
    type Input = Raster<f64>;
    type Output = (Raster<f64>, usize);
    type Params = BurnParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Burn Lines"
    }

    fn description(&self) -> &'static str {
        "Burn 3D flow-path lines into a DTM raster band"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut raster = input;
        let burned = burn_lines(&mut raster, &params.lines)?;
        Ok((raster, burned))
    }
}

/// Burn 3D lines into `target`, overwriting elevation along their paths.
///
/// Each consecutive point pair of a line forms a segment. Every cell a
/// segment passes through receives the segment elevation linearly
/// interpolated at that cell's traversal position; cells outside the grid
/// are silently clipped. Lines are processed in input order and the last
/// write wins at shared cells.
///
/// Returns the number of lines that burned at least one cell. Degenerate
/// lines (fewer than 2 points) and fully clipped lines contribute 0 and are
/// not errors.
pub fn burn_lines(target: &mut Raster<f64>, lines: &[LineZ]) -> Result<usize> {
    let gt = *target.transform();
    if !gt.is_axis_aligned() {
        return Err(Error::RotatedTransform);
    }

    let mut burned = 0;
    for line in lines {
        let mut wrote = false;
        for pair in line.points().windows(2) {
            wrote |= burn_segment(target, &gt, &pair[0], &pair[1]);
        }
        if wrote {
            burned += 1;
        }
    }
    Ok(burned)
}

/// Rasterize one segment; returns whether any cell was written
fn burn_segment(target: &mut Raster<f64>, gt: &GeoTransform, p0: &Point3, p1: &Point3) -> bool {
    let (c0, r0) = gt.geo_to_pixel(p0.x, p0.y);
    let (c1, r1) = gt.geo_to_pixel(p1.x, p1.y);
    if !(c0.is_finite() && r0.is_finite() && c1.is_finite() && r1.is_finite()) {
        return false;
    }

    let dc = c1 - c0;
    let dr = r1 - r0;

    // Traversal breakpoints: segment ends plus every crossing of an
    // integer pixel row or column boundary. Between two consecutive
    // breakpoints the segment lies inside a single cell.
    let mut ts = Vec::with_capacity(4 + dc.abs() as usize + dr.abs() as usize);
    ts.push(0.0);
    ts.push(1.0);
    push_axis_crossings(c0, dc, &mut ts);
    push_axis_crossings(r0, dr, &mut ts);
    ts.sort_by(f64::total_cmp);

    let (rows, cols) = target.shape();
    let dz = p1.z - p0.z;
    let mut wrote = false;

    for pair in ts.windows(2) {
        let span = pair[1] - pair[0];
        if span < MIN_SPAN {
            continue;
        }
        let t = 0.5 * (pair[0] + pair[1]);

        let col = (c0 + t * dc).floor();
        let row = (r0 + t * dr).floor();
        if col < 0.0 || row < 0.0 {
            continue;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= cols || row >= rows {
            continue;
        }

        let z = p0.z + t * dz;
        // Bounds checked just above
        unsafe { target.set_unchecked(row, col, z) };
        wrote = true;
    }

    wrote
}

/// Parameters in (0, 1) where the segment crosses integer grid lines along
/// one pixel axis
fn push_axis_crossings(start: f64, delta: f64, ts: &mut Vec<f64>) {
    if delta == 0.0 {
        return;
    }
    let end = start + delta;
    let mut k = start.min(end).ceil();
    let hi = start.max(end);
    while k <= hi {
        let t = (k - start) / delta;
        if t > 0.0 && t < 1.0 {
            ts.push(t);
        }
        k += 1.0;
    }
}
