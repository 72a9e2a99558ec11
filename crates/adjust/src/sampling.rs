//! Elevation sampling drivers
//!
//! Attach DTM elevation to 2D crossing geometries, producing the 3D lines
//! the burning engine consumes. Each feature gets its own raster window so
//! whole-dataset rasters never have to be resident; a feature whose sampled
//! elevations are not all finite is dropped rather than burned with partial
//! data.

use geo_types::LineString;
use rayon::prelude::*;
use tracing::debug;

use hydroburn_core::vector::{line_bounding_box, Horseshoe, LineZ, Point3};
use hydroburn_core::{Error, Result};

use crate::horseshoe::{cross_lines, default_max_sample_dist, profile_points, profile_sample_count};
use crate::interpolate::{all_finite, RasterInterpolator};
use crate::window::{extract_window, RasterSource, WindowParams};

/// Parameters for the sampling drivers
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    /// Margin around each feature's window; at least 1 so bilinear support
    /// exists at the feature's own coordinates
    pub margin_pixels: usize,
    /// Maximum spacing between horseshoe profile samples; `None` resolves
    /// to half the source raster's diagonal pixel size
    pub max_sample_dist: Option<f64>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            margin_pixels: 1,
            max_sample_dist: None,
        }
    }
}

impl SamplingParams {
    fn window_params(&self) -> WindowParams {
        WindowParams {
            margin_pixels: self.margin_pixels.max(1),
        }
    }

    fn resolve_max_sample_dist<S: RasterSource>(&self, source: &S) -> Result<f64> {
        let dist = self
            .max_sample_dist
            .unwrap_or_else(|| default_max_sample_dist(&source.geotransform()));
        if !(dist.is_finite() && dist > 0.0) {
            return Err(Error::InvalidParameter {
                name: "max_sample_dist",
                value: dist.to_string(),
                reason: "must be a positive, finite distance".into(),
            });
        }
        Ok(dist)
    }
}

/// Outcome counts of a batch sampling run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Features with fully finite elevation, converted to lines
    pub kept: usize,
    /// Features dropped because a sampled elevation was not finite
    pub dropped: usize,
    /// Features rejected with a structural error (wrong point count,
    /// window entirely outside the raster)
    pub rejected: usize,
}

/// Sample elevation at every vertex of a 2D line.
///
/// Returns `Ok(None)` when any vertex elevation is non-finite (off the
/// raster, or touching nodata) — a data-quality skip, not an error. Lines
/// with fewer than 2 points are structural errors.
pub fn sample_line_z<S: RasterSource>(
    source: &S,
    line: &LineString<f64>,
    params: &SamplingParams,
) -> Result<Option<LineZ>> {
    let coords = &line.0;
    if coords.len() < 2 {
        return Err(Error::UnsupportedGeometry(format!(
            "crossing line must have at least 2 points, got {}",
            coords.len()
        )));
    }

    let bbox = match line_bounding_box(line) {
        Some(bbox) => bbox,
        None => return Ok(None),
    };

    let window = extract_window(source, &bbox, &params.window_params())?;
    let interpolator = RasterInterpolator::new(&window)?;

    let xs: Vec<f64> = coords.iter().map(|c| c.x).collect();
    let ys: Vec<f64> = coords.iter().map(|c| c.y).collect();
    let zs = interpolator.sample(&xs, &ys);

    if !all_finite(&zs) {
        return Ok(None);
    }

    let points = coords
        .iter()
        .zip(&zs)
        .map(|(&c, &z)| Point3::from_coord(c, z))
        .collect();
    Ok(Some(LineZ::new(points)))
}

/// Sample a horseshoe's two profiles and render its cross lines.
///
/// Both profiles are sampled at the same density, driven by the longest
/// profile and the configured spacing. Returns `Ok(None)` when any sample
/// on either profile is non-finite.
pub fn sample_horseshoe_lines<S: RasterSource>(
    source: &S,
    horseshoe: &Horseshoe,
    params: &SamplingParams,
) -> Result<Option<Vec<LineZ>>> {
    let max_sample_dist = params.resolve_max_sample_dist(source)?;

    let window = extract_window(source, &horseshoe.bounding_box(), &params.window_params())?;
    let interpolator = RasterInterpolator::new(&window)?;

    let count = profile_sample_count(horseshoe, max_sample_dist);
    let (a, d) = horseshoe.open_profile();
    let (b, c) = horseshoe.closed_profile();
    let open = profile_points(a, d, count);
    let closed = profile_points(b, c, count);

    let open_z = sample_coords(&interpolator, &open);
    let closed_z = sample_coords(&interpolator, &closed);

    if !all_finite(&open_z) || !all_finite(&closed_z) {
        return Ok(None);
    }

    Ok(Some(cross_lines(&open, &closed, &open_z, &closed_z)))
}

fn sample_coords(
    interpolator: &RasterInterpolator<'_>,
    coords: &[geo_types::Coord<f64>],
) -> Vec<f64> {
    coords
        .iter()
        .map(|c| interpolator.sample_one(c.x, c.y))
        .collect()
}

/// Sample a batch of crossing lines, skipping invalid features.
///
/// Features are processed in parallel but the output preserves input
/// order. Structurally invalid features are counted and skipped; the
/// caller decides whether that is acceptable for its batch.
pub fn sample_lines_z<S>(
    source: &S,
    lines: &[LineString<f64>],
    params: &SamplingParams,
) -> (Vec<LineZ>, SampleStats)
where
    S: RasterSource + Sync,
{
    let results: Vec<Result<Option<LineZ>>> = lines
        .par_iter()
        .map(|line| sample_line_z(source, line, params))
        .collect();

    collect_batch(results)
}

/// Sample a batch of horseshoe quads into cross lines.
///
/// Accepts raw 4-point line strings; quads with any other point count are
/// counted as rejected. Output preserves input order, with each feature's
/// cross lines kept contiguous.
pub fn sample_horseshoes_z<S>(
    source: &S,
    quads: &[LineString<f64>],
    params: &SamplingParams,
) -> (Vec<LineZ>, SampleStats)
where
    S: RasterSource + Sync,
{
    let results: Vec<Result<Option<Vec<LineZ>>>> = quads
        .par_iter()
        .map(|quad| {
            let horseshoe = Horseshoe::from_line_string(quad)?;
            sample_horseshoe_lines(source, &horseshoe, params)
        })
        .collect();

    let mut lines = Vec::new();
    let mut stats = SampleStats::default();
    for result in results {
        match result {
            Ok(Some(cross)) => {
                stats.kept += 1;
                lines.extend(cross);
            }
            Ok(None) => stats.dropped += 1,
            Err(e) => {
                debug!(error = %e, "skipping horseshoe feature");
                stats.rejected += 1;
            }
        }
    }
    (lines, stats)
}

fn collect_batch(results: Vec<Result<Option<LineZ>>>) -> (Vec<LineZ>, SampleStats) {
    let mut lines = Vec::new();
    let mut stats = SampleStats::default();
    for result in results {
        match result {
            Ok(Some(line)) => {
                stats.kept += 1;
                lines.push(line);
            }
            Ok(None) => stats.dropped += 1,
            Err(e) => {
                debug!(error = %e, "skipping line feature");
                stats.rejected += 1;
            }
        }
    }
    (lines, stats)
}
