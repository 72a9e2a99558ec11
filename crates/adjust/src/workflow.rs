//! End-to-end conditioning workflow
//!
//! In-memory orchestration of the full adjustment: prefilter vector
//! features against the raster extent, attach elevation to both feature
//! classes, then burn the combined line set into a copy of the DTM. File
//! format concerns stay in the caller.

use geo_types::LineString;
use tracing::info;

use hydroburn_core::raster::Raster;
use hydroburn_core::vector::line_bounding_box;
use hydroburn_core::Result;

use crate::burn::burn_lines;
use crate::sampling::{sample_horseshoes_z, sample_lines_z, SampleStats, SamplingParams};

/// Parameters for the conditioning workflow
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionParams {
    pub sampling: SamplingParams,
}

/// Counts reported by a conditioning run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionReport {
    /// Line features outside the raster extent, never sampled
    pub lines_filtered_out: usize,
    /// Horseshoe features outside the raster extent, never sampled
    pub horseshoes_filtered_out: usize,
    pub line_stats: SampleStats,
    pub horseshoe_stats: SampleStats,
    /// Lines that wrote at least one cell
    pub lines_burned: usize,
}

/// Keep only features whose bounding box intersects `raster`'s extent
pub fn filter_by_bounds<'a>(
    features: &'a [LineString<f64>],
    raster: &Raster<f64>,
) -> Vec<&'a LineString<f64>> {
    let bounds = raster.bounds();
    features
        .iter()
        .filter(|f| {
            line_bounding_box(f)
                .map(|bbox| bbox.intersects(&bounds))
                .unwrap_or(false)
        })
        .collect()
}

/// Condition a DTM: sample crossing features against it and burn the
/// resulting 3D lines into a copy.
///
/// Crossing lines are burned before horseshoe cross lines, each class in
/// input order, so later features override earlier ones at shared cells.
/// The input raster is never mutated.
pub fn condition_dtm(
    dtm: &Raster<f64>,
    lines: &[LineString<f64>],
    horseshoes: &[LineString<f64>],
    params: &ConditionParams,
) -> Result<(Raster<f64>, ConditionReport)> {
    let kept_lines = filter_by_bounds(lines, dtm);
    let kept_horseshoes = filter_by_bounds(horseshoes, dtm);
    let mut report = ConditionReport {
        lines_filtered_out: lines.len() - kept_lines.len(),
        horseshoes_filtered_out: horseshoes.len() - kept_horseshoes.len(),
        ..Default::default()
    };

    let owned_lines: Vec<LineString<f64>> = kept_lines.into_iter().cloned().collect();
    let owned_horseshoes: Vec<LineString<f64>> = kept_horseshoes.into_iter().cloned().collect();

    let (mut burnable, line_stats) = sample_lines_z(dtm, &owned_lines, &params.sampling);
    info!(
        kept = line_stats.kept,
        dropped = line_stats.dropped,
        rejected = line_stats.rejected,
        "sampled crossing lines"
    );

    let (horseshoe_lines, horseshoe_stats) =
        sample_horseshoes_z(dtm, &owned_horseshoes, &params.sampling);
    info!(
        kept = horseshoe_stats.kept,
        dropped = horseshoe_stats.dropped,
        rejected = horseshoe_stats.rejected,
        "sampled horseshoe profiles"
    );

    burnable.extend(horseshoe_lines);

    let mut output = dtm.clone();
    let lines_burned = burn_lines(&mut output, &burnable)?;
    info!(lines_burned, "burned adjustment lines into DTM");

    report.line_stats = line_stats;
    report.horseshoe_stats = horseshoe_stats;
    report.lines_burned = lines_burned;

    Ok((output, report))
}
