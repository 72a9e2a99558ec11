//! Horseshoe profile geometry
//!
//! A horseshoe describes a culvert cross-section as an A-B-C-D quad with an
//! open profile A→D and a closed profile B→C. Conditioning renders it as a
//! fan of cross lines connecting matching positions on the two profiles;
//! the functions here are pure geometry so the density logic stays
//! testable without any raster backend.

use geo_types::Coord;
use hydroburn_core::raster::GeoTransform;
use hydroburn_core::vector::{Horseshoe, LineZ, Point3};

/// Default maximum spacing between profile samples: half the raster's
/// diagonal pixel size, so neighboring cross lines always land within a
/// pixel of each other.
pub fn default_max_sample_dist(gt: &GeoTransform) -> f64 {
    0.5 * gt.diagonal_pixel_size()
}

/// Number of samples to place along each profile.
///
/// Driven by the longer of the two profiles so the denser side is never
/// undersampled; always at least 2 (the profile endpoints).
pub fn profile_sample_count(horseshoe: &Horseshoe, max_sample_dist: f64) -> usize {
    let (a, d) = horseshoe.open_profile();
    let (b, c) = horseshoe.closed_profile();

    let open_length = (d.x - a.x).hypot(d.y - a.y);
    let closed_length = (c.x - b.x).hypot(c.y - b.y);
    let longest = open_length.max(closed_length);

    let intervals = (longest / max_sample_dist).ceil() as usize;
    (intervals + 1).max(2)
}

/// `count` points spaced evenly from `from` to `to`, endpoints included
pub fn profile_points(from: Coord<f64>, to: Coord<f64>, count: usize) -> Vec<Coord<f64>> {
    debug_assert!(count >= 2);
    let step = 1.0 / (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f64 * step;
            Coord {
                x: from.x + t * (to.x - from.x),
                y: from.y + t * (to.y - from.y),
            }
        })
        .collect()
}

/// Connect matching profile positions into 2-point cross lines.
///
/// All four slices must have the same length; `open_z[i]` and
/// `closed_z[i]` carry the elevations sampled at `open[i]` / `closed[i]`.
pub fn cross_lines(
    open: &[Coord<f64>],
    closed: &[Coord<f64>],
    open_z: &[f64],
    closed_z: &[f64],
) -> Vec<LineZ> {
    debug_assert_eq!(open.len(), closed.len());
    debug_assert_eq!(open.len(), open_z.len());
    debug_assert_eq!(closed.len(), closed_z.len());

    open.iter()
        .zip(closed)
        .zip(open_z.iter().zip(closed_z))
        .map(|((&o, &c), (&oz, &cz))| {
            LineZ::segment(Point3::from_coord(o, oz), Point3::from_coord(c, cz))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo_types::line_string;
    use hydroburn_core::vector::Horseshoe;

    fn quad() -> Horseshoe {
        // Open profile A->D along y=0 (length 6), closed profile B->C
        // along y=2 (length 4)
        Horseshoe::from_line_string(&line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 2.0),
            (x: 5.0, y: 2.0),
            (x: 6.0, y: 0.0)
        ])
        .unwrap()
    }

    #[test]
    fn count_follows_longest_profile() {
        let hs = quad();
        // Longest profile is 6 map units
        assert_eq!(profile_sample_count(&hs, 1.0), 7);
        assert_eq!(profile_sample_count(&hs, 2.0), 4);
        // Very coarse spacing still keeps both endpoints
        assert_eq!(profile_sample_count(&hs, 100.0), 2);
    }

    #[test]
    fn count_rounds_up() {
        let hs = quad();
        // 6 / 2.5 = 2.4 intervals -> 3 intervals -> 4 samples
        assert_eq!(profile_sample_count(&hs, 2.5), 4);
    }

    #[test]
    fn points_are_evenly_spaced_inclusive() {
        let pts = profile_points(Coord { x: 0.0, y: 0.0 }, Coord { x: 6.0, y: 0.0 }, 4);
        assert_eq!(pts.len(), 4);
        assert_relative_eq!(pts[0].x, 0.0);
        assert_relative_eq!(pts[1].x, 2.0);
        assert_relative_eq!(pts[2].x, 4.0);
        assert_relative_eq!(pts[3].x, 6.0);
    }

    #[test]
    fn cross_lines_pair_up_profiles() {
        let hs = quad();
        let (a, d) = hs.open_profile();
        let (b, c) = hs.closed_profile();

        let open = profile_points(a, d, 3);
        let closed = profile_points(b, c, 3);
        let lines = cross_lines(&open, &closed, &[10.0, 11.0, 12.0], &[20.0, 21.0, 22.0]);

        assert_eq!(lines.len(), 3);
        let mid = &lines[1];
        assert_relative_eq!(mid.points()[0].x, 3.0);
        assert_relative_eq!(mid.points()[0].z, 11.0);
        assert_relative_eq!(mid.points()[1].x, 3.0);
        assert_relative_eq!(mid.points()[1].z, 21.0);
    }

    #[test]
    fn default_spacing_is_half_pixel_diagonal() {
        let gt = GeoTransform::new(0.0, 0.0, 0.4, -0.4);
        assert_relative_eq!(
            default_max_sample_dist(&gt),
            0.5 * (0.32f64).sqrt(),
            epsilon = 1e-12
        );
    }
}
