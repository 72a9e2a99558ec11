//! Vector geometries for hydrological adjustment features
//!
//! Two feature classes describe man-made crossings: plain 2D line strings
//! (culvert/bridge center lines, sampled at their vertices) and "horseshoe"
//! quads (culvert cross-sections, sampled along two parallel profiles).
//! Sampling attaches elevation and produces [`LineZ`] geometries, which are
//! what the burning engine consumes.

use geo_types::{Coord, LineString};

use crate::error::{Error, Result};
use crate::raster::BoundingBox;

/// A 3D map-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Attach an elevation to a 2D coordinate
    pub fn from_coord(c: Coord<f64>, z: f64) -> Self {
        Self { x: c.x, y: c.y, z }
    }
}

/// An ordered 3D polyline.
///
/// Consecutive point pairs form the segments the burning engine rasterizes.
/// A line with fewer than 2 points is degenerate; the burner skips it and
/// counts nothing burned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineZ {
    points: Vec<Point3>,
}

impl LineZ {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Two-point line between `a` and `b`
    pub fn segment(a: Point3, b: Point3) -> Self {
        Self {
            points: vec![a, b],
        }
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Fewer than 2 points: nothing to rasterize
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }
}

/// A culvert cross-section quad.
///
/// Corners follow the A-B-C-D convention: A and D are the open-end corners,
/// B and C the closed-end corners. The open profile runs A→D, the closed
/// profile B→C, and cross lines connect matching positions on the two
/// profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horseshoe {
    pub a: Coord<f64>,
    pub b: Coord<f64>,
    pub c: Coord<f64>,
    pub d: Coord<f64>,
}

impl Horseshoe {
    /// Build from a 4-point line string in A-B-C-D order.
    ///
    /// Any other point count is rejected as unsupported geometry.
    pub fn from_line_string(ls: &LineString<f64>) -> Result<Self> {
        let coords = &ls.0;
        if coords.len() != 4 {
            return Err(Error::UnsupportedGeometry(format!(
                "horseshoe quad must have exactly 4 points, got {}",
                coords.len()
            )));
        }
        Ok(Self {
            a: coords[0],
            b: coords[1],
            c: coords[2],
            d: coords[3],
        })
    }

    /// Open-end profile endpoints, A→D
    pub fn open_profile(&self) -> (Coord<f64>, Coord<f64>) {
        (self.a, self.d)
    }

    /// Closed-end profile endpoints, B→C
    pub fn closed_profile(&self) -> (Coord<f64>, Coord<f64>) {
        (self.b, self.c)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.a.x.min(self.b.x).min(self.c.x).min(self.d.x),
            self.a.x.max(self.b.x).max(self.c.x).max(self.d.x),
            self.a.y.min(self.b.y).min(self.c.y).min(self.d.y),
            self.a.y.max(self.b.y).max(self.c.y).max(self.d.y),
        )
    }
}

/// Bounding box of a 2D line string, `None` when it has no coordinates
pub fn line_bounding_box(line: &LineString<f64>) -> Option<BoundingBox> {
    BoundingBox::from_coords(line.0.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::line_string;

    #[test]
    fn horseshoe_requires_four_points() {
        let tri = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert!(matches!(
            Horseshoe::from_line_string(&tri),
            Err(Error::UnsupportedGeometry(_))
        ));

        let quad = line_string![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 5.0, y: 2.0),
            (x: 5.0, y: 0.0)
        ];
        let hs = Horseshoe::from_line_string(&quad).unwrap();
        assert_eq!(hs.open_profile().1, Coord { x: 5.0, y: 0.0 });
        assert_eq!(hs.closed_profile().0, Coord { x: 0.0, y: 2.0 });
    }

    #[test]
    fn horseshoe_bbox_covers_corners() {
        let quad = line_string![
            (x: 1.0, y: -1.0),
            (x: 0.0, y: 2.0),
            (x: 5.0, y: 2.0),
            (x: 4.0, y: -1.0)
        ];
        let bbox = Horseshoe::from_line_string(&quad).unwrap().bounding_box();
        assert_eq!(bbox.x_min, 0.0);
        assert_eq!(bbox.x_max, 5.0);
        assert_eq!(bbox.y_min, -1.0);
        assert_eq!(bbox.y_max, 2.0);
    }

    #[test]
    fn degenerate_linez() {
        assert!(LineZ::new(vec![Point3::new(0.0, 0.0, 0.0)]).is_degenerate());
        assert!(!LineZ::segment(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 2.0))
            .is_degenerate());
    }
}
