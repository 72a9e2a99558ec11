//! Axis-aligned map-space bounding boxes

use geo_types::Coord;

/// An axis-aligned rectangle in map units.
///
/// Invariant: `x_min <= x_max` and `y_min <= y_max`. Boxes are built fresh
/// per query and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        debug_assert!(x_min <= x_max && y_min <= y_max);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Box spanning two corner points in any order
    pub fn of_segment(a: Coord<f64>, b: Coord<f64>) -> Self {
        Self {
            x_min: a.x.min(b.x),
            x_max: a.x.max(b.x),
            y_min: a.y.min(b.y),
            y_max: a.y.max(b.y),
        }
    }

    /// Smallest box covering all coordinates, `None` for an empty iterator
    pub fn from_coords(coords: impl IntoIterator<Item = Coord<f64>>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first.x, first.x, first.y, first.y);
        for c in iter {
            bbox.x_min = bbox.x_min.min(c.x);
            bbox.x_max = bbox.x_max.max(c.x);
            bbox.y_min = bbox.y_min.min(c.y);
            bbox.y_max = bbox.y_max.max(c.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: 0.5 * (self.x_min + self.x_max),
            y: 0.5 * (self.y_min + self.y_max),
        }
    }

    /// Whether the two boxes share any point (edge touching counts)
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_coords_covers_all_points() {
        let coords = [
            Coord { x: 3.0, y: 1.0 },
            Coord { x: -2.0, y: 5.0 },
            Coord { x: 0.0, y: 0.0 },
        ];
        let bbox = BoundingBox::from_coords(coords).unwrap();
        assert_eq!(bbox.x_min, -2.0);
        assert_eq!(bbox.x_max, 3.0);
        assert_eq!(bbox.y_min, 0.0);
        assert_eq!(bbox.y_max, 5.0);
    }

    #[test]
    fn from_coords_empty_is_none() {
        assert!(BoundingBox::from_coords(std::iter::empty()).is_none());
    }

    #[test]
    fn intersection_test() {
        let a = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        let b = BoundingBox::new(5.0, 15.0, 5.0, 15.0);
        let c = BoundingBox::new(11.0, 12.0, 0.0, 10.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));

        // Edge contact counts as intersection
        let d = BoundingBox::new(10.0, 20.0, 0.0, 10.0);
        assert!(a.intersects(&d));
    }

    #[test]
    fn of_segment_orders_corners() {
        let bbox = BoundingBox::of_segment(Coord { x: 9.0, y: 1.0 }, Coord { x: 2.0, y: 4.0 });
        assert_eq!(bbox.x_min, 2.0);
        assert_eq!(bbox.x_max, 9.0);
        assert!(bbox.contains(5.0, 2.0));
        assert!(!bbox.contains(1.0, 2.0));
    }
}
