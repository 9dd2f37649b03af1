//! Geographic bounding boxes

use geo::{BoundingRect, Coord, MultiPoint, Point, Rect, coord};

use crate::Error;

/// Axis-aligned box in (lon, lat) degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    rect: Rect<f64>,
}

impl BoundingBox {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if any bound is not finite.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self, Error> {
        if [west, south, east, north].iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(
                "Bounding box coordinates must be finite".to_string(),
            ));
        }
        Ok(Self {
            rect: Rect::new(coord! { x: west, y: south }, coord! { x: east, y: north }),
        })
    }

    /// Smallest box containing every point, `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point<f64>>,
    {
        let points: MultiPoint<f64> = points.into_iter().collect();
        points.bounding_rect().map(|rect| Self { rect })
    }

    pub fn min(&self) -> Coord<f64> {
        self.rect.min()
    }

    pub fn max(&self) -> Coord<f64> {
        self.rect.max()
    }

    pub fn center(&self) -> Point<f64> {
        self.rect.center().into()
    }

    /// Grows the box by `degrees` on every side.
    #[must_use]
    pub fn expand_by(&self, degrees: f64) -> Self {
        let min = self.min();
        let max = self.max();
        Self {
            rect: Rect::new(
                coord! { x: min.x - degrees, y: min.y - degrees },
                coord! { x: max.x + degrees, y: max.y + degrees },
            ),
        }
    }

    /// Boundary counts as inside.
    pub fn contains_point(&self, point: &Point<f64>) -> bool {
        let min = self.min();
        let max = self.max();
        (min.x..=max.x).contains(&point.x()) && (min.y..=max.y).contains(&point.y())
    }

    /// True when `other` lies entirely within this box. Shared edges count.
    pub fn covers(&self, other: &BoundingBox) -> bool {
        let (min, max) = (self.min(), self.max());
        let (other_min, other_max) = (other.min(), other.max());
        min.x <= other_min.x && min.y <= other_min.y && max.x >= other_max.x && max.y >= other_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_corner_order() {
        let bbox = BoundingBox::new(77.5, 28.9, 77.1, 28.4).unwrap();
        assert_eq!(bbox.min(), coord! { x: 77.1, y: 28.4 });
        assert_eq!(bbox.max(), coord! { x: 77.5, y: 28.9 });
    }

    #[test]
    fn covers_nested_and_equal_boxes() {
        let outer = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let inner = BoundingBox::new(2.0, 2.0, 5.0, 5.0).unwrap();
        let touching = BoundingBox::new(0.0, 5.0, 10.0, 10.0).unwrap();
        let overlapping = BoundingBox::new(8.0, 8.0, 12.0, 12.0).unwrap();

        assert!(outer.covers(&inner));
        assert!(outer.covers(&outer));
        assert!(outer.covers(&touching));
        assert!(!outer.covers(&overlapping));
        assert!(!inner.covers(&outer));
    }

    #[test]
    fn expand_grows_every_side() {
        let bbox = BoundingBox::new(1.0, 1.0, 2.0, 2.0).unwrap().expand_by(0.5);
        assert_eq!(bbox.min(), coord! { x: 0.5, y: 0.5 });
        assert_eq!(bbox.max(), coord! { x: 2.5, y: 2.5 });
        assert!(bbox.contains_point(&Point::new(0.5, 2.5)));
        assert!(!bbox.contains_point(&Point::new(0.4, 2.0)));
    }

    #[test]
    fn from_points_handles_single_and_empty_input() {
        let single = BoundingBox::from_points([Point::new(3.0, 4.0)]).unwrap();
        assert_eq!(single.min(), single.max());
        assert_eq!(single.center(), Point::new(3.0, 4.0));
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(BoundingBox::new(f64::INFINITY, 0.0, 1.0, 1.0).is_err());
    }
}
