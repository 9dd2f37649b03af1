//! Analysis points and the immutable table holding them

use geo::Point;

use crate::{Error, NO_FEATURE_DISTANCE, model::BoundingBox};

/// Proximity of one infrastructure category to an analysis point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    /// Distance to the nearest instance, [`NO_FEATURE_DISTANCE`] if none
    /// was found within the search radius.
    pub distance: f64,
    /// Instances within the search radius.
    pub count: u32,
}

impl Default for Proximity {
    fn default() -> Self {
        Self {
            distance: NO_FEATURE_DISTANCE,
            count: 0,
        }
    }
}

impl Proximity {
    pub fn new(distance: f64, count: u32) -> Self {
        Self { distance, count }
    }
}

/// Nightlife venues within the search radius, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NightlifeMix {
    pub restaurant: u32,
    pub bar: u32,
    pub nightclub: u32,
}

impl NightlifeMix {
    /// Sum of all kinds, `None` on overflow.
    pub fn total(&self) -> Option<u32> {
        self.restaurant
            .checked_add(self.bar)?
            .checked_add(self.nightclub)
    }
}

/// A sampled location with precomputed safety features.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPoint {
    pub geometry: Point<f64>,
    pub street_light: Proximity,
    pub police: Proximity,
    pub transit: Proximity,
    /// `count` is the total number of nightlife venues within the radius.
    pub nightlife: Proximity,
    pub nightlife_mix: NightlifeMix,
}

impl AnalysisPoint {
    /// Point with no infrastructure nearby.
    pub fn new(geometry: Point<f64>) -> Self {
        Self {
            geometry,
            street_light: Proximity::default(),
            police: Proximity::default(),
            transit: Proximity::default(),
            nightlife: Proximity::default(),
            nightlife_mix: NightlifeMix::default(),
        }
    }

    pub fn nightlife_total(&self) -> u32 {
        self.nightlife.count
    }

    fn validate(&self, position: usize) -> Result<(), Error> {
        if !(self.geometry.x().is_finite() && self.geometry.y().is_finite()) {
            return Err(Error::DataFormat(format!(
                "analysis point {position} has a non-finite coordinate"
            )));
        }

        let distances = [
            ("street light", self.street_light.distance),
            ("police", self.police.distance),
            ("transit", self.transit.distance),
            ("nightlife", self.nightlife.distance),
        ];
        for (category, distance) in distances {
            if !(distance.is_finite() && distance >= 0.0) {
                return Err(Error::DataFormat(format!(
                    "analysis point {position} has invalid {category} distance {distance}"
                )));
            }
        }
        Ok(())
    }
}

/// Immutable, ordered table of analysis points.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    points: Vec<AnalysisPoint>,
}

impl FeatureStore {
    /// Wraps already parsed points, validating every record.
    ///
    /// # Errors
    ///
    /// [`Error::DataFormat`] for a non-finite coordinate or a negative
    /// or non-finite distance.
    pub fn new(points: Vec<AnalysisPoint>) -> Result<Self, Error> {
        for (position, point) in points.iter().enumerate() {
            point.validate(position)?;
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[AnalysisPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&AnalysisPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisPoint> {
        self.points.iter()
    }

    /// Bounding box of all analysis points, `None` for an empty store.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().map(|p| p.geometry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_point_has_no_nearby_infrastructure() {
        let point = AnalysisPoint::new(Point::new(77.3, 28.5));
        assert_eq!(point.street_light.distance, NO_FEATURE_DISTANCE);
        assert_eq!(point.nightlife_total(), 0);
    }

    #[test]
    fn rejects_negative_distance() {
        let mut point = AnalysisPoint::new(Point::new(0.0, 0.0));
        point.police.distance = -1.0;
        let err = FeatureStore::new(vec![AnalysisPoint::new(Point::new(1.0, 1.0)), point])
            .unwrap_err();
        match err {
            Error::DataFormat(message) => assert!(message.contains("point 1")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn bounds_cover_all_points() {
        let store = FeatureStore::new(vec![
            AnalysisPoint::new(Point::new(77.1, 28.6)),
            AnalysisPoint::new(Point::new(77.4, 28.4)),
            AnalysisPoint::new(Point::new(77.2, 28.9)),
        ])
        .unwrap();

        let bounds = store.bounds().unwrap();
        assert_eq!(bounds.min(), geo::coord! { x: 77.1, y: 28.4 });
        assert_eq!(bounds.max(), geo::coord! { x: 77.4, y: 28.9 });
        assert!(FeatureStore::default().bounds().is_none());
    }

    #[test]
    fn nightlife_mix_sums_kinds() {
        let mix = NightlifeMix {
            restaurant: 3,
            bar: 2,
            nightclub: 1,
        };
        assert_eq!(mix.total(), Some(6));

        let crowded = NightlifeMix {
            restaurant: u32::MAX,
            bar: 1,
            nightclub: 0,
        };
        assert_eq!(crowded.total(), None);
    }
}
