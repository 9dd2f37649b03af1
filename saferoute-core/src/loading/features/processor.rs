use geo::Point;

use super::raw_types::FeatureRow;
use crate::{
    Error, NO_FEATURE_DISTANCE,
    model::{AnalysisPoint, NightlifeMix, Proximity},
};

/// Converts a parsed row into a validated analysis point.
///
/// `row_number` is the 1-based data row, used in error messages.
pub(crate) fn analysis_point_from_row(
    row: &FeatureRow,
    row_number: usize,
) -> Result<AnalysisPoint, Error> {
    if !(row.longitude.is_finite() && row.latitude.is_finite()) {
        return Err(Error::DataFormat(format!(
            "row {row_number}: coordinate ({}, {}) is not finite",
            row.longitude, row.latitude
        )));
    }

    let proximity = |distance: Option<f64>, count: Option<f64>, name: &str| {
        Ok::<_, Error>(Proximity {
            distance: distance_value(distance, row_number, name)?,
            count: count_value(count, row_number, name)?,
        })
    };

    let nightlife_mix = NightlifeMix {
        restaurant: count_value(row.count_restaurant, row_number, "restaurant")?,
        bar: count_value(row.count_bar, row_number, "bar")?,
        nightclub: count_value(row.count_nightclub, row_number, "nightclub")?,
    };
    let kinds_total = nightlife_mix.total().ok_or_else(|| {
        Error::DataFormat(format!(
            "row {row_number}: nightlife kind counts overflow a 32-bit total"
        ))
    })?;
    let has_kinds = row.count_restaurant.is_some()
        || row.count_bar.is_some()
        || row.count_nightclub.is_some();

    let mut nightlife = proximity(row.nightlife_distance, row.nightlife_count, "nightlife")?;
    if row.nightlife_count.is_none() {
        nightlife.count = kinds_total;
    } else if has_kinds && nightlife.count != kinds_total {
        return Err(Error::DataFormat(format!(
            "row {row_number}: nightlife count {} does not match the sum of its kinds ({kinds_total})",
            nightlife.count
        )));
    }

    Ok(AnalysisPoint {
        geometry: Point::new(row.longitude, row.latitude),
        street_light: proximity(
            row.street_light_distance,
            row.street_light_count,
            "street light",
        )?,
        police: proximity(row.police_distance, row.police_count, "police")?,
        transit: proximity(row.transit_distance, row.transit_count, "transit")?,
        nightlife,
        nightlife_mix,
    })
}

fn distance_value(value: Option<f64>, row_number: usize, name: &str) -> Result<f64, Error> {
    match value {
        None => Ok(NO_FEATURE_DISTANCE),
        Some(d) if d.is_finite() && d >= 0.0 => Ok(d),
        Some(d) => Err(Error::DataFormat(format!(
            "row {row_number}: {name} distance {d} is not a non-negative number"
        ))),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_value(value: Option<f64>, row_number: usize, name: &str) -> Result<u32, Error> {
    match value {
        None => Ok(0),
        Some(c) if c.is_finite() && c >= 0.0 && c.fract() == 0.0 && c <= f64::from(u32::MAX) => {
            Ok(c as u32)
        }
        Some(c) => Err(Error::DataFormat(format!(
            "row {row_number}: {name} count {c} is not a non-negative integer"
        ))),
    }
}
