use serde::Deserialize;

use crate::{
    Error,
    loading::parser::{has_column, require_columns},
};

/// One row of the merged feature table produced by the offline ETL step.
///
/// Feature columns must be present in the header; an empty cell takes a
/// neutral value.
#[derive(Debug, Deserialize)]
pub struct FeatureRow {
    pub longitude: f64,
    pub latitude: f64,

    #[serde(default, rename = "distance_to_nearest_streetlight")]
    pub street_light_distance: Option<f64>,
    #[serde(default, rename = "count_of_nearby_streetlight_500m_approx")]
    pub street_light_count: Option<f64>,

    #[serde(default, rename = "distance_to_nearest_policestation")]
    pub police_distance: Option<f64>,
    #[serde(default, rename = "count_of_nearby_policestation_500m_approx")]
    pub police_count: Option<f64>,

    #[serde(default, rename = "distance_to_nearest_transportstation")]
    pub transit_distance: Option<f64>,
    #[serde(default, rename = "count_of_nearby_transportstation_500m_approx")]
    pub transit_count: Option<f64>,

    #[serde(default, rename = "distance_to_nearest_nightlifevenue")]
    pub nightlife_distance: Option<f64>,
    #[serde(default, rename = "count_of_nearby_nightlifevenue_500m_approx")]
    pub nightlife_count: Option<f64>,

    #[serde(default)]
    pub count_restaurant: Option<f64>,
    #[serde(default)]
    pub count_bar: Option<f64>,
    #[serde(default)]
    pub count_nightclub: Option<f64>,
}

pub(crate) const REQUIRED_COLUMNS: [&str; 8] = [
    "longitude",
    "latitude",
    "distance_to_nearest_streetlight",
    "count_of_nearby_streetlight_500m_approx",
    "distance_to_nearest_policestation",
    "count_of_nearby_policestation_500m_approx",
    "distance_to_nearest_transportstation",
    "count_of_nearby_transportstation_500m_approx",
];

pub(crate) const NIGHTLIFE_COUNT_COLUMN: &str = "count_of_nearby_nightlifevenue_500m_approx";

pub(crate) const NIGHTLIFE_KIND_COLUMNS: [&str; 3] =
    ["count_restaurant", "count_bar", "count_nightclub"];

/// Requires the coordinate and feature columns, plus a nightlife count
/// either as a total or split by kind.
pub(crate) fn check_headers(headers: &csv::StringRecord) -> Result<(), Error> {
    require_columns(headers, &REQUIRED_COLUMNS)?;
    if has_column(headers, NIGHTLIFE_COUNT_COLUMN) {
        return Ok(());
    }
    require_columns(headers, &NIGHTLIFE_KIND_COLUMNS).map_err(|_| {
        Error::DataFormat(format!(
            "missing required column(s): {NIGHTLIFE_COUNT_COLUMN} or all of {}",
            NIGHTLIFE_KIND_COLUMNS.join(", ")
        ))
    })
}
