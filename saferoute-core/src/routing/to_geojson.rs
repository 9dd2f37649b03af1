use geo::{Coord, LineString};
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{Error, model::Route};

impl Route {
    /// Converts the route to a `GeoJSON` `Feature`.
    ///
    /// The geometry is a `LineString` of `[lon, lat]` pairs, or a `Point`
    /// when origin and destination snapped to the same node.
    pub fn to_feature(&self) -> Result<Feature, Error> {
        let geometry = match self.coordinates.as_slice() {
            [] => return Err(Error::GeoJsonError("Route has no coordinates".into())),
            [single] => Geometry::new(GeoJsonValue::from(single)),
            coords => {
                let line: LineString<f64> = coords.iter().map(|p| Coord::from(*p)).collect();
                Geometry::new(GeoJsonValue::from(&line))
            }
        };

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "node_count": self.node_count(),
                "node_keys": self.node_keys,
                "total_cost": self.total_cost,
                "total_length_m": self.total_length_m,
                "mean_safety": self.mean_safety,
                "origin_snap_m": self.origin_snap_m,
                "destination_snap_m": self.destination_snap_m,
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        let feature = self.to_feature()?;
        serde_json::to_string(&feature).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}
