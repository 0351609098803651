// Copyright 2023 Viktor Reusch
//
// This file is part of sct2_convert.
//
// sct2_convert is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// sct2_convert is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.
//
// You should have received a copy of the GNU Affero General Public License
// along with sct2_convert. If not, see <https://www.gnu.org/licenses/>.

//! Reader for GeoJSON boundary collections.
//!
//! The document must be a _FeatureCollection_. Each feature needs the string
//! properties `id` and `prefix` and a polygonal geometry. Only the first ring
//! of the first polygon is used.

use ::geojson::{Feature, GeoJson, Value};

use crate::dms::Dms;
use crate::walker::{GeoCoordinate, RingWalker, SectorFile};
use crate::Error;

/// Parse the GeoJSON document `text` into one group per feature plus the
/// aggregating `ALL` group.
///
/// Any feature lacking a required property or coordinates aborts the whole
/// conversion.
pub fn read_geojson(text: &str) -> Result<SectorFile, Error> {
    let collection = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        _ => return Err(missing("document", "features")),
    };

    let mut walker = RingWalker::new();
    for (index, feature) in collection.features.iter().enumerate() {
        let record = format!("feature {}", index + 1);
        let id = string_property(feature, &record, "id", "properties.id")?;
        let prefix = string_property(feature, &record, "prefix", "properties.prefix")?
            .chars()
            .next()
            .ok_or_else(|| missing(&record, "properties.prefix"))?;
        let ring = first_ring(feature, &record)?;
        walker.add_feature(id, prefix, ring);
    }

    Ok(walker.finish())
}

fn missing(record: &str, field: &'static str) -> Error {
    Error::MissingField {
        record: record.to_string(),
        field,
    }
}

/// Look up the string property `key` of `feature`.
fn string_property<'a>(
    feature: &'a Feature,
    record: &str,
    key: &str,
    field: &'static str,
) -> Result<&'a str, Error> {
    feature
        .property(key)
        .and_then(|value| value.as_str())
        .ok_or_else(|| missing(record, field))
}

/// Extract the outer ring of the first polygon of `feature`.
///
/// GeoJSON positions are `[longitude, latitude]`; extra values like an
/// altitude are ignored.
fn first_ring(feature: &Feature, record: &str) -> Result<Vec<GeoCoordinate>, Error> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| missing(record, "geometry"))?;

    let ring = match geometry.value {
        Value::MultiPolygon(ref polygons) => polygons.first().and_then(|rings| rings.first()),
        Value::Polygon(ref rings) => rings.first(),
        ref other => {
            return Err(Error::UnsupportedGeometry {
                record: record.to_string(),
                kind: geometry_kind(other),
            })
        }
    };
    let ring = ring
        .filter(|ring| !ring.is_empty())
        .ok_or_else(|| missing(record, "geometry.coordinates"))?;

    ring.iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] if !Dms::can_represent(*lon) || !Dms::can_represent(*lat) => {
                Err(Error::InvalidNumber {
                    record: record.to_string(),
                    field: "geometry.coordinates",
                    value: format!("[{lon}, {lat}]"),
                })
            }
            [lon, lat, ..] => Ok(GeoCoordinate::new(*lat, *lon)),
            _ => Err(missing(record, "geometry.coordinates")),
        })
        .collect()
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::ALL_GROUP;

    fn feature(id: &str, prefix: &str, coordinates: &str) -> String {
        format!(
            r#"{{"type":"Feature","properties":{{"id":"{id}","prefix":"{prefix}"}},"geometry":{{"type":"MultiPolygon","coordinates":{coordinates}}}}}"#
        )
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        )
    }

    const OPEN_TRIANGLE: &str = "[[[[0,0],[0,1],[1,1]]]]";
    const CLOSED_TRIANGLE: &str = "[[[[10,10],[10,11],[11,11],[10,10]]]]";

    #[test]
    fn features_become_groups() {
        let text = collection(&[
            feature("SLC", "Approach", OPEN_TRIANGLE),
            feature("BOI", "Departure", CLOSED_TRIANGLE),
        ]);
        let file = read_geojson(&text).unwrap();

        let names: Vec<_> = file.groups.iter().map(|g| g.name.as_deref()).collect();
        assert_eq!(names, [Some("SLCA1"), Some("BOID2"), Some(ALL_GROUP)]);
        assert_eq!(file.groups[0].segments.len(), 3);
        assert_eq!(file.groups[1].segments.len(), 3);
        assert_eq!(file.groups[2].segments.len(), 6);
    }

    #[test]
    fn positions_are_lon_lat() {
        let text = collection(&[feature("X", "Y", OPEN_TRIANGLE)]);
        let file = read_geojson(&text).unwrap();
        let segment = file.groups[0].segments[0];
        assert_eq!(segment.start, GeoCoordinate::new(0.0, 0.0));
        assert_eq!(segment.end, GeoCoordinate::new(1.0, 0.0));
    }

    #[test]
    fn polygon_geometry() {
        let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
            "properties":{"id":"P","prefix":"Q"},
            "geometry":{"type":"Polygon","coordinates":[[[0,0],[0,1],[1,1],[1,0]]]}}]}"#;
        let file = read_geojson(text).unwrap();
        assert_eq!(file.groups[0].name.as_deref(), Some("PQ1"));
        assert_eq!(file.groups[0].segments.len(), 4);
    }

    #[test]
    fn missing_prefix_aborts() {
        let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
            "properties":{"id":"P"},
            "geometry":{"type":"Polygon","coordinates":[[[0,0],[0,1],[1,1]]]}}]}"#;
        match read_geojson(text) {
            Err(Error::MissingField { record, field }) => {
                assert_eq!(record, "feature 1");
                assert_eq!(field, "properties.prefix");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn empty_prefix_aborts() {
        let text = collection(&[feature("X", "", OPEN_TRIANGLE)]);
        assert!(matches!(
            read_geojson(&text),
            Err(Error::MissingField {
                field: "properties.prefix",
                ..
            })
        ));
    }

    #[test]
    fn second_feature_failure_aborts_run() {
        let text = collection(&[
            feature("X", "Y", OPEN_TRIANGLE),
            r#"{"type":"Feature","properties":{"id":"Z","prefix":"W"},"geometry":null}"#.to_string(),
        ]);
        match read_geojson(&text) {
            Err(Error::MissingField { record, field }) => {
                assert_eq!(record, "feature 2");
                assert_eq!(field, "geometry");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn unsupported_geometry() {
        let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
            "properties":{"id":"P","prefix":"Q"},
            "geometry":{"type":"Point","coordinates":[0,0]}}]}"#;
        assert!(matches!(
            read_geojson(text),
            Err(Error::UnsupportedGeometry { kind: "Point", .. })
        ));
    }

    #[test]
    fn oversized_coordinate_aborts() {
        let text = collection(&[feature("X", "Y", "[[[[0,0],[1e300,1],[1,1]]]]")]);
        assert!(matches!(
            read_geojson(&text),
            Err(Error::InvalidNumber {
                field: "geometry.coordinates",
                ..
            })
        ));
    }

    #[test]
    fn not_a_collection() {
        let text = r#"{"type":"Point","coordinates":[0,0]}"#;
        assert!(matches!(
            read_geojson(text),
            Err(Error::MissingField {
                field: "features",
                ..
            })
        ));
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(read_geojson("{"), Err(Error::GeoJson(_))));
    }
}
