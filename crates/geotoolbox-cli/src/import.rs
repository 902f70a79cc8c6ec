//! GeoJSON reader for line imports

use anyhow::{bail, Context, Result};
use geojson::{Feature, GeoJson, Geometry, Value};
use geotoolbox_core::GeoPoint;

/// A line read from GeoJSON, not yet classified or stored
#[derive(Debug)]
pub struct ImportedLine {
    pub name: String,
    pub horizon: Option<String>,
    pub closed: bool,
    pub points: Vec<GeoPoint>,
}

/// Geometries that cannot become a line
#[derive(Debug, Default)]
pub struct Skipped {
    pub kinds: Vec<&'static str>,
}

/// Read every LineString, MultiLineString and Polygon exterior ring.
///
/// `name` and `horizon` come from the feature properties. Polygons import as
/// closed lines; the repeated last ring position is folded by the line itself.
pub fn read_lines(content: &str, reference_system: &str) -> Result<(Vec<ImportedLine>, Skipped)> {
    let geojson: GeoJson = content.parse().context("Failed to parse GeoJSON")?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature::from(geometry)],
    };

    let mut lines = Vec::new();
    let mut skipped = Skipped::default();

    for (index, feature) in features.iter().enumerate() {
        let name = string_property(feature, "name").unwrap_or_default();
        let horizon = string_property(feature, "horizon");

        let Some(geometry) = &feature.geometry else {
            skipped.kinds.push("empty feature");
            continue;
        };

        for (closed, ring) in rings(geometry, &mut skipped) {
            let points = ring
                .iter()
                .map(|position| to_point(position, reference_system))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Invalid coordinates in feature {}", index))?;

            lines.push(ImportedLine { name: name.clone(), horizon: horizon.clone(), closed, points });
        }
    }

    tracing::debug!(lines = lines.len(), skipped = skipped.kinds.len(), "Read GeoJSON");
    Ok((lines, skipped))
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature.property(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn rings<'a>(geometry: &'a Geometry, skipped: &mut Skipped) -> Vec<(bool, &'a Vec<Vec<f64>>)> {
    match &geometry.value {
        Value::LineString(positions) => vec![(false, positions)],
        Value::MultiLineString(parts) => parts.iter().map(|p| (false, p)).collect(),
        Value::Polygon(polygon) => polygon.first().map(|ring| (true, ring)).into_iter().collect(),
        Value::MultiPolygon(polygons) => {
            polygons.iter().filter_map(|p| p.first()).map(|ring| (true, ring)).collect()
        }
        Value::GeometryCollection(geometries) => {
            geometries.iter().flat_map(|g| rings(g, skipped)).collect()
        }
        Value::Point(_) => {
            skipped.kinds.push("Point");
            Vec::new()
        }
        Value::MultiPoint(_) => {
            skipped.kinds.push("MultiPoint");
            Vec::new()
        }
    }
}

fn to_point(position: &[f64], reference_system: &str) -> Result<GeoPoint> {
    let point = match *position {
        [easting, northing] => GeoPoint::new(easting, northing, None),
        [easting, northing, altitude, ..] => GeoPoint::new(easting, northing, Some(altitude)),
        _ => bail!("position needs at least 2 ordinates, found {}", position.len()),
    };
    Ok(point.with_reference_system(reference_system))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotoolbox_core::{OrderedLine, Stratigraphy};

    const REFERENCE: &str = "EPSG:2056";

    #[test]
    fn test_read_feature_collection() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Fault_1", "horizon": "mu"},
                    "geometry": {"type": "LineString", "coordinates": [[0, 0, 10], [1, 1, 12]]}
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": [5, 5]}
                }
            ]
        }"#;

        let (lines, skipped) = read_lines(content, REFERENCE).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(skipped.kinds, vec!["Point"]);

        let line = &lines[0];
        assert_eq!(line.name, "Fault_1");
        assert_eq!(line.horizon.as_deref(), Some("mu"));
        assert!(!line.closed);
        assert!(line.points.iter().all(|p| p.has_z()));
        assert_eq!(line.points[1].altitude(), 12.0);
        assert_eq!(line.points[0].reference_system(), REFERENCE);
    }

    #[test]
    fn test_polygon_ring_folds_into_closed_line() {
        let content = r#"{
            "type": "Polygon",
            "coordinates": [[[0, 0], [4, 0], [4, 4], [0, 0]], [[1, 1], [2, 1], [1, 1]]]
        }"#;

        let (mut lines, _) = read_lines(content, REFERENCE).unwrap();
        assert_eq!(lines.len(), 1);

        let imported = lines.remove(0);
        assert!(imported.closed);
        assert!(!imported.points[0].has_z());

        let line = OrderedLine::new(imported.closed, None::<Stratigraphy>, imported.points).unwrap();
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn test_multilinestring_yields_one_line_per_part() {
        let content = r#"{
            "type": "Feature",
            "properties": {"name": "Contacts"},
            "geometry": {"type": "MultiLineString", "coordinates": [[[0, 0], [1, 0]], [[5, 5], [6, 6]]]}
        }"#;

        let (lines, _) = read_lines(content, REFERENCE).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.name == "Contacts" && l.horizon.is_none()));
    }

    #[test]
    fn test_invalid_geojson_fails() {
        assert!(read_lines("{\"type\": \"Nonsense\"}", REFERENCE).is_err());
        assert!(read_lines("not json", REFERENCE).is_err());
    }
}
