//! Geological point features: line nodes, outcrops, sample locations.

use geojson::{feature::Id, Feature, JsonObject};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::line::LineId;
use super::object::{IntoHorizon, IntoProperty};
use super::spatial::{Metadata, SpatialEntity, ToCoordinate};
use super::{Property, Stratigraphy};
use crate::constants::SENTINEL;
use crate::error::{Result, ToolboxError};

/// Unique identifier for a stored point
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub i64);

/// A single location with optional classification, line membership and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    id: Option<PointId>,
    spatial: SpatialEntity,
    has_z: bool,
    horizon: Option<Stratigraphy>,
    line_id: Option<LineId>,
    line_pos: i32,
    properties: BTreeMap<String, Property>,
    meta: Metadata,
}

impl GeoPoint {
    /// Create an unattached point. `None` altitude stores 0 and clears `has_z`.
    pub fn new(easting: f64, northing: f64, altitude: Option<f64>) -> Self {
        Self {
            id: None,
            spatial: SpatialEntity::new(easting, northing, altitude.unwrap_or(0.0)),
            has_z: altitude.is_some(),
            horizon: None,
            line_id: None,
            line_pos: SENTINEL,
            properties: BTreeMap::new(),
            meta: Metadata::default(),
        }
    }

    pub fn with_horizon(mut self, horizon: Option<Stratigraphy>) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.meta.set_name(name);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.meta.set_comment(comment);
        self
    }

    pub fn with_reference_system(mut self, reference: impl Into<String>) -> Self {
        self.spatial.set_reference_system(reference);
        self
    }

    pub fn id(&self) -> Option<PointId> {
        self.id
    }

    /// Record the identifier assigned by a store
    pub fn assign_id(&mut self, id: PointId) {
        self.id = Some(id);
    }

    /// Rebuild a stored point with its persisted membership.
    /// A negative `line_pos` or a missing line id leaves the point unattached.
    pub fn restored(mut self, id: PointId, line_id: Option<LineId>, line_pos: i32) -> Self {
        self.id = Some(id);
        match line_id {
            Some(line_id) if line_pos >= 0 => {
                self.line_id = Some(line_id);
                self.line_pos = line_pos;
            }
            _ => self.detach(),
        }
        self
    }

    pub fn spatial(&self) -> &SpatialEntity {
        &self.spatial
    }

    pub fn easting(&self) -> f64 {
        self.spatial.easting()
    }

    pub fn northing(&self) -> f64 {
        self.spatial.northing()
    }

    pub fn altitude(&self) -> f64 {
        self.spatial.altitude()
    }

    pub fn has_z(&self) -> bool {
        self.has_z
    }

    pub fn reference_system(&self) -> &str {
        self.spatial.reference_system()
    }

    /// Coordinates used for every equality test: altitude counts as 0 without z
    pub fn effective_coordinates(&self) -> [f64; 3] {
        let altitude = if self.has_z { self.spatial.altitude() } else { 0.0 };
        [self.spatial.easting(), self.spatial.northing(), altitude]
    }

    pub fn set_easting(&mut self, value: impl ToCoordinate) -> Result<()> {
        self.spatial.set_easting(value)
    }

    pub fn set_northing(&mut self, value: impl ToCoordinate) -> Result<()> {
        self.spatial.set_northing(value)
    }

    /// Stores the altitude only; call [`GeoPoint::use_z`] to make it count
    pub fn set_altitude(&mut self, value: impl ToCoordinate) -> Result<()> {
        self.spatial.set_altitude(value)
    }

    pub fn set_reference_system(&mut self, reference: impl Into<String>) {
        self.spatial.set_reference_system(reference);
    }

    /// Removes the z value: altitude becomes 0 and `has_z` false
    pub fn drop_z(&mut self) {
        self.spatial.set_altitude(0.0).ok();
        self.has_z = false;
    }

    /// Uses the stored altitude as z coordinate
    pub fn use_z(&mut self) {
        self.has_z = true;
    }

    pub fn horizon(&self) -> Option<&Stratigraphy> {
        self.horizon.as_ref()
    }

    /// Clearing the horizon leaves line membership untouched
    pub fn set_horizon(&mut self, horizon: impl IntoHorizon) -> Result<()> {
        self.horizon = horizon.into_horizon()?;
        Ok(())
    }

    pub fn line_id(&self) -> Option<LineId> {
        self.line_id
    }

    /// Ordinal inside the owning line, -1 when unattached
    pub fn line_pos(&self) -> i32 {
        self.line_pos
    }

    pub fn is_attached(&self) -> bool {
        self.line_pos != SENTINEL
    }

    pub(crate) fn attach(&mut self, line_id: Option<LineId>, position: usize) {
        self.line_id = line_id;
        self.line_pos = i32::try_from(position).unwrap_or(i32::MAX);
    }

    pub(crate) fn propagate_horizon(&mut self, horizon: &Option<Stratigraphy>) {
        self.horizon.clone_from(horizon);
    }

    pub(crate) fn detach(&mut self) {
        self.line_id = None;
        self.line_pos = SENTINEL;
    }

    /// Properties ordered by name
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Adds a property. A property with the same name is replaced and returned.
    pub fn add_property(&mut self, property: impl IntoProperty) -> Result<Option<Property>> {
        let property = property.into_property()?;
        Ok(self.properties.insert(property.name().to_string(), property))
    }

    /// Removes an attached property equal to `property`. Name, value and unit must match.
    pub fn remove_property(&mut self, property: impl IntoProperty) -> Result<Property> {
        let property = property.into_property()?;
        if self.properties.get(property.name()) == Some(&property) {
            if let Some(removed) = self.properties.remove(property.name()) {
                return Ok(removed);
            }
        }

        let id = self.id.map(|id| id.0.to_string()).unwrap_or_else(|| "-".to_string());
        Err(ToolboxError::not_found(format!(
            "property {} = {} {} on point {}",
            property.name(),
            property.value(),
            property.unit(),
            id
        )))
    }

    pub fn name(&self) -> &str {
        self.meta.name()
    }

    pub fn comment(&self) -> &str {
        self.meta.comment()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.meta.set_name(name);
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.meta.set_comment(comment);
    }

    /// Position as GeoJSON ordinates, with altitude only when `has_z`
    pub fn position(&self) -> Vec<f64> {
        if self.has_z {
            vec![self.easting(), self.northing(), self.altitude()]
        } else {
            vec![self.easting(), self.northing()]
        }
    }

    /// Convert to a GeoJSON point feature carrying name, horizon and properties
    pub fn to_geojson(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), self.name().into());
        properties.insert(
            "horizon".to_string(),
            self.horizon.as_ref().map(|h| h.name().to_string()).into(),
        );
        if self.is_attached() {
            properties.insert("line_pos".to_string(), self.line_pos.into());
        }
        for property in self.properties.values() {
            properties.insert(property.name().to_string(), property.value().into());
        }

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(self.position()))),
            id: self.id.map(|id| Id::Number(id.0.into())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map(|id| id.0.to_string()).unwrap_or_else(|| "-".to_string());
        let horizon = self.horizon.as_ref().map(|h| h.name()).unwrap_or("");
        let line = self.line_id.map(|id| id.0).unwrap_or(SENTINEL as i64);
        write!(
            f,
            "[{}] {} - {} - {}: {} / {} / {}",
            id,
            horizon,
            line,
            self.line_pos,
            self.easting(),
            self.northing(),
            self.altitude()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoObject;

    #[test]
    fn test_new_point_defaults() {
        let point = GeoPoint::new(1234134.0, 5465462.0, Some(123.0));
        assert!(point.has_z());
        assert_eq!(point.altitude(), 123.0);
        assert_eq!(point.line_pos(), -1);
        assert!(!point.is_attached());
        assert!(point.id().is_none());

        let flat = GeoPoint::new(1265469.0, 5467929.0, None);
        assert!(!flat.has_z());
        assert_eq!(flat.altitude(), 0.0);
    }

    #[test]
    fn test_effective_coordinates_ignore_altitude_without_z() {
        let mut point = GeoPoint::new(1.0, 2.0, None);
        point.set_altitude(300.0).unwrap();
        assert_eq!(point.altitude(), 300.0);
        assert_eq!(point.effective_coordinates(), [1.0, 2.0, 0.0]);

        point.use_z();
        assert_eq!(point.effective_coordinates(), [1.0, 2.0, 300.0]);
    }

    #[test]
    fn test_drop_z_and_use_z_are_idempotent() {
        let mut point = GeoPoint::new(1.0, 2.0, Some(5.0));
        point.drop_z();
        point.drop_z();
        assert!(!point.has_z());
        assert_eq!(point.altitude(), 0.0);

        point.set_altitude(7.0).unwrap();
        point.use_z();
        point.use_z();
        assert!(point.has_z());
        assert_eq!(point.altitude(), 7.0);
    }

    #[test]
    fn test_coordinate_conversion_error() {
        let mut point = GeoPoint::new(1.0, 2.0, None);
        let err = point.set_easting("east").unwrap_err();
        assert!(matches!(err, ToolboxError::Conversion { .. }));
        assert_eq!(point.easting(), 1.0);

        point.set_easting("3.25").unwrap();
        point.set_northing(4_i64).unwrap();
        assert_eq!(point.easting(), 3.25);
        assert_eq!(point.northing(), 4.0);
    }

    #[test]
    fn test_set_horizon_rejects_other_objects() {
        let mut point = GeoPoint::new(1.0, 2.0, None).with_horizon(Some(Stratigraphy::named("mu")));
        let err = point.set_horizon(GeoObject::from(Property::new("t", 1.0, "m"))).unwrap_err();
        assert!(matches!(err, ToolboxError::TypeMismatch { .. }));
        assert_eq!(point.horizon().unwrap().name(), "mu");

        point.set_horizon(None).unwrap();
        assert!(point.horizon().is_none());
    }

    #[test]
    fn test_properties_are_unique_and_ordered_by_name() {
        let mut point = GeoPoint::new(1.0, 2.0, None);
        assert!(point.add_property(Property::new("thickness", 12.0, "m")).unwrap().is_none());
        point.add_property(Property::new("dip", 30.0, "deg")).unwrap();
        let previous = point.add_property(Property::new("thickness", 14.0, "m")).unwrap();
        assert_eq!(previous.unwrap().value(), 12.0);

        let names: Vec<&str> = point.properties().map(|p| p.name()).collect();
        assert_eq!(names, vec!["dip", "thickness"]);
        assert_eq!(point.property("thickness").unwrap().value(), 14.0);
    }

    #[test]
    fn test_remove_property() {
        let mut point = GeoPoint::new(1.0, 2.0, None);
        point.add_property(Property::new("dip", 30.0, "deg")).unwrap();

        let err = point.remove_property(Property::new("strike", 0.0, "deg")).unwrap_err();
        assert!(matches!(err, ToolboxError::NotFound { .. }));

        let err = point.remove_property(GeoObject::from(GeoPoint::new(0.0, 0.0, None)));
        assert!(matches!(err.unwrap_err(), ToolboxError::TypeMismatch { .. }));

        let removed = point.remove_property(Property::new("dip", 30.0, "deg")).unwrap();
        assert_eq!(removed.value(), 30.0);
        assert_eq!(point.properties().count(), 0);
    }

    #[test]
    fn test_remove_property_needs_equal_value() {
        let mut point = GeoPoint::new(1.0, 2.0, None);
        point.add_property(Property::new("dip", 30.0, "deg")).unwrap();

        let err = point.remove_property(Property::new("dip", 99.0, "deg")).unwrap_err();
        assert!(matches!(err, ToolboxError::NotFound { .. }));
        let err = point.remove_property(Property::new("dip", 30.0, "grad")).unwrap_err();
        assert!(matches!(err, ToolboxError::NotFound { .. }));

        assert_eq!(point.properties().count(), 1);
        assert_eq!(point.property("dip").unwrap().value(), 30.0);
    }

    #[test]
    fn test_geojson_feature() {
        let mut point = GeoPoint::new(115.0, -8.5, None).with_name("outcrop");
        point.assign_id(PointId(7));
        point.add_property(Property::new("thickness", 2.5, "m")).unwrap();

        let feature = point.to_geojson();
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["geometry"]["type"], "Point");
        assert_eq!(json["geometry"]["coordinates"], serde_json::json!([115.0, -8.5]));
        assert_eq!(json["id"], 7);
        assert_eq!(json["properties"]["name"], "outcrop");
        assert_eq!(json["properties"]["thickness"], 2.5);
    }

    #[test]
    fn test_restored_membership() {
        let point = GeoPoint::new(1.0, 1.0, None).restored(PointId(3), Some(LineId(2)), 4);
        assert_eq!(point.id(), Some(PointId(3)));
        assert_eq!(point.line_id(), Some(LineId(2)));
        assert_eq!(point.line_pos(), 4);

        let loose = GeoPoint::new(1.0, 1.0, None).restored(PointId(4), Some(LineId(2)), -1);
        assert!(!loose.is_attached());
        assert!(loose.line_id().is_none());
    }
}
