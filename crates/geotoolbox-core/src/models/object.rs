//! Tagged union over every entity kind and the checked conversions out of it.
//!
//! Callers that hold heterogeneous entities (an import pipeline, a scripting
//! front end) pass `GeoObject`s into the typed APIs; the `Into*` traits reject
//! the wrong variant with [`ToolboxError::TypeMismatch`] before anything is
//! mutated.

use serde::{Deserialize, Serialize};

use super::{GeoPoint, OrderedLine, Property, Stratigraphy};
use crate::error::{Result, ToolboxError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeoObject {
    Point(GeoPoint),
    Line(OrderedLine),
    Horizon(Stratigraphy),
    Property(Property),
}

impl GeoObject {
    /// Name of the contained entity type
    pub fn kind(&self) -> &'static str {
        match self {
            GeoObject::Point(_) => "GeoPoint",
            GeoObject::Line(_) => "OrderedLine",
            GeoObject::Horizon(_) => "Stratigraphy",
            GeoObject::Property(_) => "Property",
        }
    }
}

impl From<GeoPoint> for GeoObject {
    fn from(point: GeoPoint) -> Self {
        GeoObject::Point(point)
    }
}

impl From<OrderedLine> for GeoObject {
    fn from(line: OrderedLine) -> Self {
        GeoObject::Line(line)
    }
}

impl From<Stratigraphy> for GeoObject {
    fn from(horizon: Stratigraphy) -> Self {
        GeoObject::Horizon(horizon)
    }
}

impl From<Property> for GeoObject {
    fn from(property: Property) -> Self {
        GeoObject::Property(property)
    }
}

/// Values accepted where a point is required
pub trait IntoPoint {
    fn into_point(self) -> Result<GeoPoint>;
}

impl IntoPoint for GeoPoint {
    fn into_point(self) -> Result<GeoPoint> {
        Ok(self)
    }
}

impl IntoPoint for GeoObject {
    fn into_point(self) -> Result<GeoPoint> {
        match self {
            GeoObject::Point(point) => Ok(point),
            other => Err(ToolboxError::TypeMismatch { expected: "GeoPoint", found: other.kind() }),
        }
    }
}

/// Values accepted where an optional classification is required
pub trait IntoHorizon {
    fn into_horizon(self) -> Result<Option<Stratigraphy>>;
}

impl IntoHorizon for Stratigraphy {
    fn into_horizon(self) -> Result<Option<Stratigraphy>> {
        Ok(Some(self))
    }
}

impl IntoHorizon for Option<Stratigraphy> {
    fn into_horizon(self) -> Result<Option<Stratigraphy>> {
        Ok(self)
    }
}

impl IntoHorizon for GeoObject {
    fn into_horizon(self) -> Result<Option<Stratigraphy>> {
        match self {
            GeoObject::Horizon(horizon) => Ok(Some(horizon)),
            other => {
                Err(ToolboxError::TypeMismatch { expected: "Stratigraphy", found: other.kind() })
            }
        }
    }
}

/// Values accepted where a point property is required
pub trait IntoProperty {
    fn into_property(self) -> Result<Property>;
}

impl IntoProperty for Property {
    fn into_property(self) -> Result<Property> {
        Ok(self)
    }
}

impl IntoProperty for GeoObject {
    fn into_property(self) -> Result<Property> {
        match self {
            GeoObject::Property(property) => Ok(property),
            other => Err(ToolboxError::TypeMismatch { expected: "Property", found: other.kind() }),
        }
    }
}
