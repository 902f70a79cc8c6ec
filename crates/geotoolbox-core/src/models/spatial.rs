//! Coordinate and naming aggregates shared by points and lines.
//!
//! Points embed a [`SpatialEntity`]; both points and lines embed a
//! [`Metadata`] record. Neither is a base type, they are plain values.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_NAME_LEN, STANDARD_REFERENCE_SYSTEM};
use crate::error::{Result, ToolboxError};

/// Anything that can be turned into a floating point coordinate
pub trait ToCoordinate {
    fn to_coordinate(&self) -> Result<f64>;
}

macro_rules! numeric_coordinate {
    ($($ty:ty),*) => {
        $(
            impl ToCoordinate for $ty {
                fn to_coordinate(&self) -> Result<f64> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

numeric_coordinate!(f64, f32, i32, i64, u32, u64);

impl ToCoordinate for &str {
    fn to_coordinate(&self) -> Result<f64> {
        self.trim().parse::<f64>().map_err(|_| ToolboxError::Conversion {
            value: self.to_string(),
            target: "f64",
        })
    }
}

impl ToCoordinate for String {
    fn to_coordinate(&self) -> Result<f64> {
        self.as_str().to_coordinate()
    }
}

/// Easting, northing, altitude and an opaque reference system string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialEntity {
    easting: f64,
    northing: f64,
    altitude: f64,
    reference_system: String,
}

impl Default for SpatialEntity {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl SpatialEntity {
    /// Create a location in the standard reference system
    pub fn new(easting: f64, northing: f64, altitude: f64) -> Self {
        Self {
            easting,
            northing,
            altitude,
            reference_system: STANDARD_REFERENCE_SYSTEM.to_string(),
        }
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// The reference system exactly as it was stored. It is never parsed.
    pub fn reference_system(&self) -> &str {
        &self.reference_system
    }

    pub fn set_easting(&mut self, value: impl ToCoordinate) -> Result<()> {
        self.easting = value.to_coordinate()?;
        Ok(())
    }

    pub fn set_northing(&mut self, value: impl ToCoordinate) -> Result<()> {
        self.northing = value.to_coordinate()?;
        Ok(())
    }

    pub fn set_altitude(&mut self, value: impl ToCoordinate) -> Result<()> {
        self.altitude = value.to_coordinate()?;
        Ok(())
    }

    pub fn set_reference_system(&mut self, reference: impl Into<String>) {
        self.reference_system = reference.into();
    }
}

/// Name and comment carried by every persisted entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    name: String,
    comment: String,
}

impl Metadata {
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        let mut meta = Self::default();
        meta.set_name(name);
        meta.set_comment(comment);
        meta
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Longer names are cut to 100 characters
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = truncate(name.into(), MAX_NAME_LEN);
    }

    /// Longer comments are cut to 100 characters
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = truncate(comment.into(), MAX_NAME_LEN);
    }
}

pub(crate) fn truncate(value: String, max: usize) -> String {
    if value.chars().count() <= max {
        value
    } else {
        value.chars().take(max).collect()
    }
}
