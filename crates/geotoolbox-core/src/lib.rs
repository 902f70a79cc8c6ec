//! GeoToolbox Core - Geological points, ordered lines and their integrity rules
//!
//! This crate contains the domain model, the ordered-line integrity engine and
//! the storage port definitions used by the adapters in `geotoolbox-store`.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod ports;
pub mod queries;

pub use error::{Result, ToolboxError};
pub use models::{
    Extent, GeoObject, GeoPoint, HorizonId, LineId, OrderedLine, PointId, Property, SpatialEntity,
    Stratigraphy,
};
