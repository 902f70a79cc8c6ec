//! GeoToolbox Store - Persistence adapters
//!
//! This crate provides the in-memory and PostgreSQL implementations of the
//! storage ports defined in `geotoolbox_core::ports`.

pub mod index;
pub mod memory;
pub mod postgres;

pub use memory::MemoryGeoStore;
pub use postgres::{PostgresConfig, PostgresStore};
