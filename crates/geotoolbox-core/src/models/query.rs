use serde::{Deserialize, Serialize};

use super::{Extent, GeoPoint};

/// Filter for point listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointQuery {
    pub attached: Option<bool>,
    pub name: Option<String>,
    pub extent: Option<Extent>,
}

impl PointQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points that are not members of any line
    pub fn unattached() -> Self {
        Self::new().attached(false)
    }

    pub fn attached(mut self, attached: bool) -> Self {
        self.attached = Some(attached);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn matches(&self, point: &GeoPoint) -> bool {
        if let Some(attached) = self.attached {
            if point.is_attached() != attached {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if point.name() != name {
                return false;
            }
        }
        if let Some(extent) = &self.extent {
            if !extent.contains(point.easting(), point.northing()) {
                return false;
            }
        }
        true
    }
}
