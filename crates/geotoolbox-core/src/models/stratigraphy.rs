use serde::{Deserialize, Serialize};
use std::fmt;

use super::spatial::{truncate, ToCoordinate};
use crate::constants::MAX_HORIZON_NAME_LEN;
use crate::error::Result;

/// Unique identifier for a stratigraphic unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HorizonId(pub i64);

/// A stratigraphic horizon, the classification shared by a line and its points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stratigraphy {
    id: Option<HorizonId>,
    name: String,
    age: f64,
}

impl Stratigraphy {
    /// Create an unsaved unit. Negative ages mean "unknown" and are stored as -1.
    pub fn new(name: impl Into<String>, age: f64) -> Self {
        Self {
            id: None,
            name: truncate(name.into(), MAX_HORIZON_NAME_LEN),
            age: normalize_age(age),
        }
    }

    /// Create a unit without a known age
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, -1.0)
    }

    pub fn id(&self) -> Option<HorizonId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = truncate(name.into(), MAX_HORIZON_NAME_LEN);
    }

    pub fn set_age(&mut self, age: impl ToCoordinate) -> Result<()> {
        self.age = normalize_age(age.to_coordinate()?);
        Ok(())
    }

    /// Record the identifier assigned by a store
    pub fn assign_id(&mut self, id: HorizonId) {
        self.id = Some(id);
    }
}

fn normalize_age(age: f64) -> f64 {
    if age < 0.0 {
        -1.0
    } else {
        age
    }
}

impl fmt::Display for Stratigraphy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "horizon [{}]: name='{}', age='{}'", id.0, self.name, self.age),
            None => write!(f, "horizon [-]: name='{}', age='{}'", self.name, self.age),
        }
    }
}
