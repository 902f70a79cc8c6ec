use serde::{Deserialize, Serialize};

use super::spatial::truncate;
use crate::constants::MAX_NAME_LEN;

/// A named measurement attached to a point, e.g. a thickness in metres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    name: String,
    value: f64,
    unit: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: truncate(name.into(), MAX_NAME_LEN),
            value,
            unit: unit.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}
