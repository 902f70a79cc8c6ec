use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::spatial::ToCoordinate;
use crate::error::{Result, ToolboxError};

/// Closed query rectangle `[min_easting, max_easting] x [min_northing, max_northing]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    min_easting: f64,
    max_easting: f64,
    min_northing: f64,
    max_northing: f64,
}

impl Extent {
    /// Create an extent. Reversed or non-finite bounds are rejected.
    pub fn new(
        min_easting: impl ToCoordinate,
        max_easting: impl ToCoordinate,
        min_northing: impl ToCoordinate,
        max_northing: impl ToCoordinate,
    ) -> Result<Self> {
        let extent = Self {
            min_easting: min_easting.to_coordinate()?,
            max_easting: max_easting.to_coordinate()?,
            min_northing: min_northing.to_coordinate()?,
            max_northing: max_northing.to_coordinate()?,
        };

        let bounds = [
            extent.min_easting,
            extent.max_easting,
            extent.min_northing,
            extent.max_northing,
        ];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(ToolboxError::InvalidExtent {
                reason: "bounds must be finite".to_string(),
            });
        }
        if extent.min_easting > extent.max_easting {
            return Err(ToolboxError::InvalidExtent {
                reason: "min easting > max easting".to_string(),
            });
        }
        if extent.min_northing > extent.max_northing {
            return Err(ToolboxError::InvalidExtent {
                reason: "min northing > max northing".to_string(),
            });
        }

        Ok(extent)
    }

    pub fn min_easting(&self) -> f64 {
        self.min_easting
    }

    pub fn max_easting(&self) -> f64 {
        self.max_easting
    }

    pub fn min_northing(&self) -> f64 {
        self.min_northing
    }

    pub fn max_northing(&self) -> f64 {
        self.max_northing
    }

    /// Inclusive on all four edges
    pub fn contains(&self, easting: f64, northing: f64) -> bool {
        self.min_easting <= easting
            && easting <= self.max_easting
            && self.min_northing <= northing
            && northing <= self.max_northing
    }

    /// Lower-left and upper-right corners
    pub fn corners(&self) -> ([f64; 2], [f64; 2]) {
        ([self.min_easting, self.min_northing], [self.max_easting, self.max_northing])
    }
}

/// Parses `min_easting,max_easting,min_northing,max_northing`
impl FromStr for Extent {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(ToolboxError::InvalidExtent {
                reason: format!("expected 4 comma separated values, found {}", parts.len()),
            });
        }
        Extent::new(parts[0], parts[1], parts[2], parts[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_edges_are_inclusive() {
        let extent = Extent::new(0.0, 10.0, 0.0, 5.0).unwrap();
        assert!(extent.contains(0.0, 0.0));
        assert!(extent.contains(10.0, 5.0));
        assert!(!extent.contains(10.0001, 5.0));
        assert!(!extent.contains(5.0, -0.1));
    }

    #[test]
    fn test_reversed_bounds_rejected() {
        let err = Extent::new(10.0, 0.0, 0.0, 5.0).unwrap_err();
        assert!(matches!(err, ToolboxError::InvalidExtent { .. }));
        assert!(Extent::new(0.0, 10.0, 6.0, 5.0).is_err());
        assert!(Extent::new(0.0, f64::NAN, 0.0, 5.0).is_err());
    }

    #[test]
    fn test_parse_extent() {
        let extent: Extent = "1179000,1195000,626000,648000".parse().unwrap();
        assert_eq!(extent.min_easting(), 1179000.0);
        assert_eq!(extent.max_northing(), 648000.0);

        assert!("1,2,3".parse::<Extent>().is_err());
        assert!(matches!(
            "a,2,3,4".parse::<Extent>().unwrap_err(),
            ToolboxError::Conversion { .. }
        ));
    }
}
