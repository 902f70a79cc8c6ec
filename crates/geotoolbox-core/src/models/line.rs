//! Ordered geological lines (faults, horizon traces) and their integrity engine.
//!
//! Every structural mutation re-runs the same normalisation pipeline before it
//! returns:
//!
//! 1. drop a point when it repeats the coordinates of its predecessor,
//! 2. fold an equal first/last pair into a closed line,
//! 3. renumber `line_pos` densely from 0,
//! 4. copy the line's stratigraphy onto every member.
//!
//! Coordinates are compared through [`GeoPoint::effective_coordinates`], so
//! the altitude of a point without z never makes two points differ.

use geojson::{feature::Id, Feature, JsonObject};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::object::{IntoHorizon, IntoPoint};
use super::spatial::{Metadata, SpatialEntity, ToCoordinate};
use super::{GeoPoint, Stratigraphy};
use crate::constants::FLOAT_PRECISION;
use crate::error::{Result, ToolboxError};

/// Unique identifier for a stored line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineId(pub i64);

/// An ordered sequence of points sharing one stratigraphy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedLine {
    id: Option<LineId>,
    closed: bool,
    horizon: Option<Stratigraphy>,
    points: Vec<GeoPoint>,
    meta: Metadata,
}

impl OrderedLine {
    /// Build a line from candidate points.
    ///
    /// Every candidate is checked before the line exists, so a
    /// [`ToolboxError::TypeMismatch`] never leaves a half-built line behind.
    pub fn new<P: IntoPoint>(
        closed: bool,
        horizon: impl IntoHorizon,
        points: Vec<P>,
    ) -> Result<Self> {
        let horizon = horizon.into_horizon()?;
        let points = convert_points(points)?;

        let mut line = Self { id: None, closed, horizon, points, meta: Metadata::default() };
        line.normalize();
        Ok(line)
    }

    /// Rebuild a stored line. Points must already be in `line_pos` order.
    ///
    /// Stored lines were normalised when saved, so only ordinals and the
    /// stratigraphy are re-applied.
    pub fn restore(
        id: LineId,
        closed: bool,
        horizon: Option<Stratigraphy>,
        points: Vec<GeoPoint>,
    ) -> Self {
        let mut line = Self { id: Some(id), closed, horizon, points, meta: Metadata::default() };
        line.reassign_ordinals();
        line.propagate_horizon();
        line
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.meta.set_name(name);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.meta.set_comment(comment);
        self
    }

    pub fn id(&self) -> Option<LineId> {
        self.id
    }

    /// Record the identifier assigned by a store and stamp it on every member
    pub fn assign_id(&mut self, id: LineId) {
        self.id = Some(id);
        self.reassign_ordinals();
    }

    /// Record the identifier a store assigned to the member at `index`
    pub fn assign_point_id(&mut self, index: usize, id: super::PointId) -> Result<()> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or_else(|| ToolboxError::not_found(format!("point index {index} of {len}")))?;
        point.assign_id(id);
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn horizon(&self) -> Option<&Stratigraphy> {
        self.horizon.as_ref()
    }

    /// Replace the stratigraphy and copy it onto all members.
    ///
    /// Membership does not change, so duplicate and closure checks are skipped.
    pub fn set_horizon(&mut self, horizon: impl IntoHorizon) -> Result<()> {
        self.horizon = horizon.into_horizon()?;
        self.propagate_horizon();
        Ok(())
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last node of the line
    pub fn endpoints(&self) -> Option<(&SpatialEntity, &SpatialEntity)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.spatial(), last.spatial())),
            _ => None,
        }
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

    /// Insert one point. Positions past the end append.
    pub fn insert_point(&mut self, point: impl IntoPoint, position: usize) -> Result<()> {
        let point = point.into_point()?;
        let position = position.min(self.points.len());
        self.points.insert(position, point);
        self.normalize();
        Ok(())
    }

    /// Insert several points keeping their order. Positions past the end append.
    ///
    /// All candidates are converted before the line is touched.
    pub fn insert_points<P: IntoPoint>(&mut self, points: Vec<P>, position: usize) -> Result<()> {
        let points = convert_points(points)?;
        if position >= self.points.len() {
            self.points.extend(points);
        } else {
            self.points.splice(position..position, points);
        }
        self.normalize();
        Ok(())
    }

    /// Current ordinal of `point`
    pub fn index_of(&self, point: &GeoPoint) -> Result<usize> {
        self.points
            .iter()
            .position(|member| member == point)
            .ok_or_else(|| ToolboxError::not_found(format!("point {point} in line")))
    }

    /// Remove a member and return it detached from the line
    pub fn delete_point(&mut self, point: impl IntoPoint) -> Result<GeoPoint> {
        let point = point.into_point()?;
        let index = self.index_of(&point)?;
        let removed = self.points.remove(index);
        self.normalize();
        Ok(detached(removed))
    }

    /// Remove the first point at the given coordinates, within 1 mm
    pub fn delete_by_coordinates(
        &mut self,
        easting: impl ToCoordinate,
        northing: impl ToCoordinate,
        altitude: impl ToCoordinate,
    ) -> Result<GeoPoint> {
        self.delete_by_coordinates_within(easting, northing, altitude, FLOAT_PRECISION)
    }

    /// Remove the first point whose coordinates differ by less than `tolerance`.
    ///
    /// Altitude is not compared for points without z. The scan runs over a
    /// snapshot of the coordinates; if nothing matches the line is unchanged.
    pub fn delete_by_coordinates_within(
        &mut self,
        easting: impl ToCoordinate,
        northing: impl ToCoordinate,
        altitude: impl ToCoordinate,
        tolerance: f64,
    ) -> Result<GeoPoint> {
        let easting = easting.to_coordinate()?;
        let northing = northing.to_coordinate()?;
        let altitude = altitude.to_coordinate()?;

        let snapshot: Vec<(f64, f64, f64, bool)> = self
            .points
            .iter()
            .map(|p| (p.easting(), p.northing(), p.altitude(), p.has_z()))
            .collect();

        let index = snapshot.iter().position(|&(e, n, a, has_z)| {
            (e - easting).abs() < tolerance
                && (n - northing).abs() < tolerance
                && (!has_z || (a - altitude).abs() < tolerance)
        });

        match index {
            Some(index) => {
                let removed = self.points.remove(index);
                self.normalize();
                Ok(detached(removed))
            }
            None => Err(ToolboxError::not_found(format!(
                "point with coordinates {easting}/{northing}/{altitude}"
            ))),
        }
    }

    /// Run the full pipeline. A normalised line is a fixed point.
    pub fn normalize(&mut self) {
        self.remove_adjacent_duplicates();
        self.fold_closure();
        self.reassign_ordinals();
        self.propagate_horizon();
    }

    /// Single pass: each point is compared with its predecessor in the pre-pass
    /// order, so runs collapse but `A, B, A` stays as it is.
    fn remove_adjacent_duplicates(&mut self) {
        let mut previous: Option<[f64; 3]> = None;
        self.points.retain(|point| {
            let current = point.effective_coordinates();
            let keep = previous != Some(current);
            previous = Some(current);
            keep
        });
    }

    /// Equal first and last points close the line. A singleton is never folded.
    fn fold_closure(&mut self) {
        if self.points.len() < 2 {
            return;
        }
        let first = self.points[0].effective_coordinates();
        let last = self.points[self.points.len() - 1].effective_coordinates();
        if first == last {
            self.points.pop();
            self.closed = true;
        }
    }

    fn reassign_ordinals(&mut self) {
        let id = self.id;
        for (position, point) in self.points.iter_mut().enumerate() {
            point.attach(id, position);
        }
    }

    fn propagate_horizon(&mut self) {
        for point in &mut self.points {
            point.propagate_horizon(&self.horizon);
        }
    }

    /// Convert to a GeoJSON feature: a LineString, or a Polygon ring when closed
    pub fn to_geojson(&self) -> Feature {
        let mut positions: Vec<Vec<f64>> = self.points.iter().map(|p| p.position()).collect();

        let value = if self.closed && positions.len() > 2 {
            positions.push(positions[0].clone());
            geojson::Value::Polygon(vec![positions])
        } else {
            geojson::Value::LineString(positions)
        };

        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), self.name().into());
        properties.insert("closed".to_string(), self.closed.into());
        properties.insert(
            "horizon".to_string(),
            self.horizon.as_ref().map(|h| h.name().to_string()).into(),
        );

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(value)),
            id: self.id.map(|id| Id::Number(id.0.into())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

fn convert_points<P: IntoPoint>(points: Vec<P>) -> Result<Vec<GeoPoint>> {
    points.into_iter().map(IntoPoint::into_point).collect()
}

fn detached(mut point: GeoPoint) -> GeoPoint {
    point.detach();
    point
}

impl fmt::Display for OrderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map(|id| id.0.to_string()).unwrap_or_else(|| "-".to_string());
        let horizon = self.horizon.as_ref().map(|h| h.name()).unwrap_or("");
        write!(
            f,
            "[{}] {} - {} - {} points",
            id,
            if self.closed { "closed" } else { "not closed" },
            horizon,
            self.points.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoObject, PointId, Property};

    fn flat(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
        coords.iter().map(|&(e, n)| GeoPoint::new(e, n, None)).collect()
    }

    fn coords(line: &OrderedLine) -> Vec<(f64, f64)> {
        line.points().iter().map(|p| (p.easting(), p.northing())).collect()
    }

    fn positions(line: &OrderedLine) -> Vec<i32> {
        line.points().iter().map(|p| p.line_pos()).collect()
    }

    #[test]
    fn test_adjacent_duplicate_removed() {
        let line =
            OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0)])).unwrap();
        assert_eq!(coords(&line), vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(!line.is_closed());
        assert_eq!(positions(&line), vec![0, 1]);
    }

    #[test]
    fn test_equal_endpoints_close_the_line() {
        let line =
            OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)])).unwrap();
        assert_eq!(coords(&line), vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(line.is_closed());
    }

    #[test]
    fn test_singleton_line_is_left_alone() {
        let line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(5.0, 5.0)])).unwrap();
        assert_eq!(coords(&line), vec![(5.0, 5.0)]);
        assert!(!line.is_closed());
        assert_eq!(positions(&line), vec![0]);

        let empty = OrderedLine::new(true, None::<Stratigraphy>, Vec::<GeoPoint>::new()).unwrap();
        assert!(empty.is_empty());
        assert!(empty.is_closed());
    }

    #[test]
    fn test_two_equal_points_collapse_to_singleton() {
        let line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(5.0, 5.0), (5.0, 5.0)])).unwrap();
        assert_eq!(coords(&line), vec![(5.0, 5.0)]);
        assert!(!line.is_closed());
    }

    #[test]
    fn test_separated_duplicates_are_kept() {
        let line = OrderedLine::new(
            false,
            None::<Stratigraphy>,
            flat(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0), (2.0, 2.0)]),
        )
        .unwrap();
        assert_eq!(line.len(), 4);
    }

    #[test]
    fn test_runs_collapse_in_one_pass() {
        let line = OrderedLine::new(
            false,
            None::<Stratigraphy>,
            flat(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (2.0, 2.0)]),
        )
        .unwrap();
        assert_eq!(coords(&line), vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn test_altitude_without_z_does_not_count() {
        let mut high = GeoPoint::new(1.0, 1.0, None);
        high.set_altitude(500.0).unwrap();
        let line =
            OrderedLine::new(false, None::<Stratigraphy>, vec![GeoPoint::new(1.0, 1.0, None), high]).unwrap();
        assert_eq!(line.len(), 1);

        let line = OrderedLine::new(
            false,
            None::<Stratigraphy>,
            vec![GeoPoint::new(1.0, 1.0, Some(10.0)), GeoPoint::new(1.0, 1.0, Some(20.0))],
        )
        .unwrap();
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_construction_rejects_non_points() {
        let candidates = vec![
            GeoObject::from(GeoPoint::new(0.0, 0.0, None)),
            GeoObject::from(Stratigraphy::named("mu")),
        ];
        let err = OrderedLine::new(false, None::<Stratigraphy>, candidates).unwrap_err();
        assert!(matches!(err, ToolboxError::TypeMismatch { expected: "GeoPoint", .. }));
    }

    #[test]
    fn test_horizon_propagates_to_members() {
        let mut line = OrderedLine::new(
            false,
            Stratigraphy::new("mu", 3.0),
            vec![
                GeoPoint::new(0.0, 0.0, None).with_horizon(Some(Stratigraphy::named("so"))),
                GeoPoint::new(1.0, 0.0, None),
            ],
        )
        .unwrap();
        assert!(line.points().iter().all(|p| p.horizon().unwrap().name() == "mu"));

        line.set_horizon(Stratigraphy::named("mm")).unwrap();
        assert!(line.points().iter().all(|p| p.horizon() == line.horizon()));

        line.set_horizon(None::<Stratigraphy>).unwrap();
        assert!(line.points().iter().all(|p| p.horizon().is_none()));
        assert!(line.points().iter().all(|p| p.is_attached()));
    }

    #[test]
    fn test_set_horizon_type_mismatch_keeps_state() {
        let mut line =
            OrderedLine::new(false, Stratigraphy::named("mu"), flat(&[(0.0, 0.0)])).unwrap();
        let err = line.set_horizon(GeoObject::from(Property::new("dip", 1.0, "deg")));
        assert!(err.is_err());
        assert_eq!(line.horizon().unwrap().name(), "mu");
    }

    #[test]
    fn test_insert_point() {
        let mut line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (2.0, 0.0)])).unwrap();
        line.insert_point(GeoPoint::new(1.0, 0.0, None), 1).unwrap();
        assert_eq!(coords(&line), vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(positions(&line), vec![0, 1, 2]);

        line.insert_point(GeoPoint::new(3.0, 0.0, None), 99).unwrap();
        assert_eq!(coords(&line).last(), Some(&(3.0, 0.0)));
    }

    #[test]
    fn test_insert_point_duplicate_of_neighbour_is_dropped() {
        let mut line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (2.0, 0.0)])).unwrap();
        line.insert_point(GeoPoint::new(0.0, 0.0, None), 1).unwrap();
        assert_eq!(coords(&line), vec![(0.0, 0.0), (2.0, 0.0)]);
    }

    #[test]
    fn test_insert_point_at_end_equal_to_first_closes() {
        let mut line =
            OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])).unwrap();
        line.insert_point(GeoPoint::new(0.0, 0.0, None), 3).unwrap();
        assert_eq!(line.len(), 3);
        assert!(line.is_closed());
    }

    #[test]
    fn test_insert_points_splices_in_order() {
        let mut line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (3.0, 3.0)])).unwrap();
        line.insert_points(flat(&[(1.0, 1.0), (2.0, 2.0)]), 1).unwrap();
        assert_eq!(coords(&line), vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(positions(&line), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_insert_points_past_end_appends() {
        let mut line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        line.insert_points(flat(&[(2.0, 2.0), (3.0, 3.0)]), 100).unwrap();
        assert_eq!(coords(&line), vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(positions(&line), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_insert_points_is_all_or_nothing() {
        let mut line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        let before = line.clone();
        let candidates = vec![
            GeoObject::from(GeoPoint::new(5.0, 5.0, None)),
            GeoObject::from(Property::new("dip", 1.0, "deg")),
        ];
        assert!(line.insert_points(candidates, 1).is_err());
        assert_eq!(line, before);
    }

    #[test]
    fn test_index_of_and_delete_point() {
        let mut line =
            OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])).unwrap();
        let middle = line.points()[1].clone();
        assert_eq!(line.index_of(&middle).unwrap(), 1);

        let removed = line.delete_point(middle.clone()).unwrap();
        assert_eq!(removed.line_pos(), -1);
        assert!(removed.line_id().is_none());
        assert_eq!(positions(&line), vec![0, 1]);

        let err = line.index_of(&middle).unwrap_err();
        assert!(matches!(err, ToolboxError::NotFound { .. }));
        assert!(matches!(line.delete_point(middle).unwrap_err(), ToolboxError::NotFound { .. }));
    }

    #[test]
    fn test_delete_point_can_expose_closure() {
        let mut line =
            OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0), (2.0, 2.0)]))
                .unwrap();
        let last = line.points()[3].clone();
        line.delete_point(last).unwrap();
        assert_eq!(coords(&line), vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(line.is_closed());
    }

    #[test]
    fn test_delete_point_rejects_non_points() {
        let mut line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        let err = line.delete_point(GeoObject::from(Stratigraphy::named("mu"))).unwrap_err();
        assert!(matches!(err, ToolboxError::TypeMismatch { .. }));
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_delete_by_coordinates_within_tolerance() {
        let mut line =
            OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])).unwrap();
        let removed = line.delete_by_coordinates(1.0004, "0.9996", 123.0).unwrap();
        assert_eq!((removed.easting(), removed.northing()), (1.0, 1.0));
        assert_eq!(coords(&line), vec![(0.0, 0.0), (2.0, 2.0)]);
        assert_eq!(positions(&line), vec![0, 1]);
    }

    #[test]
    fn test_delete_by_coordinates_compares_altitude_with_z() {
        let mut line = OrderedLine::new(
            false,
            None::<Stratigraphy>,
            vec![GeoPoint::new(0.0, 0.0, Some(10.0)), GeoPoint::new(1.0, 1.0, Some(20.0))],
        )
        .unwrap();
        assert!(line.delete_by_coordinates(1.0, 1.0, 0.0).is_err());
        assert!(line.delete_by_coordinates(1.0, 1.0, 20.0).is_ok());
    }

    #[test]
    fn test_delete_by_coordinates_not_found_leaves_line() {
        let mut line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        let before = line.clone();
        let err = line.delete_by_coordinates(9.0, 9.0, 0.0).unwrap_err();
        assert!(matches!(err, ToolboxError::NotFound { .. }));
        assert_eq!(line, before);

        let err = line.delete_by_coordinates("x", 9.0, 0.0).unwrap_err();
        assert!(matches!(err, ToolboxError::Conversion { .. }));
        assert_eq!(line, before);
    }

    #[test]
    fn test_assign_id_stamps_members() {
        let mut line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        assert!(line.points().iter().all(|p| p.line_id().is_none()));

        line.assign_id(LineId(4));
        line.assign_point_id(1, PointId(9)).unwrap();
        assert!(line.points().iter().all(|p| p.line_id() == Some(LineId(4))));
        assert_eq!(line.points()[1].id(), Some(PointId(9)));
        assert!(line.assign_point_id(2, PointId(10)).is_err());
    }

    #[test]
    fn test_restore_keeps_stored_order() {
        let mut first = GeoPoint::new(0.0, 0.0, None);
        first.assign_id(PointId(1));
        let mut second = GeoPoint::new(1.0, 1.0, None);
        second.assign_id(PointId(2));

        let line =
            OrderedLine::restore(LineId(3), true, Some(Stratigraphy::named("so")), vec![first, second])
                .with_name("Line_2");
        assert_eq!(line.id(), Some(LineId(3)));
        assert!(line.is_closed());
        assert_eq!(line.name(), "Line_2");
        assert_eq!(positions(&line), vec![0, 1]);
        assert!(line.points().iter().all(|p| p.line_id() == Some(LineId(3))));
    }

    #[test]
    fn test_closed_line_geojson_is_polygon() {
        let line = OrderedLine::new(
            false,
            None::<Stratigraphy>,
            flat(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
        )
        .unwrap();
        let json = serde_json::to_value(line.to_geojson()).unwrap();
        assert_eq!(json["geometry"]["type"], "Polygon");
        assert_eq!(json["geometry"]["coordinates"][0].as_array().unwrap().len(), 4);
        assert_eq!(json["properties"]["closed"], true);

        let open = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (1.0, 0.0)])).unwrap();
        let json = serde_json::to_value(open.to_geojson()).unwrap();
        assert_eq!(json["geometry"]["type"], "LineString");
    }

    #[test]
    fn test_endpoints() {
        let line = OrderedLine::new(false, None::<Stratigraphy>, flat(&[(0.0, 0.0), (4.0, 2.0)])).unwrap();
        let (start, end) = line.endpoints().unwrap();
        assert_eq!(start.easting(), 0.0);
        assert_eq!(end.northing(), 2.0);
    }
}
