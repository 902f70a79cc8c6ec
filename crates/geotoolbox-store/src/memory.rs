//! In-memory storage implementation for development and testing.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. For production workloads, use the PostgreSQL backend.

use async_trait::async_trait;
use geotoolbox_core::error::{Result, ToolboxError};
use geotoolbox_core::models::PointQuery;
use geotoolbox_core::ports::{HorizonStore, LineStore, PointStore};
use geotoolbox_core::{Extent, GeoPoint, HorizonId, LineId, OrderedLine, PointId, Stratigraphy};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use crate::index::PointIndex;

/// Line attributes; members live in the point table
#[derive(Debug, Clone)]
struct LineRecord {
    closed: bool,
    horizon: Option<HorizonId>,
    name: String,
    comment: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    points: BTreeMap<PointId, GeoPoint>,
    lines: BTreeMap<LineId, LineRecord>,
    horizons: BTreeMap<HorizonId, Stratigraphy>,
    index: PointIndex,
    next_point: i64,
    next_line: i64,
    next_horizon: i64,
}

impl MemoryState {
    /// Insert or update a unit. An unsaved unit whose name is taken becomes the
    /// stored unit, age included; only a saved unit updates the age.
    fn upsert_horizon(&mut self, horizon: &mut Stratigraphy) -> Result<HorizonId> {
        let by_name = self.horizons.values().find(|h| h.name() == horizon.name()).and_then(|h| h.id());

        if let (None, Some(existing)) = (horizon.id(), by_name) {
            if let Some(stored) = self.horizons.get(&existing) {
                *horizon = stored.clone();
                return Ok(existing);
            }
        }

        let id = match (horizon.id(), by_name) {
            (Some(id), Some(other)) if id != other => {
                return Err(ToolboxError::Storage(format!(
                    "stratigraphy name '{}' is already used by unit {}",
                    horizon.name(),
                    other.0
                )));
            }
            (Some(id), _) => {
                self.next_horizon = self.next_horizon.max(id.0);
                id
            }
            (None, Some(existing)) => existing,
            (None, None) => {
                self.next_horizon += 1;
                HorizonId(self.next_horizon)
            }
        };

        horizon.assign_id(id);
        self.horizons.insert(id, horizon.clone());
        Ok(id)
    }

    /// Save the classification carried by an entity and return the stored version
    fn persist_classification(
        &mut self,
        horizon: Option<&Stratigraphy>,
    ) -> Result<Option<Stratigraphy>> {
        match horizon {
            Some(horizon) => {
                let mut horizon = horizon.clone();
                self.upsert_horizon(&mut horizon)?;
                Ok(Some(horizon))
            }
            None => Ok(None),
        }
    }

    fn point_id_for(&mut self, point: &GeoPoint) -> PointId {
        match point.id() {
            Some(id) => {
                self.next_point = self.next_point.max(id.0);
                id
            }
            None => {
                self.next_point += 1;
                PointId(self.next_point)
            }
        }
    }

    fn put_point(&mut self, id: PointId, point: GeoPoint) {
        if let Some(previous) = self.points.get(&id) {
            self.index.remove(id, previous.easting(), previous.northing());
        }
        self.index.insert(id, point.easting(), point.northing());
        self.points.insert(id, point);
    }

    fn remove_point(&mut self, id: PointId) -> Option<GeoPoint> {
        let removed = self.points.remove(&id)?;
        self.index.remove(id, removed.easting(), removed.northing());
        Some(removed)
    }

    fn member_ids(&self, line: LineId) -> Vec<PointId> {
        self.points
            .iter()
            .filter(|(_, p)| p.line_id() == Some(line))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Stored point with its classification refreshed from the unit table
    fn resolve_point(&self, point: &GeoPoint) -> Result<GeoPoint> {
        let mut point = point.clone();
        let current = point.horizon().and_then(|h| h.id()).and_then(|id| self.horizons.get(&id));
        if let Some(horizon) = current {
            point.set_horizon(horizon.clone())?;
        }
        Ok(point)
    }

    fn build_line(&self, id: LineId) -> Option<OrderedLine> {
        let record = self.lines.get(&id)?;

        let mut members: Vec<GeoPoint> =
            self.points.values().filter(|p| p.line_id() == Some(id)).cloned().collect();
        members.sort_by_key(|p| p.line_pos());

        let horizon = record.horizon.and_then(|h| self.horizons.get(&h).cloned());
        let line = OrderedLine::restore(id, record.closed, horizon, members)
            .with_name(record.name.clone())
            .with_comment(record.comment.clone());
        Some(line)
    }
}

/// In-memory implementation of all storage ports
#[derive(Debug, Clone, Default)]
pub struct MemoryGeoStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryGeoStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored points, attached or not
    pub fn point_count(&self) -> usize {
        self.state.read().unwrap().points.len()
    }
}

#[async_trait]
impl PointStore for MemoryGeoStore {
    async fn save_point(&self, point: &mut GeoPoint) -> Result<PointId> {
        let mut state = self.state.write().unwrap();

        if let Some(horizon) = state.persist_classification(point.horizon())? {
            point.set_horizon(horizon)?;
        }

        let id = state.point_id_for(point);
        point.assign_id(id);
        state.put_point(id, point.clone());

        tracing::debug!(point = id.0, "Saved point");
        Ok(id)
    }

    async fn get_point(&self, id: PointId) -> Result<Option<GeoPoint>> {
        let state = self.state.read().unwrap();
        state.points.get(&id).map(|p| state.resolve_point(p)).transpose()
    }

    async fn delete_point(&self, id: PointId) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state
            .remove_point(id)
            .map(|_| ())
            .ok_or_else(|| ToolboxError::not_found(format!("point {}", id.0)))
    }

    async fn query_points(&self, query: &PointQuery) -> Result<Vec<GeoPoint>> {
        let state = self.state.read().unwrap();

        let candidates: BTreeSet<PointId> = match &query.extent {
            Some(extent) => state.index.query_extent(extent).into_iter().collect(),
            None => state.points.keys().copied().collect(),
        };

        let points = candidates
            .iter()
            .filter_map(|id| state.points.get(id))
            .filter(|p| query.matches(p))
            .map(|p| state.resolve_point(p))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = points.len(), "Point query");
        Ok(points)
    }
}

#[async_trait]
impl LineStore for MemoryGeoStore {
    async fn save_line(&self, line: &mut OrderedLine) -> Result<LineId> {
        let mut state = self.state.write().unwrap();

        let horizon = state.persist_classification(line.horizon())?;
        let horizon_id = horizon.as_ref().and_then(|h| h.id());
        if horizon.is_some() {
            line.set_horizon(horizon)?;
        }

        let id = match line.id() {
            Some(id) => {
                state.next_line = state.next_line.max(id.0);
                id
            }
            None => {
                state.next_line += 1;
                LineId(state.next_line)
            }
        };
        line.assign_id(id);

        let mut kept = BTreeSet::new();
        for index in 0..line.len() {
            let point_id = state.point_id_for(&line.points()[index]);
            line.assign_point_id(index, point_id)?;
            state.put_point(point_id, line.points()[index].clone());
            kept.insert(point_id);
        }

        let orphans: Vec<PointId> =
            state.member_ids(id).into_iter().filter(|p| !kept.contains(p)).collect();
        for orphan in &orphans {
            state.remove_point(*orphan);
        }

        state.lines.insert(
            id,
            LineRecord {
                closed: line.is_closed(),
                horizon: horizon_id,
                name: line.name().to_string(),
                comment: line.comment().to_string(),
            },
        );

        tracing::debug!(line = id.0, points = line.len(), orphans = orphans.len(), "Saved line");
        Ok(id)
    }

    async fn get_line(&self, id: LineId) -> Result<Option<OrderedLine>> {
        let state = self.state.read().unwrap();
        Ok(state.build_line(id))
    }

    async fn delete_line(&self, id: LineId) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.lines.remove(&id).is_none() {
            return Err(ToolboxError::not_found(format!("line {}", id.0)));
        }
        for member in state.member_ids(id) {
            state.remove_point(member);
        }
        tracing::debug!(line = id.0, "Deleted line");
        Ok(())
    }

    async fn list_lines(&self) -> Result<Vec<OrderedLine>> {
        let state = self.state.read().unwrap();
        Ok(state.lines.keys().filter_map(|id| state.build_line(*id)).collect())
    }

    async fn line_ids_in_extent(&self, extent: &Extent) -> Result<Vec<LineId>> {
        let state = self.state.read().unwrap();
        let ids: BTreeSet<LineId> = state
            .index
            .query_extent(extent)
            .into_iter()
            .filter_map(|id| state.points.get(&id))
            .filter(|p| p.is_attached())
            .filter_map(|p| p.line_id())
            .collect();

        tracing::debug!(count = ids.len(), "Line ids in extent");
        Ok(ids.into_iter().collect())
    }

    async fn lines_by_ids(&self, ids: &[LineId]) -> Result<Vec<OrderedLine>> {
        let state = self.state.read().unwrap();
        let ids: BTreeSet<LineId> = ids.iter().copied().collect();
        Ok(ids.into_iter().filter_map(|id| state.build_line(id)).collect())
    }

    async fn lines_by_name(&self, name: &str) -> Result<Vec<OrderedLine>> {
        let state = self.state.read().unwrap();
        Ok(state
            .lines
            .iter()
            .filter(|(_, record)| record.name == name)
            .filter_map(|(id, _)| state.build_line(*id))
            .collect())
    }
}

#[async_trait]
impl HorizonStore for MemoryGeoStore {
    async fn save_horizon(&self, horizon: &mut Stratigraphy) -> Result<HorizonId> {
        let mut state = self.state.write().unwrap();
        let id = state.upsert_horizon(horizon)?;
        tracing::debug!(horizon = id.0, name = horizon.name(), "Saved stratigraphy");
        Ok(id)
    }

    async fn horizon_by_name(&self, name: &str) -> Result<Option<Stratigraphy>> {
        let state = self.state.read().unwrap();
        Ok(state.horizons.values().find(|h| h.name() == name).cloned())
    }

    async fn list_horizons(&self) -> Result<Vec<Stratigraphy>> {
        let state = self.state.read().unwrap();
        Ok(state.horizons.values().cloned().collect())
    }

    async fn horizons_by_age(&self, min_age: f64, max_age: f64) -> Result<Vec<Stratigraphy>> {
        let state = self.state.read().unwrap();
        Ok(state
            .horizons
            .values()
            .filter(|h| (min_age..=max_age).contains(&h.age()))
            .cloned()
            .collect())
    }
}
