use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Extent, GeoPoint, HorizonId, LineId, OrderedLine, PointId, PointQuery, Stratigraphy,
};

/// Port for point persistence
#[async_trait]
pub trait PointStore: Send + Sync {
    /// Insert or update a point and record the assigned id on it
    async fn save_point(&self, point: &mut GeoPoint) -> Result<PointId>;

    /// Retrieve a point by ID
    async fn get_point(&self, id: PointId) -> Result<Option<GeoPoint>>;

    /// Delete a point and its properties
    async fn delete_point(&self, id: PointId) -> Result<()>;

    /// Points matching the query, ordered by id ascending
    async fn query_points(&self, query: &PointQuery) -> Result<Vec<GeoPoint>>;
}

/// Port for line persistence
#[async_trait]
pub trait LineStore: Send + Sync {
    /// Insert or update a line together with its members.
    ///
    /// Assigned ids are stamped on the line and every member. Stored members
    /// that are no longer part of the line are deleted.
    async fn save_line(&self, line: &mut OrderedLine) -> Result<LineId>;

    /// Retrieve a line with its members in `line_pos` order
    async fn get_line(&self, id: LineId) -> Result<Option<OrderedLine>>;

    /// Delete a line and all of its member points
    async fn delete_line(&self, id: LineId) -> Result<()>;

    /// All lines, ordered by id ascending
    async fn list_lines(&self) -> Result<Vec<OrderedLine>>;

    /// Distinct ids of lines with at least one member inside the extent, ascending
    async fn line_ids_in_extent(&self, extent: &Extent) -> Result<Vec<LineId>>;

    /// Lines with the given ids, ordered by id ascending. Unknown ids are skipped.
    async fn lines_by_ids(&self, ids: &[LineId]) -> Result<Vec<OrderedLine>>;

    /// Lines with exactly this name, ordered by id ascending
    async fn lines_by_name(&self, name: &str) -> Result<Vec<OrderedLine>>;
}

/// Port for stratigraphic unit persistence
#[async_trait]
pub trait HorizonStore: Send + Sync {
    /// Insert or update a unit and record the assigned id on it
    async fn save_horizon(&self, horizon: &mut Stratigraphy) -> Result<HorizonId>;

    async fn horizon_by_name(&self, name: &str) -> Result<Option<Stratigraphy>>;

    /// All units, ordered by id ascending
    async fn list_horizons(&self) -> Result<Vec<Stratigraphy>>;

    /// Units with `min_age <= age <= max_age`, ordered by id ascending
    async fn horizons_by_age(&self, min_age: f64, max_age: f64) -> Result<Vec<Stratigraphy>>;
}
