use geotoolbox_core::{Extent, PointId};
use rstar::{RTree, RTreeObject, AABB};
use std::fmt;

/// Point id with its planar position
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPoint {
    pub id: PointId,
    position: [f64; 2],
}

impl IndexedPoint {
    pub fn new(id: PointId, easting: f64, northing: f64) -> Self {
        Self { id, position: [easting, northing] }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Planar index over stored points for extent queries
#[derive(Default)]
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl fmt::Debug for PointIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointIndex").field("size", &self.tree.size()).finish()
    }
}

impl PointIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn insert(&mut self, id: PointId, easting: f64, northing: f64) {
        self.tree.insert(IndexedPoint::new(id, easting, northing));
    }

    /// Remove the entry for `id` at the given position
    pub fn remove(&mut self, id: PointId, easting: f64, northing: f64) -> bool {
        self.tree.remove(&IndexedPoint::new(id, easting, northing)).is_some()
    }

    /// Ids of all points inside the closed extent, in no particular order
    pub fn query_extent(&self, extent: &Extent) -> Vec<PointId> {
        let (min, max) = extent.corners();
        let bbox = AABB::from_corners(min, max);
        self.tree.locate_in_envelope(&bbox).map(|indexed| indexed.id).collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
