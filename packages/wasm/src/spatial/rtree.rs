//! R-tree based spatial index over vertex positions, using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Nearest neighbor
//! - Nearest neighbor within a tolerance (vertex welding)

use glam::Vec3;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::mesh::VertexId;

/// A point in the spatial index with associated vertex ID.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPoint {
    /// The vertex identifier.
    pub id: VertexId,
    /// Position in mesh space.
    pub position: [f32; 3],
}

impl VertexPoint {
    /// Create a new VertexPoint.
    pub fn new(id: VertexId, position: Vec3) -> Self {
        Self {
            id,
            position: position.to_array(),
        }
    }
}

impl RTreeObject for VertexPoint {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for VertexPoint {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        Vec3::from_array(self.position).distance_squared(Vec3::from_array(*point))
    }
}

/// Spatial index for mesh vertices.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct SpatialIndex {
    tree: RTree<VertexPoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Insert a vertex into the index.
    pub fn insert(&mut self, id: VertexId, position: Vec3) {
        self.tree.insert(VertexPoint::new(id, position));
    }

    /// Find the nearest vertex to a point.
    pub fn nearest(&self, point: Vec3) -> Option<VertexId> {
        self.tree
            .nearest_neighbor(&point.to_array())
            .map(|p| p.id)
    }

    /// Find the nearest vertex within a maximum distance.
    pub fn nearest_within(&self, point: Vec3, max_distance: f32) -> Option<VertexId> {
        let query = point.to_array();
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&query)
            .filter(|p| p.distance_2(&query) <= max_distance_sq)
            .map(|p| p.id)
    }

    /// Rebuild the index from a list of (id, position) pairs.
    ///
    /// Bulk loading produces a better-balanced tree than incremental inserts.
    pub fn rebuild(&mut self, points: &[(VertexId, Vec3)]) {
        let vertex_points: Vec<_> = points
            .iter()
            .map(|&(id, position)| VertexPoint::new(id, position))
            .collect();

        self.tree = RTree::bulk_load(vertex_points);
    }

    /// Get the number of vertices in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
