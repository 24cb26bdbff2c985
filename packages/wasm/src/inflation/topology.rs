//! Spring topology extraction.
//!
//! Walks the face list once and registers every undirected edge exactly
//! once, whatever the number of faces sharing it: one for a boundary edge,
//! two for an interior edge of a closed mesh. The rest length recorded for
//! an edge is the one measured when it is first seen and never changes.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use super::edge::{EdgeKey, SpringEdge};
use crate::mesh::TriMesh;

/// Deduplicated set of spring edges.
///
/// Springs live in a dense vector in registration order, which is what the
/// force loop walks every tick. The key map gives O(1) lookup by vertex pair.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    /// Springs in registration order
    edges: Vec<SpringEdge>,

    /// Canonical key to slot in `edges`
    index: HashMap<EdgeKey, usize>,
}

impl EdgeSet {
    /// Extract the spring network of `mesh` at its current positions.
    ///
    /// Each face's indices are sorted to `[v0, v1, v2]` and the pairs
    /// `(v0, v1)`, `(v1, v2)`, `(v0, v2)` registered. A pair with equal
    /// indices (a face repeating a vertex) is not an edge and is skipped.
    pub fn extract(mesh: &TriMesh) -> Self {
        let positions = mesh.positions();
        // A closed mesh has 3F/2 edges; an open one up to 3F
        let capacity = mesh.face_count() * 3 / 2;
        let mut edges = Vec::with_capacity(capacity);
        let mut index = HashMap::with_capacity(capacity);

        for face in mesh.faces() {
            let mut sorted = *face;
            sorted.sort_unstable();
            let [v0, v1, v2] = sorted;

            for (start, end) in [(v0, v1), (v1, v2), (v0, v2)] {
                if start == end {
                    continue;
                }
                let key = EdgeKey::new(start, end);
                if let Entry::Vacant(slot) = index.entry(key) {
                    slot.insert(edges.len());
                    edges.push(SpringEdge::at_rest(key, positions));
                }
            }
        }

        debug!(
            faces = mesh.face_count(),
            edges = edges.len(),
            "extracted spring topology"
        );

        Self { edges, index }
    }

    /// Number of springs.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether there are no springs.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All springs as a slice, in registration order.
    pub fn as_slice(&self) -> &[SpringEdge] {
        &self.edges
    }

    /// Iterate over springs.
    pub fn iter(&self) -> impl Iterator<Item = &SpringEdge> {
        self.edges.iter()
    }

    /// Look up the spring between two vertices, in either order.
    pub fn get(&self, a: u32, b: u32) -> Option<&SpringEdge> {
        self.index
            .get(&EdgeKey::new(a, b))
            .map(|&slot| &self.edges[slot])
    }

    /// Whether the two vertices share an edge.
    pub fn contains(&self, a: u32, b: u32) -> bool {
        self.index.contains_key(&EdgeKey::new(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn unit_triangle() -> TriMesh {
        TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]).unwrap()
    }

    #[test]
    fn test_triangle_rest_lengths() {
        let edges = EdgeSet::extract(&unit_triangle());

        assert_eq!(edges.len(), 3);
        assert_eq!(edges.get(0, 1).unwrap().rest_length, 1.0);
        assert_eq!(edges.get(0, 2).unwrap().rest_length, 1.0);
        assert_relative_eq!(edges.get(1, 2).unwrap().rest_length, 2.0f32.sqrt());
    }

    #[test]
    fn test_registration_order_follows_sorted_face() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[2, 0, 1]]).unwrap();
        let keys: Vec<_> = EdgeSet::extract(&mesh).iter().map(|e| e.key()).collect();

        assert_eq!(
            keys,
            vec![EdgeKey::new(0, 1), EdgeKey::new(1, 2), EdgeKey::new(0, 2)]
        );
    }

    #[test]
    fn test_shared_edge_registered_once() {
        // Quad split along (0, 2); both triangles reference that edge
        let mesh = TriMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap();
        let edges = EdgeSet::extract(&mesh);

        assert_eq!(edges.len(), 5);
        assert!(edges.contains(2, 0));
        assert!(!edges.contains(1, 3));
    }

    #[test]
    fn test_closed_mesh_edge_count() {
        for mesh in [
            TriMesh::tetrahedron(1.0),
            TriMesh::octahedron(1.0),
            TriMesh::icosphere(1.0, 2),
        ] {
            let edges = EdgeSet::extract(&mesh);
            assert_eq!(edges.len(), mesh.face_count() * 3 / 2);
        }
    }

    #[test]
    fn test_edges_are_canonical() {
        let edges = EdgeSet::extract(&TriMesh::icosphere(1.0, 1));
        assert!(edges.iter().all(|e| e.start < e.end));
    }

    #[test]
    fn test_repeated_vertex_is_not_an_edge() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X], vec![[0, 0, 1]]).unwrap();
        let edges = EdgeSet::extract(&mesh);

        assert_eq!(edges.len(), 1);
        assert!(edges.contains(0, 1));
    }

    #[test]
    fn test_no_faces() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X], Vec::new()).unwrap();
        assert!(EdgeSet::extract(&mesh).is_empty());
    }
}
