//! Topology diagnostics for a loaded mesh.
//!
//! Inflation behaves well only on closed 2-manifolds: boundary edges let the
//! pressure term push open rims outward without a counter-balancing face,
//! and disconnected shells inflate independently. The report lets the viewer
//! warn about such inputs before the user starts a simulation.

use std::collections::HashMap;

use glam::Vec3;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use super::TriMesh;
use crate::inflation::EdgeKey;

/// Summary of a mesh's edge structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshReport {
    /// Number of vertices in the buffer.
    pub vertex_count: usize,
    /// Number of triangles.
    pub face_count: usize,
    /// Distinct undirected edges.
    pub edge_count: usize,
    /// Edges used by exactly one face.
    pub boundary_edges: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edges: usize,
    /// Connected shells, counting only vertices some face references.
    pub connected_components: usize,
    /// Faces with zero area (zero normal).
    pub degenerate_faces: usize,
    /// True for a non-empty mesh with every edge shared by exactly two faces.
    pub is_closed: bool,
}

impl MeshReport {
    /// Analyze a mesh.
    pub fn analyze(mesh: &TriMesh) -> Self {
        let mut edge_uses: HashMap<EdgeKey, u32> =
            HashMap::with_capacity(mesh.face_count() * 3 / 2);
        let mut referenced = vec![false; mesh.vertex_count()];

        for &[a, b, c] in mesh.faces() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                if u == v {
                    continue;
                }
                *edge_uses.entry(EdgeKey::new(u, v)).or_insert(0) += 1;
            }
            for v in [a, b, c] {
                referenced[v as usize] = true;
            }
        }

        let mut graph: UnGraph<(), ()> =
            UnGraph::with_capacity(mesh.vertex_count(), edge_uses.len());
        for _ in 0..mesh.vertex_count() {
            graph.add_node(());
        }
        for key in edge_uses.keys() {
            let (u, v) = (key.start() as usize, key.end() as usize);
            graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
        }

        // Unreferenced vertices are isolated nodes, each its own component
        let unreferenced = referenced.iter().filter(|&&r| !r).count();
        let components = connected_components(&graph) - unreferenced;

        let boundary_edges = edge_uses.values().filter(|&&n| n == 1).count();
        let non_manifold_edges = edge_uses.values().filter(|&&n| n > 2).count();

        Self {
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            edge_count: edge_uses.len(),
            boundary_edges,
            non_manifold_edges,
            connected_components: components,
            degenerate_faces: mesh.face_normals().iter().filter(|&&n| n == Vec3::ZERO).count(),
            is_closed: mesh.face_count() > 0 && boundary_edges == 0 && non_manifold_edges == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflation::EdgeSet;

    #[test]
    fn test_closed_octahedron() {
        let report = MeshReport::analyze(&TriMesh::octahedron(1.0));

        assert_eq!(report.vertex_count, 6);
        assert_eq!(report.face_count, 8);
        assert_eq!(report.edge_count, 12);
        assert_eq!(report.boundary_edges, 0);
        assert_eq!(report.non_manifold_edges, 0);
        assert_eq!(report.connected_components, 1);
        assert_eq!(report.degenerate_faces, 0);
        assert!(report.is_closed);
    }

    #[test]
    fn test_single_triangle_is_open() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]).unwrap();
        let report = MeshReport::analyze(&mesh);

        assert_eq!(report.edge_count, 3);
        assert_eq!(report.boundary_edges, 3);
        assert!(!report.is_closed);
    }

    #[test]
    fn test_two_shells_and_stray_vertex() {
        let a = TriMesh::tetrahedron(1.0);
        let mut positions = a.positions().to_vec();
        let mut faces = a.faces().to_vec();
        positions.extend(a.positions().iter().map(|p| *p + Vec3::splat(5.0)));
        faces.extend(a.faces().iter().map(|f| f.map(|v| v + 4)));
        positions.push(Vec3::splat(-9.0));

        let report = MeshReport::analyze(&TriMesh::new(positions, faces).unwrap());
        assert_eq!(report.vertex_count, 9);
        assert_eq!(report.connected_components, 2);
        assert!(report.is_closed);
    }

    #[test]
    fn test_edges_keyed_like_spring_topology() {
        // Shared edge (1, 2) is walked 1 -> 2 by one face and 2 -> 1 by the other
        let mesh = TriMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
            vec![[0, 1, 2], [2, 1, 3]],
        )
        .unwrap();
        let report = MeshReport::analyze(&mesh);

        assert_eq!(report.edge_count, 5);
        assert_eq!(report.boundary_edges, 4);
        assert_eq!(report.edge_count, EdgeSet::extract(&mesh).len());

        let sphere = TriMesh::icosphere(1.0, 2);
        assert_eq!(MeshReport::analyze(&sphere).edge_count, EdgeSet::extract(&sphere).len());
    }

    #[test]
    fn test_non_manifold_fin() {
        // Three triangles hinged on edge (0, 1)
        let mesh = TriMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_Y],
            vec![[0, 1, 2], [0, 1, 3], [0, 1, 4]],
        )
        .unwrap();
        let report = MeshReport::analyze(&mesh);

        assert_eq!(report.non_manifold_edges, 1);
        assert!(!report.is_closed);
    }

    #[test]
    fn test_degenerate_face_counted() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0], vec![[0, 1, 2]]).unwrap();
        assert_eq!(MeshReport::analyze(&mesh).degenerate_faces, 1);
    }

    #[test]
    fn test_empty_mesh() {
        let report = MeshReport::analyze(&TriMesh::default());
        assert_eq!(report.connected_components, 0);
        assert!(!report.is_closed);
    }
}
