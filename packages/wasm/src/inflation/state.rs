//! Per-mesh simulation state.

use glam::Vec3;

use super::topology::EdgeSet;
use crate::mesh::TriMesh;

/// Everything the engine keeps between ticks for one loaded mesh.
///
/// Built once by `initialize` and dropped when a new mesh is loaded.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Spring network, read-only while stepping
    pub(crate) edges: EdgeSet,

    /// One velocity per vertex, co-indexed with the mesh positions
    pub(crate) velocities: Vec<Vec3>,

    /// Scratch force buffer, zeroed at the start of every step
    pub(crate) forces: Vec<Vec3>,

    /// Shape of the mesh this state was built for
    vertex_count: usize,
    face_count: usize,
}

impl SimulationState {
    /// Extract topology and allocate zeroed buffers for `mesh`.
    pub fn new(mesh: &TriMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        Self {
            edges: EdgeSet::extract(mesh),
            velocities: vec![Vec3::ZERO; vertex_count],
            forces: vec![Vec3::ZERO; vertex_count],
            vertex_count,
            face_count: mesh.face_count(),
        }
    }

    /// Whether this state was built for a mesh of the same shape.
    pub fn matches(&self, mesh: &TriMesh) -> bool {
        self.vertex_count == mesh.vertex_count() && self.face_count == mesh.face_count()
    }

    /// The spring network.
    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    /// Per-vertex velocities.
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_match_vertex_count() {
        let mesh = TriMesh::icosphere(1.0, 1);
        let state = SimulationState::new(&mesh);

        assert_eq!(state.velocities().len(), mesh.vertex_count());
        assert_eq!(state.forces.len(), mesh.vertex_count());
        assert!(state.velocities().iter().all(|&v| v == Vec3::ZERO));
        assert!(state.matches(&mesh));
    }

    #[test]
    fn test_detects_other_mesh() {
        let state = SimulationState::new(&TriMesh::octahedron(1.0));
        assert!(!state.matches(&TriMesh::tetrahedron(1.0)));
    }
}
