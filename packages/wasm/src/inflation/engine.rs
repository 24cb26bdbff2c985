//! InflationEngine - mass-spring plus pressure simulation.
//!
//! The engine borrows the mesh rather than owning it: the loader owns the
//! geometry, the engine owns the spring topology and velocities. Control is
//! two operations, `initialize` once per loaded mesh and `step` once per
//! animation tick. Whether ticks happen at all is the caller's business.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::forces::{accumulate_pressure, accumulate_springs};
use super::integrator::integrate;
use super::params::InflationParams;
use super::state::SimulationState;
use super::topology::EdgeSet;
use crate::error::{InflationError, InflationResult};
use crate::mesh::TriMesh;
use glam::Vec3;

/// Outcome of a successful step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    /// Zero-length edges that contributed no spring force this tick.
    pub degenerate_edges: usize,
}

/// The inflation simulation for one loaded mesh.
#[derive(Debug, Clone, Default)]
pub struct InflationEngine {
    /// None until `initialize` has run
    state: Option<SimulationState>,
}

impl InflationEngine {
    /// Create an engine with no mesh attached.
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Create an engine already initialized for `mesh`.
    pub fn for_mesh(mesh: &TriMesh) -> Self {
        let mut engine = Self::new();
        engine.initialize(mesh);
        engine
    }

    /// Build the spring network and zeroed velocities for `mesh`.
    ///
    /// Rest lengths are measured from the current positions. Any previous
    /// state is discarded.
    pub fn initialize(&mut self, mesh: &TriMesh) {
        let state = SimulationState::new(mesh);
        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            edges = state.edges().len(),
            "initialized mesh inflation"
        );
        self.state = Some(state);
    }

    /// Drop the simulation state; `step` fails until the next `initialize`.
    pub fn clear(&mut self) {
        self.state = None;
    }

    /// Whether `initialize` has run.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// The spring network, if initialized.
    pub fn edges(&self) -> Option<&EdgeSet> {
        self.state.as_ref().map(SimulationState::edges)
    }

    /// Per-vertex velocities; empty if not initialized.
    pub fn velocities(&self) -> &[Vec3] {
        self.state
            .as_ref()
            .map(SimulationState::velocities)
            .unwrap_or(&[])
    }

    /// Advance the simulation by one tick with the default edge policy.
    pub fn step(
        &mut self,
        mesh: &mut TriMesh,
        stiffness: f32,
        amplitude: f32,
        damping: f32,
    ) -> InflationResult<StepReport> {
        self.step_with_params(mesh, &InflationParams::new(stiffness, amplitude, damping))
    }

    /// Advance the simulation by one tick.
    ///
    /// Fails without touching the mesh or velocities if the parameters are
    /// invalid, if the engine was not initialized for this mesh, or if a
    /// degenerate edge is met under the abort policy. On success positions
    /// and velocities are updated, face normals recomputed, and the mesh's
    /// bounds marked stale.
    pub fn step_with_params(
        &mut self,
        mesh: &mut TriMesh,
        params: &InflationParams,
    ) -> InflationResult<StepReport> {
        params.validate()?;

        let state = match self.state.as_mut() {
            Some(state) if state.matches(mesh) => state,
            Some(_) => {
                warn!("mesh changed shape since initialize; skipping step");
                return Err(InflationError::NotInitialized);
            }
            None => return Err(InflationError::NotInitialized),
        };

        state.forces.fill(Vec3::ZERO);

        let degenerate_edges = accumulate_springs(
            mesh.positions(),
            state.edges.as_slice(),
            params.stiffness,
            params.degenerate_edges,
            &mut state.forces,
        )?;
        accumulate_pressure(mesh.faces(), mesh.face_normals(), params.amplitude, &mut state.forces);

        integrate(mesh.positions_mut(), &mut state.velocities, &state.forces, params.damping);

        mesh.compute_face_normals();
        mesh.mark_bounds_stale();

        if degenerate_edges > 0 {
            warn!(degenerate_edges, "skipped zero-length edges");
        }
        trace!(
            stiffness = params.stiffness,
            amplitude = params.amplitude,
            damping = params.damping,
            "inflation step"
        );

        Ok(StepReport { degenerate_edges })
    }
}
