//! InflationSession - the animate loop's view of the engine.
//!
//! A session owns one loaded mesh, the engine state for it, the current
//! parameters, and the on/off toggle. The host scheduler calls `tick` once
//! per frame and renders afterwards; a stopped session ticks as a no-op.

use tracing::{debug, info};

use super::engine::{InflationEngine, StepReport};
use super::params::InflationParams;
use crate::error::{InflationError, InflationResult};
use crate::mesh::TriMesh;

/// What a call to [`InflationSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Inflation is stopped; nothing moved.
    Idle,
    /// One step was applied.
    Stepped(StepReport),
}

/// Mesh, engine, parameters and run toggle for one viewer.
#[derive(Debug, Clone, Default)]
pub struct InflationSession {
    mesh: Option<TriMesh>,
    engine: InflationEngine,
    params: InflationParams,
    running: bool,
    frames: u64,
}

impl InflationSession {
    /// Create an empty, stopped session.
    pub fn new(params: InflationParams) -> InflationResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ..Self::default()
        })
    }

    /// Replace the mesh and initialize the engine for it.
    ///
    /// The run toggle is left as it was, so loading while running keeps
    /// inflating the new model.
    pub fn load(&mut self, mesh: TriMesh) {
        self.engine.initialize(&mesh);
        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "loaded mesh"
        );
        self.mesh = Some(mesh);
        self.frames = 0;
    }

    /// Drop the mesh and the engine state.
    pub fn unload(&mut self) {
        self.mesh = None;
        self.engine.clear();
        self.frames = 0;
    }

    pub fn mesh(&self) -> Option<&TriMesh> {
        self.mesh.as_ref()
    }

    /// Mutable mesh access for the host (bounds bookkeeping, manual edits).
    ///
    /// Changing the vertex or face count makes the next step fail with
    /// `NotInitialized` until [`reset`](Self::reset) is called.
    pub fn mesh_mut(&mut self) -> Option<&mut TriMesh> {
        self.mesh.as_mut()
    }

    pub fn engine(&self) -> &InflationEngine {
        &self.engine
    }

    pub fn params(&self) -> &InflationParams {
        &self.params
    }

    /// Replace the parameters used by `tick`.
    pub fn set_params(&mut self, params: InflationParams) -> InflationResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn start(&mut self) {
        if !self.running {
            debug!("inflation started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            debug!(frames = self.frames, "inflation stopped");
        }
        self.running = false;
    }

    /// Flip the run toggle and return the new state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Successful steps since the mesh was loaded or reset.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Advance one frame if running.
    pub fn tick(&mut self) -> InflationResult<TickOutcome> {
        if !self.running {
            return Ok(TickOutcome::Idle);
        }
        let params = self.params;
        self.step_with_params(&params).map(TickOutcome::Stepped)
    }

    /// Step once with the session parameters, running or not.
    pub fn step(&mut self) -> InflationResult<StepReport> {
        let params = self.params;
        self.step_with_params(&params)
    }

    /// Step once with explicit parameters, running or not.
    pub fn step_with_params(&mut self, params: &InflationParams) -> InflationResult<StepReport> {
        let mesh = self.mesh.as_mut().ok_or(InflationError::NotInitialized)?;
        let report = self.engine.step_with_params(mesh, params)?;
        self.frames += 1;
        Ok(report)
    }

    /// Re-initialize against the current positions.
    ///
    /// Velocities return to zero and rest lengths are re-measured, so the
    /// inflated shape becomes the new rest shape.
    pub fn reset(&mut self) -> InflationResult<()> {
        let mesh = self.mesh.as_ref().ok_or(InflationError::NotInitialized)?;
        self.engine.initialize(mesh);
        self.frames = 0;
        Ok(())
    }
}
