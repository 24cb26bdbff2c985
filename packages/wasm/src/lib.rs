//! Mesh Inflate - WASM Module
//!
//! This module provides the mesh inflation simulation behind the mesh
//! inflation viewer. Every edge of a triangle mesh acts as a spring and
//! every face pushes outward along its normal, so a closed model swells
//! like a balloon. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `mesh`: Triangle mesh buffers, welding, diagnostics, primitives
//! - `inflation`: Spring topology, force assembly, integration, session
//! - `spatial`: R-tree over vertex positions for welding and picking
//! - `error`: Error type shared by all of the above

use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::prelude::*;

pub mod error;
pub mod inflation;
pub mod mesh;
pub mod spatial;

use error::InflationError;
use glam::Vec3;
use inflation::{InflationParams, InflationSession, TickOutcome};
use mesh::{prepare, MeshReport, PrepareConfig, TriMesh, VertexId, DEFAULT_FIT_BOX_SIZE};
use spatial::SpatialIndex;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
    tracing::info!("mesh inflate WASM module initialized");
}

fn to_js(err: InflationError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Main entry point for the viewer.
///
/// Wraps one [`InflationSession`]: the loaded mesh, its simulation state,
/// the current parameters and the start/stop toggle.
#[wasm_bindgen]
pub struct MeshInflationWasm {
    session: InflationSession,

    /// Picking index over the current positions; None once they move
    pick_index: Option<SpatialIndex>,
}

#[wasm_bindgen]
impl MeshInflationWasm {
    /// Create a viewer session with no mesh and default parameters.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: InflationSession::default(),
            pick_index: None,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load a mesh from flat buffers and initialize inflation for it.
    ///
    /// `positions` is [x0, y0, z0, x1, ...] and `indices` is
    /// [a0, b0, c0, a1, ...], 0-based. Vertices are welded and the model
    /// centered, as for any loaded file.
    #[wasm_bindgen(js_name = loadMesh)]
    pub fn load_mesh(&mut self, positions: &[f32], indices: &[u32]) -> Result<(), JsValue> {
        self.load_prepared(positions, indices, &PrepareConfig::default())
    }

    /// Load a mesh with explicit preparation options.
    ///
    /// `config` is a partial `{ weldTolerance, center }` object; a null
    /// `weldTolerance` disables welding.
    #[wasm_bindgen(js_name = loadMeshWithConfig)]
    pub fn load_mesh_with_config(
        &mut self,
        positions: &[f32],
        indices: &[u32],
        config: JsValue,
    ) -> Result<(), JsValue> {
        let config: PrepareConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid prepare config: {}", e)))?;
        self.load_prepared(positions, indices, &config)
    }

    /// Load a geodesic sphere, handy as a demo model.
    #[wasm_bindgen(js_name = loadIcosphere)]
    pub fn load_icosphere(&mut self, radius: f32, subdivisions: u32) {
        self.session.load(TriMesh::icosphere(radius, subdivisions.min(6)));
        self.pick_index = None;
    }

    fn load_prepared(
        &mut self,
        positions: &[f32],
        indices: &[u32],
        config: &PrepareConfig,
    ) -> Result<(), JsValue> {
        let mesh = TriMesh::from_flat(positions, indices)
            .and_then(|mesh| prepare(mesh, config))
            .map_err(to_js)?;
        self.session.load(mesh);
        self.pick_index = None;
        Ok(())
    }

    /// Re-initialize against the current positions.
    ///
    /// Velocities return to zero and rest lengths are measured again.
    pub fn initialize(&mut self) -> Result<(), JsValue> {
        self.session.reset().map_err(to_js)
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Advance one tick with explicit coefficients.
    ///
    /// Returns the number of zero-length edges skipped.
    pub fn step(&mut self, stiffness: f32, amplitude: f32, damping: f32) -> Result<u32, JsValue> {
        let params = InflationParams {
            stiffness,
            amplitude,
            damping,
            ..*self.session.params()
        };
        self.step_params(&params)
    }

    /// Advance one tick with a partial params object
    /// `{ stiffness, amplitude, damping, degenerateEdges }`.
    #[wasm_bindgen(js_name = stepWithParams)]
    pub fn step_with_params(&mut self, params: JsValue) -> Result<u32, JsValue> {
        let params = parse_params(params)?;
        self.step_params(&params)
    }

    fn step_params(&mut self, params: &InflationParams) -> Result<u32, JsValue> {
        let report = self.session.step_with_params(params).map_err(to_js)?;
        self.pick_index = None;
        Ok(report.degenerate_edges as u32)
    }

    /// Replace the parameters used by `tick`.
    #[wasm_bindgen(js_name = setParams)]
    pub fn set_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params = parse_params(params)?;
        self.session.set_params(params).map_err(to_js)
    }

    /// Current parameters as a JS object.
    #[wasm_bindgen(js_name = getParams)]
    pub fn get_params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.params())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    /// Flip the start/stop toggle; returns true if now running.
    pub fn toggle(&mut self) -> bool {
        self.session.toggle()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Per-frame hook: steps once if running.
    ///
    /// Returns true if the mesh moved and should be re-uploaded.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        match self.session.tick().map_err(to_js)? {
            TickOutcome::Idle => Ok(false),
            TickOutcome::Stepped(_) => {
                self.pick_index = None;
                Ok(true)
            }
        }
    }

    /// Successful steps since the mesh was loaded or re-initialized.
    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.session.frame_count() as f64
    }

    // =========================================================================
    // Counts
    // =========================================================================

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> u32 {
        self.session.mesh().map_or(0, |m| m.vertex_count() as u32)
    }

    #[wasm_bindgen(js_name = faceCount)]
    pub fn face_count(&self) -> u32 {
        self.session.mesh().map_or(0, |m| m.face_count() as u32)
    }

    /// Number of springs in the simulation.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.session.engine().edges().map_or(0, |e| e.len() as u32)
    }

    // =========================================================================
    // Buffer Access (Zero-Copy)
    // =========================================================================

    /// Get a zero-copy view of vertex positions [x0, y0, z0, ...].
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately for GPU upload, do not store.
    #[wasm_bindgen(js_name = getPositionsView)]
    pub fn get_positions_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.positions()) }
    }

    /// Get a zero-copy view of face normals [nx0, ny0, nz0, ...].
    ///
    /// # Safety
    ///
    /// Same lifetime rules as `getPositionsView`.
    #[wasm_bindgen(js_name = getFaceNormalsView)]
    pub fn get_face_normals_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.face_normals()) }
    }

    /// Get a zero-copy view of triangle indices.
    #[wasm_bindgen(js_name = getIndicesView)]
    pub fn get_indices_view(&self) -> Uint32Array {
        let indices = self.session.mesh().map_or(&[][..], TriMesh::flat_indices);
        unsafe { Uint32Array::view(indices) }
    }

    /// Copy of the vertex positions, safe to keep (used for export).
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Vec<f32> {
        self.positions().to_vec()
    }

    /// Copy of the face normals, safe to keep (used for export).
    #[wasm_bindgen(js_name = getFaceNormals)]
    pub fn get_face_normals(&self) -> Vec<f32> {
        self.face_normals().to_vec()
    }

    fn positions(&self) -> &[f32] {
        self.session.mesh().map_or(&[][..], TriMesh::flat_positions)
    }

    fn face_normals(&self) -> &[f32] {
        self.session.mesh().map_or(&[][..], TriMesh::flat_face_normals)
    }

    // =========================================================================
    // Bounds
    // =========================================================================

    /// Get the bounding box of the mesh.
    ///
    /// Returns [min_x, min_y, min_z, max_x, max_y, max_z], or None if no
    /// mesh is loaded.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f32>> {
        let (min, max) = self.session.mesh()?.bounding_box()?;
        Some(vec![min.x, min.y, min.z, max.x, max.y, max.z])
    }

    /// Get the bounding sphere as [center_x, center_y, center_z, radius].
    #[wasm_bindgen(js_name = getBoundingSphere)]
    pub fn get_bounding_sphere(&self) -> Option<Vec<f32>> {
        let (center, radius) = self.session.mesh()?.bounding_sphere()?;
        Some(vec![center.x, center.y, center.z, radius])
    }

    /// Whether positions changed since the renderer last refreshed bounds.
    #[wasm_bindgen(js_name = boundsStale)]
    pub fn bounds_stale(&self) -> bool {
        self.session.mesh().is_some_and(TriMesh::bounds_stale)
    }

    /// Called by the renderer after recomputing its own bounds.
    #[wasm_bindgen(js_name = markBoundsFresh)]
    pub fn mark_bounds_fresh(&mut self) {
        if let Some(mesh) = self.session.mesh_mut() {
            mesh.mark_bounds_fresh();
        }
    }

    /// Uniform scale that fits the model in a cube of side `box_size`
    /// (default: the viewer's box).
    #[wasm_bindgen(js_name = fitScale)]
    pub fn fit_scale(&self, box_size: Option<f32>) -> Option<f32> {
        self.session
            .mesh()?
            .fit_scale(box_size.unwrap_or(DEFAULT_FIT_BOX_SIZE))
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the vertex nearest to a point, e.g. under the cursor.
    ///
    /// With `max_distance`, returns None if no vertex is that close. The
    /// index is built on first use and reused until the mesh moves.
    #[wasm_bindgen(js_name = findNearestVertex)]
    pub fn find_nearest_vertex(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        max_distance: Option<f32>,
    ) -> Option<u32> {
        let mesh = self.session.mesh()?;
        let index = self.pick_index.get_or_insert_with(|| {
            let points: Vec<_> = mesh
                .positions()
                .iter()
                .enumerate()
                .map(|(i, &p)| (VertexId(i as u32), p))
                .collect();
            let mut index = SpatialIndex::new();
            index.rebuild(&points);
            index
        });

        let point = Vec3::new(x, y, z);
        match max_distance {
            Some(max_distance) => index.nearest_within(point, max_distance),
            None => index.nearest(point),
        }
        .map(VertexId::raw)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Topology summary of the loaded mesh: edge counts, components,
    /// closedness.
    #[wasm_bindgen(js_name = meshReport)]
    pub fn mesh_report(&self) -> Result<JsValue, JsValue> {
        let mesh = self
            .session
            .mesh()
            .ok_or_else(|| to_js(InflationError::NotInitialized))?;
        serde_wasm_bindgen::to_value(&MeshReport::analyze(mesh))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

impl Default for MeshInflationWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_params(params: JsValue) -> Result<InflationParams, JsValue> {
    serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid inflation params: {}", e)))
}
