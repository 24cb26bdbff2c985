//! TriMesh - indexed triangle mesh.
//!
//! Stores vertex positions and index-triple faces, plus the per-face normals
//! derived from them. Positions and normals are `glam::Vec3`, which is
//! `#[repr(C)]` and `Pod`, so both buffers can be handed to JavaScript as flat
//! `[x0, y0, z0, x1, ...]` float arrays without copying.

use glam::Vec3;

use crate::error::{InflationError, InflationResult};

/// An indexed triangle mesh.
///
/// Face indices are validated on construction, so every `[a, b, c]` in
/// `faces` is a valid index into `positions` for the lifetime of the mesh.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    /// Vertex positions
    positions: Vec<Vec3>,

    /// Triangles as vertex index triples
    faces: Vec<[u32; 3]>,

    /// Unit normal per face (zero for degenerate faces)
    face_normals: Vec<Vec3>,

    /// Set whenever positions change; the renderer clears it after
    /// recomputing its own bounding volumes
    bounds_stale: bool,
}

impl TriMesh {
    /// Create a mesh from positions and faces.
    ///
    /// Fails if any face references a vertex that does not exist.
    pub fn new(positions: Vec<Vec3>, faces: Vec<[u32; 3]>) -> InflationResult<Self> {
        let vertex_count = positions.len();
        if let Some((i, face)) = faces
            .iter()
            .enumerate()
            .find(|(_, face)| face.iter().any(|&v| v as usize >= vertex_count))
        {
            return Err(InflationError::InvalidMesh(format!(
                "face {} {:?} references a vertex outside 0..{}",
                i, face, vertex_count
            )));
        }

        Ok(Self::from_trusted(positions, faces))
    }

    /// Build a mesh whose face indices are already known to be in range.
    pub(crate) fn from_trusted(positions: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        let mut mesh = Self {
            positions,
            face_normals: Vec::with_capacity(faces.len()),
            faces,
            bounds_stale: true,
        };
        mesh.compute_face_normals();
        mesh
    }

    /// Create a mesh from flat buffers: positions `[x0, y0, z0, ...]` and
    /// indices `[i0, i1, i2, ...]`.
    pub fn from_flat(positions: &[f32], indices: &[u32]) -> InflationResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(InflationError::InvalidMesh(format!(
                "position buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(InflationError::InvalidMesh(format!(
                "index buffer length {} is not a multiple of 3",
                indices.len()
            )));
        }

        let positions = positions.chunks_exact(3).map(Vec3::from_slice).collect();
        let faces = indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();

        Self::new(positions, faces)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable vertex positions.
    ///
    /// Marks bounds stale. Face normals are not refreshed until
    /// [`compute_face_normals`](Self::compute_face_normals) is called.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        self.bounds_stale = true;
        &mut self.positions
    }

    /// Triangles as vertex index triples.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Per-face unit normals.
    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    /// Positions as a flat `[x0, y0, z0, ...]` slice.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Face normals as a flat `[nx0, ny0, nz0, ...]` slice.
    pub fn flat_face_normals(&self) -> &[f32] {
        bytemuck::cast_slice(&self.face_normals)
    }

    /// Faces as a flat `[i0, i1, i2, ...]` slice.
    pub fn flat_indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.faces)
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Recompute every face normal from the current positions.
    ///
    /// Normal of face `(a, b, c)` is `normalize((c - b) x (a - b))`, which
    /// points outward for counter-clockwise winding.
    pub fn compute_face_normals(&mut self) {
        let positions = &self.positions;
        self.face_normals.clear();
        self.face_normals.extend(self.faces.iter().map(|&[a, b, c]| {
            face_normal(
                positions[a as usize],
                positions[b as usize],
                positions[c as usize],
            )
        }));
    }

    /// Whether positions changed since the last [`mark_bounds_fresh`](Self::mark_bounds_fresh).
    pub fn bounds_stale(&self) -> bool {
        self.bounds_stale
    }

    /// Mark bounds as up to date.
    pub fn mark_bounds_fresh(&mut self) {
        self.bounds_stale = false;
    }

    pub(crate) fn mark_bounds_stale(&mut self) {
        self.bounds_stale = true;
    }

    /// Axis-aligned bounding box as `(min, max)`, or None for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }

    /// Bounding sphere as `(center, radius)`.
    ///
    /// The center is the bounding-box center; the radius is the largest
    /// distance from it to any vertex.
    pub fn bounding_sphere(&self) -> Option<(Vec3, f32)> {
        let (min, max) = self.bounding_box()?;
        let center = (min + max) * 0.5;
        let radius_sq = self
            .positions
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0f32, f32::max);
        Some((center, radius_sq.sqrt()))
    }

    // =========================================================================
    // Preparation
    // =========================================================================

    /// Translate the mesh so its bounding-box center sits at the origin.
    pub fn center(&mut self) {
        if let Some((min, max)) = self.bounding_box() {
            let offset = (min + max) * 0.5;
            for p in &mut self.positions {
                *p -= offset;
            }
            self.bounds_stale = true;
        }
    }

    /// Uniform scale that fits the largest bounding-box extent into a cube
    /// of side `box_size`.
    ///
    /// The geometry is left untouched; the renderer applies the scale to its
    /// own transform. Returns None for an empty or flat-to-a-point mesh.
    pub fn fit_scale(&self, box_size: f32) -> Option<f32> {
        let (min, max) = self.bounding_box()?;
        let extent = (max - min).max_element();
        (extent > 0.0).then(|| box_size / extent)
    }
}

/// Side of the cube a loaded model is scaled to fit in the viewer.
pub const DEFAULT_FIT_BOX_SIZE: f32 = 0.441_884_77;

/// Unit normal of triangle `(a, b, c)`, zero if the triangle has no area.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - b).cross(a - b).normalize_or_zero()
}
