//! Vertex welding and load-time mesh preparation.
//!
//! Model loaders often hand over a triangle soup: every face carries its own
//! three vertices, so no two faces share an index. A spring network built on
//! such a mesh has no shared edges and simply falls apart when inflated.
//! Welding merges vertices that sit within a tolerance of each other so that
//! adjacent faces share indices again.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{TriMesh, VertexId};
use crate::error::{InflationError, InflationResult};
use crate::spatial::SpatialIndex;

/// Default merge distance, matching four-decimal position precision.
pub const DEFAULT_WELD_TOLERANCE: f32 = 1e-4;

/// Load-time preparation applied before a mesh reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrepareConfig {
    /// Merge distance for welding, or None to keep the vertex buffer as-is.
    pub weld_tolerance: Option<f32>,
    /// Translate the mesh so its bounding-box center is the origin.
    pub center: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            weld_tolerance: Some(DEFAULT_WELD_TOLERANCE),
            center: true,
        }
    }
}

/// Apply a [`PrepareConfig`] to a freshly loaded mesh.
pub fn prepare(mesh: TriMesh, config: &PrepareConfig) -> InflationResult<TriMesh> {
    let mut mesh = match config.weld_tolerance {
        Some(tolerance) => weld_vertices(&mesh, tolerance)?,
        None => mesh,
    };
    if config.center {
        mesh.center();
    }
    Ok(mesh)
}

/// Merge vertices closer than `tolerance` and drop the faces that collapse.
///
/// Each vertex maps to the nearest already-kept vertex within `tolerance`.
/// A face that ends up with a repeated index is removed. Only vertices the
/// surviving faces reference are kept, in their input order.
pub fn weld_vertices(mesh: &TriMesh, tolerance: f32) -> InflationResult<TriMesh> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(InflationError::InvalidParameter {
            name: "weld_tolerance",
            value: tolerance,
        });
    }

    let mut used = vec![false; mesh.vertex_count()];
    for face in mesh.faces() {
        for &v in face {
            used[v as usize] = true;
        }
    }

    // Merge pass: every used vertex maps to a representative
    let mut index = SpatialIndex::new();
    let mut merged = Vec::with_capacity(mesh.vertex_count());
    let mut remap = vec![u32::MAX; mesh.vertex_count()];

    for (old, &position) in mesh.positions().iter().enumerate() {
        if !used[old] {
            continue;
        }
        remap[old] = match index.nearest_within(position, tolerance) {
            Some(existing) => existing.raw(),
            None => {
                let id = VertexId(merged.len() as u32);
                merged.push(position);
                index.insert(id, position);
                id.raw()
            }
        };
    }

    let mut faces: Vec<[u32; 3]> = mesh
        .faces()
        .iter()
        .map(|&[a, b, c]| [remap[a as usize], remap[b as usize], remap[c as usize]])
        .filter(|&[a, b, c]| a != b && b != c && a != c)
        .collect();

    // Compact pass: a representative only used by collapsed faces is dropped
    let mut kept = vec![false; merged.len()];
    for face in &faces {
        for &v in face {
            kept[v as usize] = true;
        }
    }
    let mut compact = vec![u32::MAX; merged.len()];
    let mut positions = Vec::with_capacity(merged.len());
    for (v, position) in merged.into_iter().enumerate() {
        if kept[v] {
            compact[v] = positions.len() as u32;
            positions.push(position);
        }
    }
    for face in &mut faces {
        *face = face.map(|v| compact[v as usize]);
    }

    debug!(
        vertices_before = mesh.vertex_count(),
        vertices_after = positions.len(),
        faces_dropped = mesh.face_count() - faces.len(),
        "welded mesh vertices"
    );

    TriMesh::new(positions, faces)
}
