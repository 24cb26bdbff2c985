//! Triangle mesh data and load-time preparation.
//!
//! The mesh is owned by whoever loaded it; the inflation engine borrows it
//! and mutates positions in place. Alongside the core `TriMesh` type this
//! module provides welding for triangle-soup inputs, topology diagnostics,
//! and a few procedural shapes.

mod primitives;
mod report;
mod trimesh;
mod vertex;
mod weld;

pub use report::MeshReport;
pub use trimesh::{face_normal, TriMesh, DEFAULT_FIT_BOX_SIZE};
pub use vertex::VertexId;
pub use weld::{prepare, weld_vertices, PrepareConfig, DEFAULT_WELD_TOLERANCE};
