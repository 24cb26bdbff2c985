//! Per-vertex force assembly.
//!
//! Two contributions are summed into a caller-owned force buffer:
//!
//! - **Springs**: Hooke's law along every edge, `s = k * (|d| - rest)`.
//!   A stretched edge (`s > 0`) pulls its endpoints together, a compressed
//!   one pushes them apart. Equal and opposite, so springs never move the
//!   center of mass.
//! - **Pressure**: `amplitude * normal` added to each corner of every face.
//!   This is per incidence, not area-weighted: a vertex touched by more
//!   faces receives proportionally more push.

use glam::Vec3;
use tracing::warn;

use super::edge::SpringEdge;
use super::params::DegenerateEdgePolicy;
use crate::error::{InflationError, InflationResult};

/// Add spring forces for every edge into `forces`.
///
/// Returns the number of degenerate (zero-length) edges skipped. Under
/// [`DegenerateEdgePolicy::Abort`] the first such edge fails the call; the
/// buffer is then partially written and must be discarded.
pub fn accumulate_springs(
    positions: &[Vec3],
    edges: &[SpringEdge],
    stiffness: f32,
    policy: DegenerateEdgePolicy,
    forces: &mut [Vec3],
) -> InflationResult<usize> {
    let mut degenerate = 0;

    for edge in edges {
        let (start, end) = (edge.start as usize, edge.end as usize);
        let d = positions[end] - positions[start];
        let dist = d.length();

        if !(dist > 0.0 && dist.is_finite()) {
            match policy {
                DegenerateEdgePolicy::Skip => {
                    degenerate += 1;
                    continue;
                }
                DegenerateEdgePolicy::Abort => {
                    warn!(start = edge.start, end = edge.end, "aborting step on degenerate edge");
                    return Err(InflationError::DegenerateEdge {
                        start: edge.start,
                        end: edge.end,
                    });
                }
            }
        }

        let s = stiffness * (dist - edge.rest_length);
        let f = d / dist * s;
        forces[start] += f;
        forces[end] -= f;
    }

    Ok(degenerate)
}

/// Add `amplitude * normal` of every face to each of its three vertices.
pub fn accumulate_pressure(
    faces: &[[u32; 3]],
    normals: &[Vec3],
    amplitude: f32,
    forces: &mut [Vec3],
) {
    for (&[a, b, c], &normal) in faces.iter().zip(normals) {
        let f = normal * amplitude;
        forces[a as usize] += f;
        forces[b as usize] += f;
        forces[c as usize] += f;
    }
}
