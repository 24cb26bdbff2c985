//! Simulation parameters.

use serde::{Deserialize, Serialize};

use crate::error::{InflationError, InflationResult};

/// What to do with an edge whose endpoints coincide.
///
/// The spring direction `d / |d|` is undefined for such an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateEdgePolicy {
    /// Contribute no spring force for the edge this tick and count it in the
    /// step report.
    #[default]
    Skip,
    /// Fail the tick with `DegenerateEdge` before any state is changed.
    Abort,
}

/// Parameters for one inflation step.
///
/// Deserializes from a partial JS object; missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InflationParams {
    /// Spring coefficient (Hooke's law), must be >= 0 (default: 0.1).
    pub stiffness: f32,
    /// Pressure magnitude along face normals; negative deflates (default: 0.005).
    pub amplitude: f32,
    /// Velocity retention per tick, must be >= 0 (default: 0.8).
    /// Above 1 the simulation gains energy and diverges.
    pub damping: f32,
    /// Zero-length edge handling (default: skip).
    pub degenerate_edges: DegenerateEdgePolicy,
}

impl Default for InflationParams {
    fn default() -> Self {
        Self {
            stiffness: 0.1,
            amplitude: 0.005,
            damping: 0.8,
            degenerate_edges: DegenerateEdgePolicy::Skip,
        }
    }
}

impl InflationParams {
    /// Parameters with the given coefficients and the default edge policy.
    pub fn new(stiffness: f32, amplitude: f32, damping: f32) -> Self {
        Self {
            stiffness,
            amplitude,
            damping,
            ..Self::default()
        }
    }

    /// Reject values that would make the step meaningless.
    ///
    /// `stiffness` and `damping` must be finite and non-negative;
    /// `amplitude` must be finite.
    pub fn validate(&self) -> InflationResult<()> {
        let checks = [
            ("stiffness", self.stiffness, true),
            ("amplitude", self.amplitude, false),
            ("damping", self.damping, true),
        ];
        for (name, value, non_negative) in checks {
            if !value.is_finite() || (non_negative && value < 0.0) {
                return Err(InflationError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
