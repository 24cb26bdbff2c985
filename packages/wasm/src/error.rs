//! Error types for mesh loading and inflation.
//!
//! Every failure is returned to the caller as a value. Nothing here is
//! allowed to escape into the per-frame scheduler as a panic: a failed
//! tick is skipped and the caller decides whether to try again next frame.

use thiserror::Error;

/// Errors produced by the mesh and inflation modules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InflationError {
    /// `step` was called before `initialize` completed for the current mesh,
    /// or the mesh has a different vertex count than the simulation state.
    #[error("Inflation is not ready yet: initialize the engine with the current mesh first")]
    NotInitialized,

    /// A zero-length edge was met during force assembly under the abort policy.
    #[error("Degenerate edge ({start}, {end}): endpoints coincide, spring direction undefined")]
    DegenerateEdge {
        /// Lower vertex index of the edge
        start: u32,
        /// Higher vertex index of the edge
        end: u32,
    },

    /// A simulation parameter was negative or not finite.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name (stiffness, amplitude, damping)
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Input buffers do not describe a valid triangle mesh.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
}

/// Result alias for mesh and inflation operations.
pub type InflationResult<T> = Result<T, InflationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InflationError::InvalidParameter {
            name: "damping",
            value: -0.5,
        };
        assert!(err.to_string().contains("damping"));
        assert!(err.to_string().contains("-0.5"));

        let err = InflationError::DegenerateEdge { start: 3, end: 7 };
        assert!(err.to_string().contains("(3, 7)"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InflationError>();
    }
}
