//! Mesh inflation simulation.
//!
//! Every edge of the mesh is a spring with a rest length captured at
//! initialization, and every face pushes its vertices along its outward
//! normal. Each step sums both forces per vertex, integrates with damped
//! explicit Euler, and recomputes face normals.
//!
//! # Module Structure
//!
//! - `edge` - Canonical edge keys and spring edges
//! - `topology` - Edge extraction from faces
//! - `params` - Step parameters and degenerate edge policy
//! - `forces` - Spring and pressure force assembly
//! - `integrator` - Velocity and position update
//! - `state` - Per-mesh velocities and springs
//! - `engine` - `initialize` / `step`
//! - `session` - Run toggle and frame loop around the engine

mod edge;
mod engine;
mod forces;
mod integrator;
mod params;
mod session;
mod state;
mod topology;

pub use edge::{EdgeKey, SpringEdge};
pub use engine::{InflationEngine, StepReport};
pub use params::{DegenerateEdgePolicy, InflationParams};
pub use session::{InflationSession, TickOutcome};
pub use topology::EdgeSet;
