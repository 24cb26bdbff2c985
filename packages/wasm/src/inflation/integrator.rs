//! Damped explicit Euler update.

use glam::Vec3;

/// Advance velocities and positions by one tick.
///
/// For every vertex `i`:
///
/// ```text
/// velocity[i] = (velocity[i] + force[i]) * damping
/// position[i] += velocity[i]
/// ```
///
/// Damping scales the sum of the old velocity and the new force, not the
/// old velocity alone. Unit mass and unit time step are implied.
pub fn integrate(positions: &mut [Vec3], velocities: &mut [Vec3], forces: &[Vec3], damping: f32) {
    debug_assert_eq!(positions.len(), velocities.len());
    debug_assert_eq!(positions.len(), forces.len());

    let bodies = positions.iter_mut().zip(velocities.iter_mut());
    for ((position, velocity), &force) in bodies.zip(forces) {
        *velocity = (*velocity + force) * damping;
        *position += *velocity;
    }
}
