//! Damped explicit Euler integration, obstacle resolution, and the divergence guard.

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::vec::Vec3;

/// Advance every vertex by `dt` and resolve collisions.
///
/// `v' = (1 - damping dt) v + dt f`, then `p' = p + dt v'`, then each
/// collider in order. Vertices are independent; `size_u` is only used to
/// report grid coordinates.
pub fn integrate_vertices<F: Float, O: StepObserver>(
    positions: &mut [Vec3<F>],
    velocities: &mut [Vec3<F>],
    forces: &[Vec3<F>],
    size_u: usize,
    dt: F,
    config: &ClothConfig<F>,
    observer: &mut O,
) {
    assert_eq!(velocities.len(), forces.len(), "incorrect size");
    assert_eq!(positions.len(), velocities.len(), "incorrect size");

    let decay = F::one() - config.damping * dt;
    for (idx, ((pos, vel), &force)) in positions
        .iter_mut()
        .zip(velocities.iter_mut())
        .zip(forces)
        .enumerate()
    {
        *vel = *vel * decay + force * dt;
        *pos += *vel * dt;

        for collider in &config.colliders {
            if collider.resolve(pos, vel) {
                observer.on_collision(idx % size_u, idx / size_u, collider.kind());
            }
        }
    }
}

/// Fail if any vertex is farther than `limit` from the origin.
///
/// Reports the first offender in offset order. NaN positions count as
/// diverged.
pub fn check_divergence<F: Float>(positions: &[Vec3<F>], size_u: usize, limit: F) -> Result<(), ClothError> {
    for (idx, p) in positions.iter().enumerate() {
        let distance = p.length();
        if !distance.is_finite() || distance > limit {
            return Err(ClothError::Divergence {
                ku: idx % size_u,
                kv: idx / size_u,
                distance: distance.to_f64(),
                limit: limit.to_f64(),
            });
        }
    }
    Ok(())
}
