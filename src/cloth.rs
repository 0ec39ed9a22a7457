//! Mass-spring cloth: owns a parametric grid plus per-vertex velocity and force.

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::force::accumulate_forces;
use crate::grid::ParametricGrid;
use crate::integrate::{check_divergence, integrate_vertices};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::vec::Vec3;
use alloc::vec;
use alloc::vec::Vec as AllocVec;

/// Whether the run can still be trusted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Stable,
    /// The divergence guard tripped. Only [`Cloth::set_dimensions`] or
    /// [`Cloth::reset`] return to `Stable`.
    Diverged,
}

/// A rectangular cloth advanced by explicit, damped Euler integration.
///
/// Each tick is two strictly ordered phases: [`Cloth::update_forces`] reads
/// positions and writes forces, then [`Cloth::integrate`] reads forces and
/// writes velocities and positions. [`Cloth::step`] runs both.
///
/// ```
/// use drapery::{Cloth, ClothConfig};
///
/// let mut cloth: Cloth<f32> = Cloth::new(20, 20, ClothConfig::new()).unwrap();
/// for _ in 0..10 {
///     cloth.step(0.01).unwrap();
/// }
/// assert!(cloth.position(10, 10).z < 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Cloth<F: Float> {
    grid: ParametricGrid<F>,
    velocities: AllocVec<Vec3<F>>,
    forces: AllocVec<Vec3<F>>,
    config: ClothConfig<F>,
    state: SimulationState,
}

impl<F: Float> Cloth<F> {
    /// Create a flat `size_u x size_v` cloth over the unit square at rest.
    pub fn new(size_u: usize, size_v: usize, config: ClothConfig<F>) -> Result<Self, ClothError> {
        check_dimensions(size_u, size_v)?;
        let grid = ParametricGrid::plane_xy_unit(size_u, size_v);
        let n = grid.vertex_count();
        Ok(Cloth {
            grid,
            velocities: vec![Vec3::zero(); n],
            forces: vec![Vec3::zero(); n],
            config,
            state: SimulationState::Stable,
        })
    }

    /// Re-lay the cloth as a flat unit grid and zero velocity and force.
    pub fn set_dimensions(&mut self, size_u: usize, size_v: usize) -> Result<(), ClothError> {
        check_dimensions(size_u, size_v)?;
        self.grid.set_plane_xy_unit(size_u, size_v);

        let n = self.grid.vertex_count();
        self.velocities.clear();
        self.velocities.resize(n, Vec3::zero());
        self.forces.clear();
        self.forces.resize(n, Vec3::zero());
        self.state = SimulationState::Stable;

        #[cfg(feature = "log")]
        log::debug!("cloth resized to {}x{} ({} vertices)", size_u, size_v, n);
        Ok(())
    }

    /// Back to the flat initial layout at the current dimensions.
    pub fn reset(&mut self) {
        let (size_u, size_v) = (self.grid.size_u(), self.grid.size_v());
        self.grid.set_plane_xy_unit(size_u, size_v);
        self.velocities.iter_mut().for_each(|v| *v = Vec3::zero());
        self.forces.iter_mut().for_each(|f| *f = Vec3::zero());
        self.state = SimulationState::Stable;
    }

    /// Recompute normals and the full force field from current positions.
    pub fn update_forces(&mut self) {
        self.update_forces_observed(&mut NoOpStepObserver);
    }

    pub fn update_forces_observed<O: StepObserver>(&mut self, observer: &mut O) {
        self.grid.update_normals();
        accumulate_forces(&self.grid, &self.config, &mut self.forces);
        observer.on_forces_updated();
    }

    /// Advance velocities and positions by `dt` using the current forces.
    ///
    /// Collisions are resolved per vertex, then every vertex is checked
    /// against the divergence limit. On divergence the state is left as
    /// integrated and the error is returned; nothing is rolled back.
    pub fn integrate(&mut self, dt: F) -> Result<(), ClothError> {
        self.integrate_observed(dt, &mut NoOpStepObserver)
    }

    pub fn integrate_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> Result<(), ClothError> {
        if !dt.is_finite() || dt <= F::zero() {
            return Err(ClothError::InvalidTimeStep);
        }
        assert_eq!(self.velocities.len(), self.grid.vertex_count(), "incorrect size");

        let size_u = self.grid.size_u();
        integrate_vertices(
            self.grid.positions_mut(),
            &mut self.velocities,
            &self.forces,
            size_u,
            dt,
            &self.config,
            observer,
        );
        observer.on_integrate();

        if let Err(err) = check_divergence(self.grid.positions(), size_u, self.config.divergence_limit) {
            self.state = SimulationState::Diverged;
            observer.on_divergence(&err);
            return Err(err);
        }
        Ok(())
    }

    /// One frame: `sub_steps` rounds of force update plus integration over `dt / sub_steps`.
    pub fn step(&mut self, dt: F) -> Result<(), ClothError> {
        self.step_observed(dt, &mut NoOpStepObserver)
    }

    pub fn step_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> Result<(), ClothError> {
        let sub_steps = self.config.sub_steps.max(1);
        let sub_dt = dt / F::from_usize(sub_steps);
        for _sub in 0..sub_steps {
            self.update_forces_observed(observer);
            self.integrate_observed(sub_dt, observer)?;
        }
        observer.on_step_complete();
        Ok(())
    }

    pub fn position(&self, ku: usize, kv: usize) -> Vec3<F> { self.grid.vertex(ku, kv) }
    pub fn position_mut(&mut self, ku: usize, kv: usize) -> &mut Vec3<F> { self.grid.vertex_mut(ku, kv) }
    pub fn normal(&self, ku: usize, kv: usize) -> Vec3<F> { self.grid.normal(ku, kv) }

    pub fn velocity(&self, ku: usize, kv: usize) -> Vec3<F> {
        self.velocities[self.grid.offset(ku, kv)]
    }

    pub fn velocity_mut(&mut self, ku: usize, kv: usize) -> &mut Vec3<F> {
        let idx = self.grid.offset(ku, kv);
        &mut self.velocities[idx]
    }

    pub fn force(&self, ku: usize, kv: usize) -> Vec3<F> {
        self.forces[self.grid.offset(ku, kv)]
    }

    pub fn force_mut(&mut self, ku: usize, kv: usize) -> &mut Vec3<F> {
        let idx = self.grid.offset(ku, kv);
        &mut self.forces[idx]
    }

    pub fn positions(&self) -> &[Vec3<F>] { self.grid.positions() }
    pub fn normals(&self) -> &[Vec3<F>] { self.grid.normals() }
    pub fn velocities(&self) -> &[Vec3<F>] { &self.velocities }
    pub fn forces(&self) -> &[Vec3<F>] { &self.forces }
    pub fn grid(&self) -> &ParametricGrid<F> { &self.grid }
    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn config_mut(&mut self) -> &mut ClothConfig<F> { &mut self.config }
    pub fn size_u(&self) -> usize { self.grid.size_u() }
    pub fn size_v(&self) -> usize { self.grid.size_v() }
    pub fn vertex_count(&self) -> usize { self.grid.vertex_count() }
    pub fn state(&self) -> SimulationState { self.state }
    pub fn is_diverged(&self) -> bool { self.state == SimulationState::Diverged }

    /// Sum of `|v|^2 / 2` over all vertices (unit mass).
    pub fn kinetic_energy(&self) -> F {
        self.velocities
            .iter()
            .fold(F::zero(), |acc, v| acc + v.length_sq() * F::half())
    }

    /// Largest vertex distance from the origin.
    pub fn max_distance_from_origin(&self) -> F {
        self.grid
            .positions()
            .iter()
            .fold(F::zero(), |acc, p| acc.max(p.length()))
    }
}

fn check_dimensions(size_u: usize, size_v: usize) -> Result<(), ClothError> {
    if size_u < 2 || size_v < 2 {
        return Err(ClothError::InvalidGridDimensions { size_u, size_v });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Anchors;
    use crate::observer::CountingStepObserver;

    #[test]
    fn rejects_degenerate_grid() {
        let err = Cloth::<f32>::new(1, 5, ClothConfig::new()).unwrap_err();
        assert_eq!(err, ClothError::InvalidGridDimensions { size_u: 1, size_v: 5 });
    }

    #[test]
    fn resize_reallocates_and_zeroes() {
        let mut cloth = Cloth::<f32>::new(3, 3, ClothConfig::new()).unwrap();
        cloth.step(0.01).unwrap();
        cloth.set_dimensions(5, 4).unwrap();
        assert_eq!(cloth.vertex_count(), 20);
        assert_eq!(cloth.velocities().len(), 20);
        assert_eq!(cloth.forces().len(), 20);
        assert!(cloth.velocities().iter().all(|v| *v == Vec3::zero()));
        assert!(cloth.forces().iter().all(|f| *f == Vec3::zero()));
    }

    #[test]
    fn rejects_non_positive_dt() {
        let mut cloth = Cloth::<f64>::new(3, 3, ClothConfig::new()).unwrap();
        assert_eq!(cloth.integrate(0.0), Err(ClothError::InvalidTimeStep));
        assert_eq!(cloth.integrate(-0.1), Err(ClothError::InvalidTimeStep));
        assert_eq!(cloth.state(), SimulationState::Stable);
    }

    #[test]
    fn anchor_velocity_is_not_cleared() {
        let mut cloth = Cloth::<f64>::new(4, 4, ClothConfig::new()).unwrap();
        *cloth.velocity_mut(0, 0) = Vec3::new(0.0, 0.0, 0.5);
        cloth.step(0.01).unwrap();
        // Zero force, so only damping acts: 0.5 * (1 - 0.2 * 0.01).
        assert!((cloth.velocity(0, 0).z - 0.499).abs() < 1e-9);
        assert!(cloth.position(0, 0).z > 0.0);
    }

    #[test]
    fn sub_steps_update_forces_each_round() {
        let config = ClothConfig::new().with_sub_steps(3).with_anchors(Anchors::Free);
        let mut cloth = Cloth::<f32>::new(3, 3, config).unwrap();
        let mut observer = CountingStepObserver::default();
        cloth.step_observed(0.03, &mut observer).unwrap();
        assert_eq!(observer.force_updates, 3);
        assert_eq!(observer.integrations, 3);
        assert_eq!(observer.steps, 1);
    }

    #[test]
    fn zero_sub_steps_still_integrates_once() {
        let mut cloth = Cloth::<f64>::new(3, 3, ClothConfig::new().with_anchors(Anchors::Free)).unwrap();
        cloth.config_mut().sub_steps = 0;
        let mut observer = CountingStepObserver::default();
        cloth.step_observed(0.01, &mut observer).unwrap();
        assert_eq!(observer.integrations, 1);
        assert!(cloth.position(1, 1).z < 0.0);
        assert!(cloth.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn reset_restores_flat_sheet() {
        let mut cloth = Cloth::<f32>::new(4, 4, ClothConfig::new()).unwrap();
        for _ in 0..5 {
            cloth.step(0.01).unwrap();
        }
        cloth.reset();
        assert_eq!(cloth.position(3, 3), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(cloth.kinetic_energy(), 0.0);
    }

    #[test]
    fn kinetic_energy_sums_all_vertices() {
        let mut cloth = Cloth::<f64>::new(2, 2, ClothConfig::new()).unwrap();
        *cloth.velocity_mut(1, 1) = Vec3::new(2.0, 0.0, 0.0);
        *cloth.velocity_mut(0, 1) = Vec3::new(0.0, 0.0, 1.0);
        assert!((cloth.kinetic_energy() - 2.5).abs() < 1e-12);
    }
}
