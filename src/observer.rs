//! Step observer trait for monitoring cloth simulation progress.

use crate::collision::CollisionKind;
use crate::error::ClothError;

/// Trait for observing cloth simulation steps.
///
/// Implement this trait to monitor the solver (e.g., for debugging,
/// visualization, or profiling). All methods have default no-op
/// implementations.
pub trait StepObserver {
    /// Called after the force field has been recomputed.
    fn on_forces_updated(&mut self) {}

    /// Called when a vertex was moved by an obstacle.
    fn on_collision(&mut self, _ku: usize, _kv: usize, _kind: CollisionKind) {}

    /// Called after every vertex has been integrated and resolved.
    fn on_integrate(&mut self) {}

    /// Called when the divergence guard trips.
    fn on_divergence(&mut self, _error: &ClothError) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards simulation events to the `log` facade.
#[cfg(feature = "log")]
#[derive(Default)]
pub struct LogStepObserver {
    collisions: usize,
}

#[cfg(feature = "log")]
impl StepObserver for LogStepObserver {
    fn on_forces_updated(&mut self) {
        log::trace!("cloth forces updated");
    }

    fn on_collision(&mut self, ku: usize, kv: usize, kind: CollisionKind) {
        self.collisions += 1;
        log::trace!("vertex ({}, {}) resolved against {:?}", ku, kv, kind);
    }

    fn on_integrate(&mut self) {
        log::debug!("cloth integrated, {} collision(s)", self.collisions);
        self.collisions = 0;
    }

    fn on_divergence(&mut self, error: &ClothError) {
        log::warn!("{}", error);
    }

    fn on_step_complete(&mut self) {
        log::trace!("cloth step complete");
    }
}

/// Counts events; handy for tests and simple diagnostics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountingStepObserver {
    pub force_updates: usize,
    pub ground_contacts: usize,
    pub sphere_contacts: usize,
    pub integrations: usize,
    pub divergences: usize,
    pub steps: usize,
}

impl StepObserver for CountingStepObserver {
    fn on_forces_updated(&mut self) {
        self.force_updates += 1;
    }

    fn on_collision(&mut self, _ku: usize, _kv: usize, kind: CollisionKind) {
        match kind {
            CollisionKind::Ground => self.ground_contacts += 1,
            CollisionKind::Sphere => self.sphere_contacts += 1,
        }
    }

    fn on_integrate(&mut self) {
        self.integrations += 1;
    }

    fn on_divergence(&mut self, _error: &ClothError) {
        self.divergences += 1;
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}
