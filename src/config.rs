//! Configuration for a cloth simulation instance.

use crate::collision::{Collider, GroundPlane, SphereObstacle};
use crate::float::Float;
use crate::spring::{SpringKind, SpringParams};
use crate::vec::Vec3;
use alloc::vec;
use alloc::vec::Vec as AllocVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which vertices have their force zeroed every tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Anchors {
    /// Corners `(0, 0)` and `(0, size_v - 1)`.
    CornerPair,
    /// No anchors; the whole cloth is free.
    Free,
}

impl Anchors {
    /// Grid coordinates pinned on a grid with `size_v` rows along v.
    pub fn points(self, size_v: usize) -> AllocVec<(usize, usize)> {
        match self {
            Anchors::CornerPair => vec![(0, 0), (0, size_v - 1)],
            Anchors::Free => AllocVec::new(),
        }
    }
}

/// Tunables for a [`Cloth`](crate::cloth::Cloth).
///
/// # Builder Pattern
/// ```
/// use drapery::config::ClothConfig;
/// use drapery::vec::Vec3;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_gravity(Vec3::new(0.0, 0.0, -9.81))
///     .with_wind(Vec3::new(1.0, 0.0, 0.0), 5.0)
///     .with_damping(0.2)
///     .with_sub_steps(2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Total gravity, spread evenly over all vertices. Default: (0, 0, -9.81).
    pub gravity: Vec3<F>,
    /// Wind direction, spread evenly over all vertices. Default: +X.
    pub wind_direction: Vec3<F>,
    /// Wind strength. Default: 0 (calm).
    pub wind_intensity: F,
    /// Linear velocity damping coefficient. Default: 0.2.
    pub damping: F,
    pub structural: SpringParams<F>,
    pub shear: SpringParams<F>,
    pub bending: SpringParams<F>,
    pub anchors: Anchors,
    /// Obstacles resolved in order after each integration. Default: ground, then sphere.
    pub colliders: AllocVec<Collider<F>>,
    /// Maximum distance from the origin before the run is declared diverged. Default: 30.
    pub divergence_limit: F,
    /// Integration sub-steps per [`Cloth::step`](crate::cloth::Cloth::step). Default: 1.
    pub sub_steps: usize,
}

impl<F: Float> ClothConfig<F> {
    /// Create a config with the default tunables.
    pub fn new() -> Self {
        ClothConfig {
            gravity: Vec3::from_f32(0.0, 0.0, -9.81),
            wind_direction: Vec3::from_f32(1.0, 0.0, 0.0),
            wind_intensity: F::zero(),
            damping: F::from_f32(0.2),
            structural: SpringParams::structural(),
            shear: SpringParams::shear(),
            bending: SpringParams::bending(),
            anchors: Anchors::CornerPair,
            colliders: vec![
                Collider::Ground(GroundPlane::default()),
                Collider::Sphere(SphereObstacle::default()),
            ],
            divergence_limit: F::from_f32(30.0),
            sub_steps: 1,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_wind(mut self, direction: Vec3<F>, intensity: F) -> Self {
        self.wind_direction = direction;
        self.wind_intensity = intensity;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_structural(mut self, params: SpringParams<F>) -> Self {
        self.structural = params;
        self
    }

    pub fn with_shear(mut self, params: SpringParams<F>) -> Self {
        self.shear = params;
        self
    }

    pub fn with_bending(mut self, params: SpringParams<F>) -> Self {
        self.bending = params;
        self
    }

    /// Zero the stiffness of every spring class, keeping rest lengths.
    pub fn without_springs(mut self) -> Self {
        self.structural.stiffness = F::zero();
        self.shear.stiffness = F::zero();
        self.bending.stiffness = F::zero();
        self
    }

    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    /// Replace the default ground plane.
    pub fn with_ground(mut self, ground: GroundPlane<F>) -> Self {
        self.colliders.retain(|c| !matches!(c, Collider::Ground(_)));
        self.colliders.insert(0, Collider::Ground(ground));
        self
    }

    /// Replace the default sphere.
    pub fn with_sphere(mut self, sphere: SphereObstacle<F>) -> Self {
        self.colliders.retain(|c| !matches!(c, Collider::Sphere(_)));
        self.colliders.push(Collider::Sphere(sphere));
        self
    }

    pub fn with_collider(mut self, collider: Collider<F>) -> Self {
        self.colliders.push(collider);
        self
    }

    pub fn without_colliders(mut self) -> Self {
        self.colliders.clear();
        self
    }

    pub fn with_divergence_limit(mut self, limit: F) -> Self {
        self.divergence_limit = limit;
        self
    }

    /// Set the number of sub-steps (at least 1).
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    pub fn spring(&self, kind: SpringKind) -> &SpringParams<F> {
        match kind {
            SpringKind::Structural => &self.structural,
            SpringKind::Shear => &self.shear,
            SpringKind::Bending => &self.bending,
        }
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
