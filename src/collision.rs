//! Static obstacles the cloth collides with: a ground plane and a sphere.

use crate::float::Float;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which obstacle a vertex was resolved against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Ground,
    Sphere,
}

/// Horizontal ground plane with a sticky clamp.
///
/// A vertex whose `z` drops below `height + margin` is put back at
/// `rest_height` and its vertical velocity is overwritten with
/// `contact_velocity`. Detection threshold and resting height differ on
/// purpose; both are reproduced as configured.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundPlane<F: Float> {
    pub height: F,
    pub margin: F,
    pub rest_height: F,
    pub contact_velocity: F,
}

impl<F: Float> GroundPlane<F> {
    pub fn new(height: F, margin: F, rest_height: F, contact_velocity: F) -> Self {
        GroundPlane { height, margin, rest_height, contact_velocity }
    }

    /// Clamp a single vertex. Returns true if it was in contact.
    pub fn resolve(&self, pos: &mut Vec3<F>, vel: &mut Vec3<F>) -> bool {
        if pos.z < self.height + self.margin {
            pos.z = self.rest_height;
            vel.z = self.contact_velocity;
            true
        } else {
            false
        }
    }
}

impl<F: Float> Default for GroundPlane<F> {
    fn default() -> Self {
        GroundPlane::new(
            F::from_f32(-1.101),
            F::from_f32(0.01),
            F::from_f32(-1.10),
            F::from_f32(-1.1),
        )
    }
}

/// Static sphere. Vertices closer than `radius + margin` to the center are
/// projected onto that shell and lose their outward-normal velocity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphereObstacle<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
    pub margin: F,
}

impl<F: Float> SphereObstacle<F> {
    pub fn new(center: Vec3<F>, radius: F, margin: F) -> Self {
        SphereObstacle { center, radius, margin }
    }

    /// Radius of the shell vertices are pushed onto.
    pub fn contact_radius(&self) -> F {
        self.radius + self.margin
    }

    /// Project a single vertex out of the sphere. Returns true if it was in contact.
    pub fn resolve(&self, pos: &mut Vec3<F>, vel: &mut Vec3<F>) -> bool {
        let delta = *pos - self.center;
        let dist = delta.length();
        let shell = self.contact_radius();
        if dist >= shell {
            return false;
        }

        // A vertex sitting on the center has no outward direction.
        let normal = if dist.is_near_zero(F::from_f32(1e-12)) {
            Vec3::unit_z()
        } else {
            delta / dist
        };

        *pos = self.center + normal * shell;
        let radial = vel.dot(normal);
        *vel -= normal * radial;
        true
    }
}

impl<F: Float> Default for SphereObstacle<F> {
    fn default() -> Self {
        SphereObstacle::new(Vec3::from_f32(0.4, 0.5, -0.8), F::from_f32(0.198), F::from_f32(0.01))
    }
}

/// An obstacle in the cloth's collider list.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Collider<F: Float> {
    Ground(GroundPlane<F>),
    Sphere(SphereObstacle<F>),
}

impl<F: Float> Collider<F> {
    pub fn kind(&self) -> CollisionKind {
        match self {
            Collider::Ground(_) => CollisionKind::Ground,
            Collider::Sphere(_) => CollisionKind::Sphere,
        }
    }

    pub fn resolve(&self, pos: &mut Vec3<F>, vel: &mut Vec3<F>) -> bool {
        match self {
            Collider::Ground(c) => c.resolve(pos, vel),
            Collider::Sphere(c) => c.resolve(pos, vel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_clamps_below_threshold() {
        let ground = GroundPlane::<f32>::default();
        let mut pos = Vec3::new(0.2, 0.2, -1.2);
        let mut vel = Vec3::new(0.5, 0.0, -3.0);
        assert!(ground.resolve(&mut pos, &mut vel));
        assert_eq!(pos.z, -1.10);
        assert_eq!(vel.z, -1.1);
        assert_eq!(vel.x, 0.5);
    }

    #[test]
    fn ground_catches_vertex_inside_margin() {
        // -1.095 sits above the plane but within the detection margin.
        let ground = GroundPlane::<f32>::default();
        let mut pos = Vec3::new(0.0, 0.0, -1.095);
        let mut vel = Vec3::zero();
        assert!(ground.resolve(&mut pos, &mut vel));
        assert_eq!(pos.z, -1.10);
    }

    #[test]
    fn ground_ignores_vertex_above() {
        let ground = GroundPlane::<f32>::default();
        let mut pos = Vec3::new(0.0, 0.0, -1.0);
        let mut vel = Vec3::new(0.0, 0.0, -0.3);
        assert!(!ground.resolve(&mut pos, &mut vel));
        assert_eq!(vel.z, -0.3);
    }

    #[test]
    fn sphere_projects_to_shell_and_removes_radial_velocity() {
        let sphere = SphereObstacle::<f64>::default();
        let mut pos = sphere.center + Vec3::new(0.1, 0.0, 0.0);
        let mut vel = Vec3::new(-2.0, 0.7, 0.0);
        assert!(sphere.resolve(&mut pos, &mut vel));
        assert!((pos.distance(sphere.center) - sphere.contact_radius()).abs() < 1e-12);
        assert!(vel.x.abs() < 1e-12);
        assert!((vel.y - 0.7).abs() < 1e-12);
    }

    #[test]
    fn sphere_center_uses_up_normal() {
        let sphere = SphereObstacle::<f32>::default();
        let mut pos = sphere.center;
        let mut vel = Vec3::new(0.0, 0.0, -1.0);
        assert!(sphere.resolve(&mut pos, &mut vel));
        assert!((pos.z - (sphere.center.z + 0.208)).abs() < 1e-6);
        assert_eq!(vel.z, 0.0);
    }

    #[test]
    fn collider_dispatch_reports_kind() {
        let c = Collider::Sphere(SphereObstacle::<f32>::default());
        assert_eq!(c.kind(), CollisionKind::Sphere);
    }
}
