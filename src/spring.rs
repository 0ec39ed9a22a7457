//! Hookean spring classes linking grid neighbors.
//!
//! Springs are never stored. Each class is a fixed table of integer offsets
//! from a vertex; the links present at a vertex are the offsets that land
//! inside the grid.

use crate::float::Float;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The three spring classes of a mass-spring cloth.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpringKind {
    /// Axis-aligned distance-1 neighbors; resists stretching.
    Structural,
    /// Diagonal distance-1 neighbors; resists in-plane shearing.
    Shear,
    /// Axis-aligned distance-2 neighbors; resists folding.
    Bending,
}

const STRUCTURAL_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const SHEAR_OFFSETS: [(isize, isize); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];
const BENDING_OFFSETS: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

impl SpringKind {
    /// All classes in accumulation order.
    pub const ALL: [SpringKind; 3] = [SpringKind::Structural, SpringKind::Shear, SpringKind::Bending];

    /// Grid offsets `(du, dv)` of the four canonical neighbors.
    pub fn offsets(self) -> &'static [(isize, isize); 4] {
        match self {
            SpringKind::Structural => &STRUCTURAL_OFFSETS,
            SpringKind::Shear => &SHEAR_OFFSETS,
            SpringKind::Bending => &BENDING_OFFSETS,
        }
    }
}

/// Stiffness and rest length of one spring class.
///
/// The rest length scales with grid resolution: `rest_factor / size_u`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpringParams<F: Float> {
    pub stiffness: F,
    pub rest_factor: F,
}

impl<F: Float> SpringParams<F> {
    pub fn new(stiffness: F, rest_factor: F) -> Self {
        SpringParams { stiffness, rest_factor }
    }

    /// Structural default: K = 30, rest length 1 / Nu.
    pub fn structural() -> Self {
        SpringParams::new(F::from_f32(30.0), F::one())
    }

    /// Shear default: K = 2, rest length sqrt(2) / (2 Nu).
    pub fn shear() -> Self {
        SpringParams::new(F::two(), F::two().sqrt() * F::half())
    }

    /// Bending default: K = 25, rest length 2 / Nu.
    pub fn bending() -> Self {
        SpringParams::new(F::from_f32(25.0), F::two())
    }

    pub fn rest_length(&self, size_u: usize) -> F {
        self.rest_factor / F::from_usize(size_u)
    }
}

/// Force exerted on the vertex at `from` by a spring attached at `to`.
///
/// Returns `-K (|u| - L) u / |u|` with `u = from - to`. Coincident endpoints
/// have no direction and contribute nothing.
pub fn hooke_force<F: Float>(from: Vec3<F>, to: Vec3<F>, stiffness: F, rest_length: F) -> Vec3<F> {
    let u = from - to;
    let len = u.length();
    if len.is_near_zero(F::from_f32(1e-12)) {
        return Vec3::zero();
    }
    -(u * (stiffness * (len - rest_length) / len))
}
