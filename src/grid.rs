//! Parametric `size_u x size_v` grid of 3D points with surface normals.
//!
//! This is the storage the cloth is built on. It knows nothing about
//! physics: positions, per-vertex normals, bounds-checked access by
//! `(ku, kv)`, and neighbor lookup by integer offset.

use crate::float::Float;
use crate::vec::Vec3;
use alloc::vec;
use alloc::vec::Vec as AllocVec;

/// A rectangular grid of vertices stored at offset `ku + size_u * kv`.
#[derive(Clone, Debug)]
pub struct ParametricGrid<F: Float> {
    vertices: AllocVec<Vec3<F>>,
    normals: AllocVec<Vec3<F>>,
    size_u: usize,
    size_v: usize,
}

impl<F: Float> ParametricGrid<F> {
    /// Create a flat unit grid in the XY plane. See [`Self::set_plane_xy_unit`].
    pub fn plane_xy_unit(size_u: usize, size_v: usize) -> Self {
        let mut grid = ParametricGrid {
            vertices: AllocVec::new(),
            normals: AllocVec::new(),
            size_u: 0,
            size_v: 0,
        };
        grid.set_plane_xy_unit(size_u, size_v);
        grid
    }

    /// Lay the grid out over the unit square at `z = 0`.
    ///
    /// Vertex `(ku, kv)` sits at `(ku / (size_u - 1), kv / (size_v - 1), 0)`.
    /// Both sizes must be at least 2.
    pub fn set_plane_xy_unit(&mut self, size_u: usize, size_v: usize) {
        assert!(size_u >= 2 && size_v >= 2, "grid must be at least 2x2 (got {}x{})", size_u, size_v);

        self.size_u = size_u;
        self.size_v = size_v;

        let su = F::from_usize(size_u - 1);
        let sv = F::from_usize(size_v - 1);
        self.vertices.clear();
        self.vertices.reserve(size_u * size_v);
        for kv in 0..size_v {
            for ku in 0..size_u {
                let x = F::from_usize(ku) / su;
                let y = F::from_usize(kv) / sv;
                self.vertices.push(Vec3::new(x, y, F::zero()));
            }
        }

        self.normals = vec![Vec3::unit_z(); size_u * size_v];
    }

    pub fn size_u(&self) -> usize { self.size_u }
    pub fn size_v(&self) -> usize { self.size_v }
    pub fn vertex_count(&self) -> usize { self.vertices.len() }

    /// Linear offset of `(ku, kv)`. Panics when either index is out of range.
    pub fn offset(&self, ku: usize, kv: usize) -> usize {
        assert!(ku < self.size_u, "value ku ({}) should be < size_u ({})", ku, self.size_u);
        assert!(kv < self.size_v, "value kv ({}) should be < size_v ({})", kv, self.size_v);
        ku + self.size_u * kv
    }

    /// Inverse of [`Self::offset`].
    pub fn coords(&self, offset: usize) -> (usize, usize) {
        (offset % self.size_u, offset / self.size_u)
    }

    /// Grid coordinates of `(ku + du, kv + dv)`, or `None` if that falls off the grid.
    pub fn neighbor(&self, ku: usize, kv: usize, du: isize, dv: isize) -> Option<(usize, usize)> {
        let nu = ku.checked_add_signed(du)?;
        let nv = kv.checked_add_signed(dv)?;
        if nu < self.size_u && nv < self.size_v {
            Some((nu, nv))
        } else {
            None
        }
    }

    pub fn vertex(&self, ku: usize, kv: usize) -> Vec3<F> {
        self.vertices[self.offset(ku, kv)]
    }

    pub fn vertex_mut(&mut self, ku: usize, kv: usize) -> &mut Vec3<F> {
        let idx = self.offset(ku, kv);
        &mut self.vertices[idx]
    }

    /// Unit surface normal as of the last [`Self::update_normals`].
    pub fn normal(&self, ku: usize, kv: usize) -> Vec3<F> {
        self.normals[self.offset(ku, kv)]
    }

    pub fn positions(&self) -> &[Vec3<F>] { &self.vertices }
    pub fn positions_mut(&mut self) -> &mut [Vec3<F>] { &mut self.vertices }
    pub fn normals(&self) -> &[Vec3<F>] { &self.normals }

    /// Recompute per-vertex normals from the current positions.
    ///
    /// The normal is `d/du x d/dv`, with central differences inside the grid
    /// and one-sided differences on the border. A flat grid in the XY plane
    /// gets `+Z`. Degenerate neighborhoods get the zero vector.
    pub fn update_normals(&mut self) {
        let (nu, nv) = (self.size_u, self.size_v);
        for kv in 0..nv {
            for ku in 0..nu {
                let (u0, u1) = (ku.saturating_sub(1), (ku + 1).min(nu - 1));
                let (v0, v1) = (kv.saturating_sub(1), (kv + 1).min(nv - 1));
                let du = self.vertices[u1 + nu * kv] - self.vertices[u0 + nu * kv];
                let dv = self.vertices[ku + nu * v1] - self.vertices[ku + nu * v0];
                self.normals[ku + nu * kv] = du.cross(dv).normalize();
            }
        }
    }
}
