//! Per-vertex force accumulation: gravity, wind, and spring forces.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::grid::ParametricGrid;
use crate::spring::{hooke_force, SpringKind};
use crate::vec::Vec3;

/// Overwrite `forces` with the force field of the grid's current shape.
///
/// Gravity and wind are divided by the vertex count so the cloth as a whole
/// feels the configured totals regardless of resolution. Wind acts only along
/// the surface normal. Spring classes are summed in
/// [`SpringKind::ALL`] order, then anchors are zeroed.
///
/// The grid's normals must be current; [`Cloth`](crate::cloth::Cloth)
/// refreshes them before calling this.
pub fn accumulate_forces<F: Float>(
    grid: &ParametricGrid<F>,
    config: &ClothConfig<F>,
    forces: &mut [Vec3<F>],
) {
    assert_eq!(forces.len(), grid.vertex_count(), "force array out of sync with grid");

    let n = F::from_usize(grid.vertex_count());
    let gravity = config.gravity / n;
    let wind = config.wind_direction / n;

    for (force, &normal) in forces.iter_mut().zip(grid.normals()) {
        *force = gravity + normal * (config.wind_intensity * normal.dot(wind));
    }

    for kind in SpringKind::ALL {
        accumulate_springs(grid, config, kind, forces);
    }

    for (ku, kv) in config.anchors.points(grid.size_v()) {
        forces[grid.offset(ku, kv)] = Vec3::zero();
    }
}

/// Add the contribution of one spring class to every vertex.
fn accumulate_springs<F: Float>(
    grid: &ParametricGrid<F>,
    config: &ClothConfig<F>,
    kind: SpringKind,
    forces: &mut [Vec3<F>],
) {
    let params = config.spring(kind);
    if params.stiffness == F::zero() {
        return;
    }
    let rest_length = params.rest_length(grid.size_u());
    let positions = grid.positions();

    for (idx, force) in forces.iter_mut().enumerate() {
        let (ku, kv) = grid.coords(idx);
        let p = positions[idx];
        for &(du, dv) in kind.offsets() {
            if let Some((nu, nv)) = grid.neighbor(ku, kv, du, dv) {
                let q = positions[nu + grid.size_u() * nv];
                *force += hooke_force(p, q, params.stiffness, rest_length);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Anchors;
    use crate::spring::SpringParams;
    use alloc::vec;

    fn zero_forces(grid: &ParametricGrid<f64>) -> alloc::vec::Vec<Vec3<f64>> {
        vec![Vec3::zero(); grid.vertex_count()]
    }

    #[test]
    fn gravity_is_spread_over_vertices() {
        let mut grid = ParametricGrid::<f64>::plane_xy_unit(4, 5);
        grid.update_normals();
        let config = ClothConfig::new().without_springs().with_anchors(Anchors::Free);
        let mut forces = zero_forces(&grid);
        accumulate_forces(&grid, &config, &mut forces);
        for f in &forces {
            assert!((f.z + 9.81 / 20.0).abs() < 1e-6);
        }
    }

    #[test]
    fn wind_acts_along_normal_only() {
        let mut grid = ParametricGrid::<f64>::plane_xy_unit(3, 3);
        grid.update_normals();
        let config = ClothConfig::new()
            .with_gravity(Vec3::zero())
            .without_springs()
            .with_anchors(Anchors::Free)
            .with_wind(Vec3::new(1.0, 0.0, 1.0), 9.0);
        let mut forces = zero_forces(&grid);
        accumulate_forces(&grid, &config, &mut forces);
        for f in &forces {
            // Normal is +Z, so only the Z part of the wind survives: 9 * (1 / 9).
            assert!(f.x.abs() < 1e-12);
            assert!((f.z - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn wind_parallel_to_surface_vanishes() {
        let mut grid = ParametricGrid::<f64>::plane_xy_unit(3, 3);
        grid.update_normals();
        let config = ClothConfig::new()
            .with_gravity(Vec3::zero())
            .without_springs()
            .with_wind(Vec3::new(1.0, 1.0, 0.0), 50.0);
        let mut forces = zero_forces(&grid);
        accumulate_forces(&grid, &config, &mut forces);
        assert!(forces.iter().all(|f| f.length() < 1e-12));
    }

    #[test]
    fn anchors_are_zeroed() {
        let mut grid = ParametricGrid::<f64>::plane_xy_unit(6, 4);
        *grid.vertex_mut(1, 0) = Vec3::new(0.5, 0.1, 0.3);
        grid.update_normals();
        let config = ClothConfig::new().with_wind(Vec3::new(0.0, 0.0, 1.0), 3.0);
        let mut forces = zero_forces(&grid);
        accumulate_forces(&grid, &config, &mut forces);
        assert_eq!(forces[grid.offset(0, 0)], Vec3::zero());
        assert_eq!(forces[grid.offset(0, 3)], Vec3::zero());
        assert_ne!(forces[grid.offset(5, 0)], Vec3::zero());
    }

    #[test]
    fn structural_springs_balance_on_flat_interior() {
        let nu = 5;
        let mut grid = ParametricGrid::<f64>::plane_xy_unit(nu, nu);
        grid.update_normals();
        // Rest length equal to the grid spacing 1 / (nu - 1).
        let rest_factor = nu as f64 / (nu - 1) as f64;
        let config = ClothConfig::new()
            .with_gravity(Vec3::zero())
            .without_springs()
            .with_structural(SpringParams::new(30.0, rest_factor));
        let mut forces = zero_forces(&grid);
        accumulate_forces(&grid, &config, &mut forces);
        for kv in 1..nu - 1 {
            for ku in 1..nu - 1 {
                let f = forces[grid.offset(ku, kv)];
                assert!(f.length() < 1e-9, "interior ({}, {}) force {:?}", ku, kv, f);
            }
        }
    }

    #[test]
    fn stretched_edge_vertex_is_pulled_inward() {
        let mut grid = ParametricGrid::<f64>::plane_xy_unit(3, 3);
        grid.update_normals();
        let config = ClothConfig::new()
            .with_gravity(Vec3::zero())
            .without_springs()
            .with_anchors(Anchors::Free)
            .with_structural(SpringParams::new(30.0, 0.3));
        let mut forces = zero_forces(&grid);
        accumulate_forces(&grid, &config, &mut forces);
        // Corner (2, 2): springs to (1, 2) and (2, 1), both stretched to 0.5 > 0.1.
        let f = forces[grid.offset(2, 2)];
        assert!(f.x < 0.0 && f.y < 0.0);
        assert!((f.x + 30.0 * 0.4).abs() < 1e-9);
    }

    fn single_class_config(kind: SpringKind) -> ClothConfig<f64> {
        let config = ClothConfig::new()
            .with_gravity(Vec3::zero())
            .without_springs()
            .with_anchors(Anchors::Free)
            .without_colliders();
        match kind {
            SpringKind::Structural => config.with_structural(SpringParams::new(10.0, 0.3)),
            SpringKind::Shear => config.with_shear(SpringParams::new(10.0, 0.3)),
            SpringKind::Bending => config.with_bending(SpringParams::new(10.0, 0.3)),
        }
    }

    #[test]
    fn bending_pulls_corner_toward_second_neighbors() {
        let mut grid = ParametricGrid::<f64>::plane_xy_unit(3, 3);
        grid.update_normals();
        let config = single_class_config(SpringKind::Bending);
        let mut forces = zero_forces(&grid);
        accumulate_forces(&grid, &config, &mut forces);
        // (2, 0) and (0, 2) sit 1.0 away, rest length 0.1: 10 * 0.9 per axis.
        let corner = forces[grid.offset(0, 0)];
        assert!((corner.x - 9.0).abs() < 1e-9);
        assert!((corner.y - 9.0).abs() < 1e-9);
        assert!(corner.z.abs() < 1e-12);
        // Every distance-2 neighbor of the centre is off the grid.
        assert_eq!(forces[grid.offset(1, 1)], Vec3::zero());
    }

    #[test]
    fn shear_pulls_corner_along_diagonal() {
        let mut grid = ParametricGrid::<f64>::plane_xy_unit(3, 3);
        grid.update_normals();
        let config = single_class_config(SpringKind::Shear);
        let mut forces = zero_forces(&grid);
        accumulate_forces(&grid, &config, &mut forces);
        let diagonal = 0.5f64.sqrt();
        let expected = 10.0 * (diagonal - 0.1) / 2.0f64.sqrt();
        let corner = forces[grid.offset(0, 0)];
        assert!((corner.x - expected).abs() < 1e-9);
        assert!((corner.y - expected).abs() < 1e-9);
        let opposite = forces[grid.offset(2, 2)];
        assert!((opposite.x + expected).abs() < 1e-9);
        assert!((opposite.y + expected).abs() < 1e-9);
        // Four symmetric diagonals cancel at the centre.
        assert!(forces[grid.offset(1, 1)].length() < 1e-9);
    }
}
