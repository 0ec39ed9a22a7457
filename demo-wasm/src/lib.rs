use drapery::{Anchors, Cloth, ClothConfig, Vec3};
use wasm_bindgen::prelude::*;

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    cloth: Cloth<f32>,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(size_u: usize, size_v: usize) -> Result<ClothDemo, JsError> {
        let cloth = Cloth::new(size_u, size_v, ClothConfig::new().with_sub_steps(4))
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ClothDemo { cloth })
    }

    /// Advance one frame. Fails once the simulation diverges; call `reset` to continue.
    pub fn update(&mut self, dt: f32) -> Result<(), JsError> {
        self.cloth.step(dt).map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn reset(&mut self) {
        self.cloth.reset();
    }

    pub fn resize(&mut self, size_u: usize, size_v: usize) -> Result<(), JsError> {
        self.cloth
            .set_dimensions(size_u, size_v)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn set_wind(&mut self, x: f32, y: f32, z: f32, intensity: f32) {
        let config = self.cloth.config_mut();
        config.wind_direction = Vec3::new(x, y, z);
        config.wind_intensity = intensity;
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.cloth.config_mut().anchors = if pinned { Anchors::CornerPair } else { Anchors::Free };
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] at offset `ku + size_u * kv`
    pub fn positions(&self) -> Vec<f32> {
        flatten(self.cloth.positions())
    }

    /// Returns flat per-vertex normals, same layout as `positions`
    pub fn normals(&self) -> Vec<f32> {
        flatten(self.cloth.normals())
    }

    pub fn size_u(&self) -> usize {
        self.cloth.size_u()
    }
    pub fn size_v(&self) -> usize {
        self.cloth.size_v()
    }
    pub fn is_diverged(&self) -> bool {
        self.cloth.is_diverged()
    }
}

fn flatten(points: &[Vec3<f32>]) -> Vec<f32> {
    let mut out = Vec::with_capacity(points.len() * 3);
    for p in points {
        out.push(p.x);
        out.push(p.y);
        out.push(p.z);
    }
    out
}
