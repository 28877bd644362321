use crate::bounds::BoundingBox;
use crate::octree::OctreeConfig;
use crate::primitive::{Primitive, PrimitiveKind};
use crate::scene::{SceneConfig, SpatialScene};
use crate::visualize::DisplayMode;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_PRIMITIVES: &'static str = r#"
export const PRIMITIVE_STRIDE = 15;
export const PRIMITIVE_PLANE = 0;
export const PRIMITIVE_BOX = 1;
export const MODE_KDTREE = 0;
export const MODE_OCTREE = 1;
"#;

/// Number of `f64` values per primitive in the flat buffers handed to JS:
/// kind, origin (3), normal (3), half extents (3), color (3), opacity, depth.
pub const PRIMITIVE_STRIDE: usize = 15;

fn mode_to_js(mode: DisplayMode) -> u8 {
    match mode {
        DisplayMode::KdTree => 0,
        DisplayMode::Octree => 1,
    }
}

fn mode_from_js(mode: u8) -> Result<DisplayMode, JsError> {
    match mode {
        0 => Ok(DisplayMode::KdTree),
        1 => Ok(DisplayMode::Octree),
        other => Err(JsError::new(&format!("unknown display mode {}", other))),
    }
}

/// Packs primitives into records of [`PRIMITIVE_STRIDE`] values.
pub fn flatten_primitives(primitives: &[Primitive]) -> Vec<f64> {
    let mut out = Vec::with_capacity(primitives.len() * PRIMITIVE_STRIDE);
    for p in primitives {
        out.push(match p.kind {
            PrimitiveKind::Plane => 0.0,
            PrimitiveKind::Box => 1.0,
        });
        out.extend_from_slice(&p.origin);
        out.extend_from_slice(&p.normal);
        out.extend_from_slice(&p.half_extents);
        out.extend(p.color.iter().map(|&c| c as f64));
        out.push(p.opacity as f64);
        out.push(p.depth as f64);
    }
    out
}

/// Represents an axis-aligned bounding box in 3D space.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

#[wasm_bindgen]
impl BoundingBox3D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> BoundingBox3D {
        BoundingBox3D { min_x, min_y, min_z, max_x, max_y, max_z }
    }
}

impl From<BoundingBox3D> for BoundingBox<3> {
    fn from(b: BoundingBox3D) -> Self {
        Self {
            min: [b.min_x, b.min_y, b.min_z],
            max: [b.max_x, b.max_y, b.max_z],
        }
    }
}

/// A point cloud with its k-d tree and octree, for a JS renderer to draw.
#[wasm_bindgen(js_name = Scene)]
pub struct SceneWASM {
    inner: SpatialScene,
}

#[wasm_bindgen(js_class = Scene)]
impl SceneWASM {
    /// Creates an empty scene building `levels` octree levels and drawing
    /// k-d planes down to `kd_display_depth`.
    #[wasm_bindgen(constructor)]
    pub fn new(levels: u32, kd_display_depth: u32) -> Result<SceneWASM, JsError> {
        let config = SceneConfig {
            octree: OctreeConfig { levels, ..Default::default() },
            kd_display_depth,
            ..Default::default()
        };
        Ok(SceneWASM { inner: SpatialScene::new(config)? })
    }

    /// Loads interleaved `[x0, y0, z0, x1, ...]` coordinates and rebuilds both trees.
    #[wasm_bindgen(js_name = setPoints)]
    pub fn set_points(&mut self, coords: &[f64]) -> Result<(), JsError> {
        Ok(self.inner.set_points_flat(coords)?)
    }

    #[wasm_bindgen(js_name = randomPoints)]
    pub fn random_points(&mut self, count: usize, bounds: BoundingBox3D) -> Result<(), JsError> {
        Ok(self.inner.random_points(count, &bounds.into())?)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> {
        self.inner.cloud().to_flat()
    }

    #[wasm_bindgen(getter)]
    pub fn count_points(&self) -> usize {
        self.inner.cloud().len()
    }

    #[wasm_bindgen(getter)]
    pub fn count_kd_nodes(&self) -> usize {
        self.inner.kdtree().len()
    }

    #[wasm_bindgen(getter)]
    pub fn count_octree_nodes(&self) -> usize {
        self.inner.octree().len()
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> u8 {
        mode_to_js(self.inner.display_mode())
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: u8) -> Result<(), JsError> {
        self.inner.set_display_mode(mode_from_js(mode)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleMode)]
    pub fn toggle_mode(&mut self) -> u8 {
        mode_to_js(self.inner.toggle_display_mode())
    }

    /// Primitives of the current mode as flat records.
    pub fn visualize(&self) -> Vec<f64> {
        flatten_primitives(&self.inner.visualize())
    }

    #[wasm_bindgen(js_name = visualizeMode)]
    pub fn visualize_mode(&self, mode: u8, max_depth: u32) -> Result<Vec<f64>, JsError> {
        let mode = mode_from_js(mode)?;
        Ok(flatten_primitives(&self.inner.visualize_mode(mode, max_depth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_layout() {
        let p = Primitive {
            kind: PrimitiveKind::Box,
            origin: [1.0, 2.0, 3.0],
            normal: [0.0; 3],
            half_extents: [0.5, 0.5, 0.5],
            color: [1.0, 0.5, 0.0],
            opacity: 0.5,
            depth: 2,
        };
        let flat = flatten_primitives(&[p, p]);
        assert_eq!(flat.len(), 2 * PRIMITIVE_STRIDE);
        assert_eq!(flat[0], 1.0);
        assert_eq!(&flat[1..4], &[1.0, 2.0, 3.0]);
        assert_eq!(&flat[7..10], &[0.5, 0.5, 0.5]);
        assert_eq!(flat[13], 0.5);
        assert_eq!(flat[14], 2.0);
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(mode_to_js(DisplayMode::Octree), 1);
        assert_eq!(mode_from_js(0).ok(), Some(DisplayMode::KdTree));
    }
}
