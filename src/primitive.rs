use crate::bounds::BoundingBox;
use crate::kdtree::KdNode;
use crate::octree::OctreeNode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// A finite splitting plane of a k-d node.
    Plane,
    /// The cube of an octree node.
    Box,
}

/// A drawable shape derived from one tree node.
///
/// Both kinds are placed by their center and sized by half extents along the
/// world axes. A plane has a zero half extent along its normal, a box has a
/// zero normal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub origin: [f64; 3],
    pub normal: [f64; 3],
    pub half_extents: [f64; 3],
    /// Linear RGB in `0..=1`.
    pub color: [f32; 3],
    /// `1` is opaque.
    pub opacity: f32,
    /// Depth of the node in its tree.
    pub depth: u32,
}

/// Colors and the depth fade applied to emitted primitives.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveStyle {
    /// Plane colors for X, Y and Z splits.
    pub axis_colors: [[f32; 3]; 3],
    pub box_color: [f32; 3],
    /// Opacity lost between depth 0 and the maximum displayed depth.
    pub fade: f32,
    /// Lowest opacity any primitive gets.
    pub min_opacity: f32,
}

impl Default for PrimitiveStyle {
    fn default() -> Self {
        Self {
            axis_colors: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            box_color: [1.0, 0.85, 0.2],
            fade: 200.0 / 255.0,
            min_opacity: 0.2,
        }
    }
}

impl PrimitiveStyle {
    /// Opacity for a node at `depth` when drawing down to `max_depth`.
    ///
    /// Falls linearly from 1 and is clamped at `min_opacity`.
    pub fn opacity(&self, depth: u32, max_depth: u32) -> f32 {
        if max_depth == 0 {
            return 1.0;
        }
        let t = depth as f32 / max_depth as f32;
        (1.0 - self.fade * t).max(self.min_opacity)
    }
}

/// Unit vector along `axis`.
fn axis_normal(axis: usize) -> [f64; 3] {
    let mut n = [0.0; 3];
    n[axis] = 1.0;
    n
}

/// The splitting plane of `node`, clipped to the box its ancestors left it.
///
/// The plane is centered on the box in its two in-plane axes and sits at the
/// split value on the split axis.
pub fn kd_plane(node: &KdNode, bounds: &BoundingBox<3>, depth: u32, max_depth: u32, style: &PrimitiveStyle) -> Primitive {
    let axis = node.axis as usize;

    let mut origin = bounds.center();
    origin[axis] = node.split_val;

    let mut half_extents = bounds.half_extent();
    half_extents[axis] = 0.0;

    Primitive {
        kind: PrimitiveKind::Plane,
        origin,
        normal: axis_normal(axis),
        half_extents,
        color: style.axis_colors[axis],
        opacity: style.opacity(depth, max_depth),
        depth,
    }
}

/// The cube of an octree node.
pub fn octree_box(node: &OctreeNode, depth: u32, max_depth: u32, style: &PrimitiveStyle) -> Primitive {
    Primitive {
        kind: PrimitiveKind::Box,
        origin: node.bounds.center(),
        normal: [0.0; 3],
        half_extents: node.bounds.half_extent(),
        color: style.box_color,
        opacity: style.opacity(depth, max_depth),
        depth,
    }
}
