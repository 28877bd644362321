use crate::bounds::BoundingBox;
use crate::kdtree::KdTree;
use crate::octree::{Octree, OctreeNode};
use crate::primitive::{kd_plane, octree_box, Primitive, PrimitiveStyle};
use serde::{Deserialize, Serialize};

/// Which tree a visualization shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    KdTree,
    Octree,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::KdTree => DisplayMode::Octree,
            DisplayMode::Octree => DisplayMode::KdTree,
        }
    }
}

/// Splitting planes of `tree` from the root down to `max_depth`, in pre-order.
///
/// `bounds` is the box of the whole cloud. Each node's plane spans the part of
/// it left over by the splits of its ancestors.
pub fn visualize_kdtree(tree: &KdTree, max_depth: u32, bounds: BoundingBox<3>, style: &PrimitiveStyle) -> Vec<Primitive> {
    let mut out = Vec::new();
    // Duplicate points chain as deep as their count, so the walk keeps its own stack.
    let mut stack: Vec<(u32, u32, BoundingBox<3>)> = tree.root().map(|root| (root, 0, bounds)).into_iter().collect();
    while let Some((id, depth, bounds)) = stack.pop() {
        let node = tree.node(id);
        out.push(kd_plane(node, &bounds, depth, max_depth, style));
        if depth == max_depth {
            continue;
        }

        let (lower, upper) = bounds.split(node.axis as usize, node.split_val);
        if let Some(right) = node.right() {
            stack.push((right, depth + 1, upper));
        }
        if let Some(left) = node.left() {
            stack.push((left, depth + 1, lower));
        }
    }
    out
}

/// Node cubes of `tree` from the root down to `max_depth`, in pre-order.
pub fn visualize_octree(tree: &Octree, max_depth: u32, style: &PrimitiveStyle) -> Vec<Primitive> {
    let mut out = Vec::new();
    if let Some(root) = tree.root() {
        visit_octree(root, 0, max_depth, style, &mut out);
    }
    out
}

fn visit_octree(node: &OctreeNode, depth: u32, max_depth: u32, style: &PrimitiveStyle, out: &mut Vec<Primitive>) {
    if depth > max_depth {
        return;
    }
    out.push(octree_box(node, depth, max_depth, style));
    for (_, child) in node.children() {
        visit_octree(child, depth + 1, max_depth, style, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::octree::OctreeConfig;
    use crate::primitive::PrimitiveKind;

    fn cube_points() -> Vec<[f64; 3]> {
        let mut points = Vec::new();
        for x in 0..4 {
            for y in 0..4 {
                for z in 0..4 {
                    points.push([x as f64 + 0.5, y as f64 + 0.5, z as f64 + 0.5]);
                }
            }
        }
        points
    }

    #[test]
    fn test_toggle() {
        assert_eq!(DisplayMode::KdTree.toggled(), DisplayMode::Octree);
        assert_eq!(DisplayMode::Octree.toggled(), DisplayMode::KdTree);
    }

    #[test]
    fn test_kd_depth_bound() {
        let points = cube_points();
        let tree = KdTree::build(&points);
        let bounds = BoundingBox::new([0.0; 3], [4.0; 3]);
        let style = PrimitiveStyle::default();

        assert_eq!(visualize_kdtree(&tree, 0, bounds, &style).len(), 1);
        assert_eq!(visualize_kdtree(&tree, 2, bounds, &style).len(), 7);
        assert_eq!(visualize_kdtree(&tree, 100, bounds, &style).len(), 64);

        let prims = visualize_kdtree(&tree, 2, bounds, &style);
        assert!(prims.iter().all(|p| p.kind == PrimitiveKind::Plane && p.depth <= 2));
    }

    #[test]
    fn test_kd_preorder_and_box_threading() {
        let points = cube_points();
        let tree = KdTree::build(&points);
        let bounds = BoundingBox::new([0.0; 3], [4.0; 3]);
        let prims = visualize_kdtree(&tree, 1, bounds, &PrimitiveStyle::default());

        assert_eq!(prims.iter().map(|p| p.depth).collect::<Vec<_>>(), vec![0, 1, 1]);
        let root = prims[0];
        assert_eq!(root.normal, [1.0, 0.0, 0.0]);
        assert_eq!(root.half_extents, [0.0, 2.0, 2.0]);

        // The children are Y planes confined to either side of the root's X split.
        let split = root.origin[0];
        let (left, right) = (prims[1], prims[2]);
        assert_eq!(left.normal, [0.0, 1.0, 0.0]);
        assert!((left.origin[0] - split / 2.0).abs() < 1e-12);
        assert!((left.half_extents[0] - split / 2.0).abs() < 1e-12);
        assert!((right.origin[0] - (split + 4.0) / 2.0).abs() < 1e-12);
        assert!((right.half_extents[0] - (4.0 - split) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_kd_walk_over_long_chain() {
        let tree = KdTree::build(&vec![[1.0, 2.0, 3.0]; 50_000]);
        let bounds = BoundingBox::new([0.0; 3], [4.0; 3]);
        let prims = visualize_kdtree(&tree, u32::MAX, bounds, &PrimitiveStyle::default());
        assert_eq!(prims.len(), 50_000);
        assert_eq!(prims.last().map(|p| p.depth), Some(49_999));
    }

    #[test]
    fn test_octree_depth_bound() {
        let points = cube_points();
        let bounds = BoundingBox::new([0.0; 3], [4.0; 3]);
        let config = OctreeConfig { levels: 3, leaf_capacity: 1 };
        let tree = Octree::build(&points, bounds, config).unwrap();
        let style = PrimitiveStyle::default();

        assert_eq!(visualize_octree(&tree, 0, &style).len(), 1);
        assert_eq!(visualize_octree(&tree, 1, &style).len(), 9);
        assert_eq!(visualize_octree(&tree, 2, &style).len(), 73);

        let prims = visualize_octree(&tree, 1, &style);
        assert_eq!(prims[0].half_extents, [2.0; 3]);
        assert!(prims[1..].iter().all(|p| p.depth == 1 && p.half_extents == [1.0; 3]));
    }

    #[test]
    fn test_empty_trees_emit_nothing() {
        let bounds = BoundingBox::new([0.0; 3], [1.0; 3]);
        let style = PrimitiveStyle::default();
        assert!(visualize_kdtree(&KdTree::new(), 3, bounds, &style).is_empty());
        assert!(visualize_octree(&Octree::default(), 3, &style).is_empty());
    }
}
