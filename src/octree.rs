use crate::bounds::{octant_code, BoundingBox};
use crate::error::{Error, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Nodes holding this many points or fewer are not subdivided.
pub const DEFAULT_LEAF_CAPACITY: usize = 5;

/// Number of levels built when nothing else is configured.
pub const DEFAULT_LEVELS: u32 = 4;

/// Build parameters of an [`Octree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Number of tree levels, the root being level 0. Must be at least 1.
    pub levels: u32,
    /// Maximum number of points a node keeps without being subdivided.
    pub leaf_capacity: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            leaf_capacity: DEFAULT_LEAF_CAPACITY,
        }
    }
}

impl OctreeConfig {
    /// Depth of the deepest level that may hold nodes.
    pub fn max_depth(&self) -> Result<u32> {
        self.levels.checked_sub(1).ok_or(Error::ZeroLevels)
    }
}

/// A cube of the octree together with the points that fall into it.
///
/// Every node holds at least one point. A subdivided node's indices are
/// exactly the union of its children's indices.
#[derive(Clone, Debug, PartialEq)]
pub struct OctreeNode {
    pub indices: Vec<usize>,
    pub bounds: BoundingBox<3>,
    children: [Option<Box<OctreeNode>>; 8],
}

impl OctreeNode {
    pub fn child(&self, code: usize) -> Option<&OctreeNode> {
        self.children[code].as_deref()
    }

    /// Non-empty children with their octant codes.
    pub fn children(&self) -> impl Iterator<Item = (usize, &OctreeNode)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(code, c)| c.as_deref().map(|c| (code, c)))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children().map(|(_, c)| c.count()).sum::<usize>()
    }

    /// Levels in this subtree, including this one.
    pub fn height(&self) -> usize {
        1 + self.children().map(|(_, c)| c.height()).max().unwrap_or(0)
    }
}

/// Recursively builds the node for `bounds` holding `indices`.
///
/// Returns `None` for an empty index list or when `depth` exceeds `max_depth`.
/// A node becomes a leaf at `max_depth` or when it holds at most
/// `leaf_capacity` points; otherwise its points are distributed over the eight
/// octants, and octants without points get no child.
pub fn build_node(
    points: &[[f64; 3]],
    bounds: BoundingBox<3>,
    indices: Vec<usize>,
    depth: u32,
    max_depth: u32,
    leaf_capacity: usize,
) -> Option<OctreeNode> {
    if indices.is_empty() || depth > max_depth {
        return None;
    }

    let mut node = OctreeNode {
        indices,
        bounds,
        children: Default::default(),
    };

    if depth == max_depth || node.indices.len() <= leaf_capacity {
        return Some(node);
    }

    let mid = bounds.center();
    let mut octant_indices: [Vec<usize>; 8] = Default::default();
    for &idx in &node.indices {
        octant_indices[octant_code(&points[idx], &mid)].push(idx);
    }
    trace!(
        "subdividing octree node at depth {} with {} points: {:?}",
        depth,
        node.indices.len(),
        octant_indices.each_ref().map(Vec::len)
    );

    let child_bounds = bounds.octants();
    for (code, child_indices) in octant_indices.into_iter().enumerate() {
        node.children[code] =
            build_node(points, child_bounds[code], child_indices, depth + 1, max_depth, leaf_capacity).map(Box::new);
    }

    Some(node)
}

/// An octree of bounded depth over a point cloud.
#[derive(Clone, Debug, Default)]
pub struct Octree {
    root: Option<OctreeNode>,
    config: OctreeConfig,
}

impl Octree {
    pub fn new(config: OctreeConfig) -> Self {
        Self { root: None, config }
    }

    /// Builds the octree over all `points` within `bounds`.
    pub fn build(points: &[[f64; 3]], bounds: BoundingBox<3>, config: OctreeConfig) -> Result<Self> {
        let max_depth = config.max_depth()?;
        let indices: Vec<usize> = (0..points.len()).collect();
        let root = build_node(points, bounds, indices, 0, max_depth, config.leaf_capacity);

        let tree = Self { root, config };
        debug!(
            "built octree over {} points, {} nodes, height {} (max {})",
            points.len(),
            tree.len(),
            tree.height(),
            config.levels
        );
        Ok(tree)
    }

    pub fn root(&self) -> Option<&OctreeNode> {
        self.root.as_ref()
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, OctreeNode::count)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, OctreeNode::height)
    }

    pub fn clear(&mut self) {
        self.root = None;
    }
}
