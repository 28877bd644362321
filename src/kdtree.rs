use crate::partition::{partition_index, place_index};
use log::debug;

/// Marks a missing child in [`KdNode`].
const NONE: u32 = u32::MAX;

/// A splitting node of the k-d tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KdNode {
    /// Copy of the median point this node splits at.
    pub point: [f64; 3],
    /// `point[axis]`.
    pub split_val: f64,
    pub axis: u8,
    left: u32, // NONE if absent
    right: u32,
}

impl KdNode {
    /// Arena id of the subtree holding points with `coord <= split_val`.
    pub fn left(&self) -> Option<u32> {
        (self.left != NONE).then_some(self.left)
    }

    /// Arena id of the subtree holding points with `coord > split_val`.
    pub fn right(&self) -> Option<u32> {
        (self.right != NONE).then_some(self.right)
    }

    pub fn is_leaf(&self) -> bool {
        self.left == NONE && self.right == NONE
    }
}

/// A pending build range `[start, end)` and where its subtree hangs.
struct Pending {
    start: usize,
    end: usize,
    depth: usize,
    parent: u32,
    is_right: bool,
}

/// A balanced 3D k-d tree with one node per point.
///
/// The split axis cycles X, Y, Z with depth. Nodes are stored in a flat arena
/// in pre-order, so the root is node 0 whenever the tree is non-empty.
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    nodes: Vec<KdNode>,
}

impl KdTree {
    pub fn new() -> Self {
        KdTree { nodes: Vec::new() }
    }

    /// Builds the tree from identity orderings of `points`.
    pub fn build(points: &[[f64; 3]]) -> Self {
        let mut idx_x: Vec<usize> = (0..points.len()).collect();
        let mut idx_y = idx_x.clone();
        let mut idx_z = idx_x.clone();
        Self::build_with_indices(points, &mut idx_x, &mut idx_y, &mut idx_z)
    }

    /// Builds the tree from three caller-owned index arrays, one per axis.
    ///
    /// Each array must be a permutation of `0..points.len()`. They are reordered
    /// in place and, at every build range, hold the same set of indices.
    ///
    /// # Panics
    ///
    /// Panics if the three arrays differ in length.
    pub fn build_with_indices(
        points: &[[f64; 3]],
        idx_x: &mut [usize],
        idx_y: &mut [usize],
        idx_z: &mut [usize],
    ) -> Self {
        assert_eq!(idx_x.len(), idx_y.len(), "x and y index arrays differ in length");
        assert_eq!(idx_y.len(), idx_z.len(), "y and z index arrays differ in length");
        let count = idx_x.len();

        let mut tree = KdTree::new();
        tree.nodes.reserve(count);
        let mut idx = [idx_x, idx_y, idx_z];
        tree.build_ranges(points, &mut idx, count);

        debug!("built k-d tree over {} points, {} nodes, height {}", points.len(), tree.nodes.len(), tree.height());
        tree
    }

    /// Builds the whole tree from an explicit stack of pending ranges.
    ///
    /// The left range is popped before the right one, so nodes land in the
    /// arena in pre-order.
    fn build_ranges(&mut self, points: &[[f64; 3]], idx: &mut [&mut [usize]; 3], count: usize) {
        let mut stack = vec![Pending { start: 0, end: count, depth: 0, parent: NONE, is_right: false }];

        while let Some(Pending { start, end, depth, parent, is_right }) = stack.pop() {
            if start >= end {
                continue;
            }

            let axis = depth % 3;
            let m = (start + end - 1) / 2;

            // Bring the positional median of this axis' array into slot m. Ties on
            // the coordinate are ordered by point index so the choice is deterministic.
            idx[axis][start..end].select_nth_unstable_by(m - start, |&a, &b| {
                points[a][axis].total_cmp(&points[b][axis]).then(a.cmp(&b))
            });
            let pivot = idx[axis][m];
            let point = points[pivot];
            let node_idx = self.push_node(point, axis, parent, is_right);

            // Partition all three arrays so descendants see the same sets everywhere.
            let mut boundary = start;
            for arr in idx.iter_mut() {
                boundary = partition_index(arr, points, axis, point[axis], start, end - 1);
            }

            // Nothing lies above the split. If every point in the range equals
            // the node's own, each further level would peel off one point, so
            // the left-only chain is emitted directly.
            if boundary == end && idx[0][start..end].iter().all(|&i| points[i] == point) {
                self.push_chain(node_idx, point, end - start - 1, depth + 1);
                continue;
            }

            // The node's own point takes the last slot of the left set. A NaN split
            // leaves the left set empty, then it takes the first slot instead.
            let slot = if boundary > start { boundary - 1 } else { start };
            for arr in idx.iter_mut() {
                let placed = place_index(arr, pivot, start..end, slot);
                debug_assert!(placed, "index {} missing from range {}..{}", pivot, start, end);
            }

            stack.push(Pending { start: slot + 1, end, depth: depth + 1, parent: node_idx, is_right: true });
            stack.push(Pending { start, end: slot, depth: depth + 1, parent: node_idx, is_right: false });
        }
    }

    /// Appends a node and links it below `parent` unless it is the root.
    fn push_node(&mut self, point: [f64; 3], axis: usize, parent: u32, is_right: bool) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(KdNode {
            point,
            split_val: point[axis],
            axis: axis as u8,
            left: NONE,
            right: NONE,
        });
        if parent != NONE {
            let parent = &mut self.nodes[parent as usize];
            if is_right {
                parent.right = id;
            } else {
                parent.left = id;
            }
        }
        id
    }

    /// Hangs `count` copies of `point` below `parent` as a chain of left children.
    fn push_chain(&mut self, mut parent: u32, point: [f64; 3], count: usize, mut depth: usize) {
        for _ in 0..count {
            parent = self.push_node(point, depth % 3, parent, false);
            depth += 1;
        }
    }

    pub fn root(&self) -> Option<u32> {
        (!self.nodes.is_empty()).then_some(0)
    }

    pub fn node(&self, id: u32) -> &KdNode {
        &self.nodes[id as usize]
    }

    /// All nodes in pre-order.
    pub fn nodes(&self) -> &[KdNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(u32, usize)> = self.root().map(|root| (root, 1)).into_iter().collect();
        while let Some((id, level)) = stack.pop() {
            height = height.max(level);
            let node = self.node(id);
            stack.extend(node.left().map(|c| (c, level + 1)));
            stack.extend(node.right().map(|c| (c, level + 1)));
        }
        height
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
