use crate::bounds::BoundingBox;
use crate::error::{Error, Result};
use crate::kdtree::KdTree;
use crate::octree::{Octree, OctreeConfig};
use crate::point_cloud::{get_seed, PointCloud};
use crate::primitive::{Primitive, PrimitiveStyle};
use crate::visualize::{visualize_kdtree, visualize_octree, DisplayMode};
use log::debug;
use serde::{Deserialize, Serialize};

/// Settings of a [`SpatialScene`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub octree: OctreeConfig,
    /// Deepest k-d level drawn by [`SpatialScene::visualize`].
    pub kd_display_depth: u32,
    pub style: PrimitiveStyle,
    pub mode: DisplayMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            octree: OctreeConfig::default(),
            kd_display_depth: 2,
            style: PrimitiveStyle::default(),
            mode: DisplayMode::KdTree,
        }
    }
}

/// A loaded point cloud with both of its spatial trees.
///
/// Loading new points rebuilds both trees and drops the previous ones.
/// Visualizing returns a fresh primitive list every time; hosts replace what
/// they drew before instead of accumulating.
#[derive(Clone, Debug)]
pub struct SpatialScene {
    config: SceneConfig,
    cloud: PointCloud,
    bounds: Option<BoundingBox<3>>,
    kdtree: KdTree,
    octree: Octree,
    mode: DisplayMode,
}

impl SpatialScene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        if config.octree.levels == 0 {
            return Err(Error::ZeroLevels);
        }
        Ok(Self {
            config,
            cloud: PointCloud::default(),
            bounds: None,
            kdtree: KdTree::new(),
            octree: Octree::new(config.octree),
            mode: config.mode,
        })
    }

    /// Replaces the cloud and rebuilds both trees over its tight bounding box.
    pub fn load(&mut self, cloud: PointCloud) -> Result<()> {
        self.clear();
        let Some(bounds) = cloud.bounds() else {
            debug!("loaded empty point cloud");
            return Ok(());
        };

        self.kdtree = KdTree::build(cloud.points());
        self.octree = Octree::build(cloud.points(), bounds, self.config.octree)?;
        debug!(
            "loaded {} points: {} k-d nodes, {} octree nodes",
            cloud.len(),
            self.kdtree.len(),
            self.octree.len()
        );
        self.bounds = Some(bounds);
        self.cloud = cloud;
        Ok(())
    }

    /// Loads an interleaved `[x0, y0, z0, x1, ...]` buffer.
    pub fn set_points_flat(&mut self, coords: &[f64]) -> Result<()> {
        let cloud = PointCloud::from_flat(coords)?;
        self.load(cloud)
    }

    /// Loads `count` random points spread uniformly over `bounds`.
    pub fn random_points(&mut self, count: usize, bounds: &BoundingBox<3>) -> Result<()> {
        self.load(PointCloud::random(count, bounds, get_seed()))
    }

    pub fn clear(&mut self) {
        self.cloud = PointCloud::default();
        self.bounds = None;
        self.kdtree.clear();
        self.octree.clear();
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Primitives of the current mode at its configured depth.
    ///
    /// The k-d tree is drawn down to `kd_display_depth`, the octree down to
    /// its deepest level.
    pub fn visualize(&self) -> Vec<Primitive> {
        let depth = match self.mode {
            DisplayMode::KdTree => self.config.kd_display_depth,
            DisplayMode::Octree => self.config.octree.levels - 1,
        };
        self.visualize_mode(self.mode, depth)
    }

    pub fn visualize_mode(&self, mode: DisplayMode, max_depth: u32) -> Vec<Primitive> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        match mode {
            DisplayMode::KdTree => visualize_kdtree(&self.kdtree, max_depth, bounds, &self.config.style),
            DisplayMode::Octree => visualize_octree(&self.octree, max_depth, &self.config.style),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn bounds(&self) -> Option<BoundingBox<3>> {
        self.bounds
    }

    pub fn kdtree(&self) -> &KdTree {
        &self.kdtree
    }

    pub fn octree(&self) -> &Octree {
        &self.octree
    }
}
