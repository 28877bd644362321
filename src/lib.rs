//! # cloudtree
//!
//! `cloudtree` builds spatial index structures over 3D point clouds and turns
//! them into shapes a renderer can draw. It is usable from Rust as well as
//! compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Balanced k-d tree**: median splits with the axis cycling X, Y, Z by depth,
//!   built over three index orderings that are partitioned in lockstep.
//! - **Octree**: bounded-depth eight-way subdivision that stops early on sparse cubes.
//! - **Visualization primitives**: splitting planes and node cubes with axis colors
//!   and a depth fade, emitted in pre-order down to a chosen depth.
//! - **WASM-first**: a `Scene` class built with `wasm-bindgen` for JavaScript renderers.
//!
//! ## Main Interface
//!
//! The [`SpatialScene`] struct loads a [`PointCloud`], keeps both trees for it and
//! visualizes the one selected by its [`DisplayMode`]. The builders
//! ([`KdTree::build`], [`Octree::build`]) and the traversals
//! ([`visualize_kdtree`], [`visualize_octree`]) can also be used on their own.

mod bounds;
mod error;
mod kdtree;
mod octree;
mod partition;
mod point_cloud;
mod primitive;
mod scene;
mod visualize;
mod wasm;

pub use bounds::octant_code;
pub use bounds::BoundingBox;
pub use error::Error;
pub use error::Result;
pub use kdtree::KdNode;
pub use kdtree::KdTree;
pub use octree::build_node;
pub use octree::Octree;
pub use octree::OctreeConfig;
pub use octree::OctreeNode;
pub use octree::DEFAULT_LEAF_CAPACITY;
pub use octree::DEFAULT_LEVELS;
pub use partition::partition_index;
pub use point_cloud::PointCloud;
pub use primitive::kd_plane;
pub use primitive::octree_box;
pub use primitive::Primitive;
pub use primitive::PrimitiveKind;
pub use primitive::PrimitiveStyle;
pub use scene::SceneConfig;
pub use scene::SpatialScene;
pub use visualize::visualize_kdtree;
pub use visualize::visualize_octree;
pub use visualize::DisplayMode;
pub use wasm::flatten_primitives;
pub use wasm::BoundingBox3D;
pub use wasm::SceneWASM;
pub use wasm::PRIMITIVE_STRIDE;
