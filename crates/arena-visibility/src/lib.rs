//! Per-chunk frustum culling over a fixed-depth quadtree of XZ columns.
//!
//! Every chunk owns a 7-level quadtree whose leaves are single voxel columns. Each frame
//! the tree is walked top-down; subtrees that are wholly inside or outside the camera
//! frustum are resolved without testing their descendants.
#![forbid(unsafe_code)]

mod chunk;
mod manager;
mod stack;
pub mod tree;

pub use chunk::{VisibilityType, VoxelVisibilityChunk};
pub use manager::VoxelVisibilityChunkManager;
pub use stack::SubtreeStack;
