//! Turns voxel chunks into renderer draw calls.
//!
//! Mesh buffers are created once per shape definition per chunk, draw calls are cached
//! per voxel and only regenerated for voxels marked dirty, and every frame the cached
//! calls of frustum-visible voxel columns are gathered into one flat list.
#![forbid(unsafe_code)]

mod backend;
pub mod door;
mod draw_call;
mod headless;
mod heap;
mod ids;
mod manager;
mod mesh_inst;
mod scene_graph;
mod textures;
mod transform;
mod voxel_chunk;

pub use backend::{RenderBackend, RenderError, RenderFrameSettings, ResourceKind};
pub use draw_call::{FragmentShaderType, RenderDrawCall, RenderLightingType, VertexShaderType};
pub use headless::{HeadlessFrameStats, HeadlessRenderBackend, HeadlessTexture};
pub use heap::{MAX_DRAW_CALLS_PER_VOXEL, RenderVoxelDrawCallHeap, RenderVoxelDrawCallRangeId};
pub use ids::{IndexBufferId, ObjectTextureId, VertexAttributeBufferId, VertexPositionBufferId};
pub use manager::RenderVoxelChunkManager;
pub use mesh_inst::{RenderVoxelMeshInstId, RenderVoxelMeshInstance};
pub use scene_graph::{CHASM_ANIM_SECONDS, SceneFrame, SceneGraph};
pub use textures::VoxelTextureCache;
pub use transform::RenderTransform;
pub use voxel_chunk::RenderVoxelChunk;
