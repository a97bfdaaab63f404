//! Chunk coordinates, the per-chunk voxel store with its animation and dirty state, and
//! the streaming/pooling machinery that decides which chunks are alive.
#![forbid(unsafe_code)]

mod coords;
pub mod instances;
mod manager;
mod pool;
mod streaming;
mod voxel_chunk;

pub use coords::{ChunkInt2, CoordDouble3, CoordInt3, VoxelInt3};
pub use instances::{
    DoorAnimState, VoxelChasmWallInstance, VoxelDoorAnimationInstance,
    VoxelDoorVisibilityInstance, VoxelFadeAnimationInstance,
};
pub use manager::VoxelChunkManager;
pub use pool::{ChunkPool, PoolChunk};
pub use streaming::{ChunkDelta, ChunkSet};
pub use voxel_chunk::{
    AIR_SHAPE_DEF_ID, AIR_TEXTURE_DEF_ID, ChasmDefId, DoorDefId, VoxelChunk, VoxelShapeDefId,
    VoxelTextureDefId,
};

/// Footprint and height of one streaming unit. Every chunk-sized structure embeds one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Chunk {
    position: ChunkInt2,
    height: i32,
}

impl Chunk {
    /// Voxels along X.
    pub const WIDTH: i32 = 64;
    /// Voxels along Z.
    pub const DEPTH: i32 = 64;

    pub fn init(&mut self, position: ChunkInt2, height: i32) {
        debug_assert!(height > 0, "chunk height must be positive");
        self.position = position;
        self.height = height;
    }

    #[inline]
    pub fn position(&self) -> ChunkInt2 {
        self.position
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn is_valid_voxel(&self, x: i32, y: i32, z: i32) -> bool {
        (0..Self::WIDTH).contains(&x) && (0..self.height).contains(&y) && (0..Self::DEPTH).contains(&z)
    }

    pub fn clear(&mut self) {
        *self = Chunk::default();
    }
}
