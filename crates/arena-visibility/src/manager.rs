use std::time::Instant;

use arena_chunk::{ChunkInt2, ChunkPool};
use arena_geom::RenderCamera;
use rayon::prelude::*;

use crate::chunk::VoxelVisibilityChunk;

/// Visibility trees for every active chunk, kept in step with the voxel chunk set.
#[derive(Debug, Default)]
pub struct VoxelVisibilityChunkManager {
    chunks: ChunkPool<VoxelVisibilityChunk>,
}

impl VoxelVisibilityChunkManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn chunk(&self, position: ChunkInt2) -> Option<&VoxelVisibilityChunk> {
        self.chunks.get(position)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &VoxelVisibilityChunk> {
        self.chunks.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Frees and creates trees for this frame's chunk delta, then re-tests every active
    /// tree against `camera`. Trees are independent so they update in parallel.
    pub fn update(
        &mut self,
        new_positions: &[ChunkInt2],
        freed_positions: &[ChunkInt2],
        camera: &RenderCamera,
        chunk_height: i32,
        ceiling_scale: f64,
    ) {
        for &position in freed_positions {
            self.chunks.recycle(position);
        }
        for &position in new_positions {
            if self.chunks.index_of(position).is_some() {
                log::warn!("visibility chunk ({}, {}) already active", position.x, position.z);
                continue;
            }
            self.chunks
                .spawn(position, |c| c.init(position, chunk_height, ceiling_scale));
        }

        let t0 = Instant::now();
        self.chunks
            .as_mut_slice()
            .par_iter_mut()
            .for_each(|chunk| chunk.update(camera));
        let tests: usize = self.chunks.iter().map(|c| c.frustum_test_count()).sum();
        log::debug!(
            target: "perf",
            "ms={} visibility_update chunks={} frustum_tests={}",
            t0.elapsed().as_millis(),
            self.chunks.len(),
            tests
        );
    }

    /// Box tests across all trees in the last update.
    pub fn total_frustum_test_count(&self) -> usize {
        self.chunks.iter().map(|c| c.frustum_test_count()).sum()
    }

    pub fn clear(&mut self) {
        self.chunks.recycle_all();
    }
}
