use arena_chunk::{ChunkInt2, VoxelChunkManager};
use arena_geom::RenderCamera;
use arena_visibility::VoxelVisibilityChunkManager;

use crate::backend::{RenderBackend, RenderError, RenderFrameSettings};
use crate::draw_call::RenderDrawCall;
use crate::manager::RenderVoxelChunkManager;

/// Seconds per loop of the chasm floor animation.
pub const CHASM_ANIM_SECONDS: f64 = 0.5;

/// Inputs for one scene update.
#[derive(Clone, Copy, Debug)]
pub struct SceneFrame<'a> {
    pub new_chunk_positions: &'a [ChunkInt2],
    pub freed_chunk_positions: &'a [ChunkInt2],
    pub camera: &'a RenderCamera,
    pub ceiling_scale: f64,
    pub chunk_height: i32,
    pub dt: f64,
}

/// Everything the renderer draws for the voxel world this frame.
#[derive(Debug)]
pub struct SceneGraph {
    visibility: VoxelVisibilityChunkManager,
    render_chunks: RenderVoxelChunkManager,
    chasm_anim_seconds: f64,
    chasm_anim_period: f64,
    ambient_percent: f64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self {
            visibility: VoxelVisibilityChunkManager::new(),
            render_chunks: RenderVoxelChunkManager::new(),
            chasm_anim_seconds: 0.0,
            chasm_anim_period: CHASM_ANIM_SECONDS,
            ambient_percent: 1.0,
        }
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chasm_anim_period(mut self, seconds: f64) -> Self {
        self.set_chasm_anim_period(seconds);
        self
    }

    /// Changes the loop length, keeping the current animation phase.
    pub fn set_chasm_anim_period(&mut self, seconds: f64) {
        assert!(seconds > 0.0, "chasm animation period must be positive");
        let percent = self.chasm_anim_percent();
        self.chasm_anim_period = seconds;
        self.chasm_anim_seconds = percent * seconds;
    }

    pub fn init(&mut self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        self.render_chunks.init(backend)
    }

    pub fn set_ambient_percent(&mut self, percent: f64) {
        self.ambient_percent = percent.clamp(0.0, 1.0);
    }

    pub fn visibility(&self) -> &VoxelVisibilityChunkManager {
        &self.visibility
    }

    pub fn render_chunks(&self) -> &RenderVoxelChunkManager {
        &self.render_chunks
    }

    #[inline]
    pub fn draw_calls(&self) -> &[RenderDrawCall] {
        self.render_chunks.draw_calls()
    }

    pub fn chasm_anim_percent(&self) -> f64 {
        self.chasm_anim_seconds / self.chasm_anim_period
    }

    pub fn frame_settings(&self) -> RenderFrameSettings {
        RenderFrameSettings {
            chasm_anim_percent: self.chasm_anim_percent(),
            ambient_percent: self.ambient_percent,
        }
    }

    /// Culls against the frame's camera, then refreshes render chunks and the draw call
    /// list. Call after the voxel chunks have been updated and before their end of frame.
    pub fn update(&mut self, frame: &SceneFrame<'_>, voxel_chunks: &VoxelChunkManager, backend: &mut dyn RenderBackend) {
        self.visibility.update(
            frame.new_chunk_positions,
            frame.freed_chunk_positions,
            frame.camera,
            frame.chunk_height,
            frame.ceiling_scale,
        );
        self.chasm_anim_seconds = (self.chasm_anim_seconds + frame.dt).rem_euclid(self.chasm_anim_period);
        self.render_chunks.update(
            frame.new_chunk_positions,
            frame.freed_chunk_positions,
            frame.ceiling_scale,
            voxel_chunks,
            &self.visibility,
            backend,
        );
    }

    pub fn submit(&self, backend: &mut dyn RenderBackend, camera: &RenderCamera) -> Result<(), RenderError> {
        log::debug!(target: "perf", "scene_submit draw_calls={}", self.draw_calls().len());
        backend.submit_frame(camera, &self.frame_settings(), self.draw_calls())
    }

    /// Drops all chunk state and textures, keeping the shared buffers for the next scene.
    pub fn unload_scene(&mut self, backend: &mut dyn RenderBackend) {
        self.visibility.clear();
        self.render_chunks.unload_scene(backend);
        self.chasm_anim_seconds = 0.0;
    }

    pub fn shutdown(&mut self, backend: &mut dyn RenderBackend) {
        self.visibility.clear();
        self.render_chunks.shutdown(backend);
    }
}
