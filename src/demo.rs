use std::sync::Arc;
use std::time::Instant;

use arena_chunk::instances::DOOR_ANIM_SPEED;
use arena_chunk::{ChunkInt2, ChunkSet, CoordDouble3, VoxelChunk, VoxelChunkManager, VoxelDoorAnimationInstance};
use arena_geom::{RenderCamera, Vec3};
use arena_render::{HeadlessFrameStats, HeadlessRenderBackend, RenderError, SceneFrame, SceneGraph};
use arena_runtime::JobPool;
use arena_voxels::VoxelShapeLibrary;

use crate::config::SceneConfig;
use crate::level::{LevelGenerator, LevelPalette};

/// Horizontal reach in voxels within which the demo opens doors as the camera passes.
const DOOR_OPEN_REACH: f64 = 2.0;
const POPULATE_QUEUE_CAPACITY: usize = 64;

struct PopulateJob {
    generator: Arc<LevelGenerator>,
    chunk: VoxelChunk,
    position: ChunkInt2,
}

fn populate(job: PopulateJob) -> VoxelChunk {
    let PopulateJob {
        generator,
        mut chunk,
        position,
    } = job;
    generator.populate(&mut chunk, position);
    chunk
}

/// Headless scene: streams chunks around a drifting camera, populates them on the job
/// pool and runs the full voxel render update every frame.
pub struct Demo {
    config: SceneConfig,
    lib: VoxelShapeLibrary,
    generator: Arc<LevelGenerator>,
    jobs: JobPool<PopulateJob, VoxelChunk>,
    chunk_set: ChunkSet,
    voxels: VoxelChunkManager,
    graph: SceneGraph,
    backend: HeadlessRenderBackend,
    pending_freed: Vec<ChunkInt2>,
    eye: Vec3,
    yaw: f64,
    frame: u64,
}

impl Demo {
    pub fn new(config: SceneConfig) -> Result<Self, RenderError> {
        let mut lib = VoxelShapeLibrary::new();
        let generator = Arc::new(build_generator(&mut lib, &config));
        let jobs = JobPool::new("populate", config.worker_count(), POPULATE_QUEUE_CAPACITY, populate);
        let mut backend = HeadlessRenderBackend::new();
        let mut graph = SceneGraph::new().with_chasm_anim_period(config.chasm_anim_period);
        graph.init(&mut backend)?;
        let eye = Vec3::new(0.5, config.camera.eye_height * config.ceiling_scale, 8.5);
        log::info!(
            "scene ready: seed={} chunk_distance={} chunk_height={} ceiling_scale={} workers={}",
            config.seed,
            config.chunk_distance,
            config.chunk_height,
            config.ceiling_scale,
            jobs.workers()
        );
        Ok(Self {
            config,
            lib,
            generator,
            jobs,
            chunk_set: ChunkSet::new(),
            voxels: VoxelChunkManager::new(),
            graph,
            backend,
            pending_freed: Vec::new(),
            eye,
            yaw: 0.0,
            frame: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn active_chunk_count(&self) -> usize {
        self.voxels.chunks().len()
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn backend(&self) -> &HeadlessRenderBackend {
        &self.backend
    }

    pub fn last_frame_stats(&self) -> HeadlessFrameStats {
        self.backend.last_frame_stats()
    }

    /// Switches to a reloaded config. Layout changes drop every chunk so the next frame
    /// repopulates them.
    pub fn apply_config(&mut self, config: SceneConfig) {
        if config == self.config {
            return;
        }
        if self.config.requires_repopulate(&config) {
            let delta = self.chunk_set.clear();
            log::info!("config changed the level layout; repopulating {} chunks", delta.freed_positions.len());
            self.pending_freed.extend(delta.freed_positions);
            self.lib.clear();
            self.generator = Arc::new(build_generator(&mut self.lib, &config));
        }
        self.eye.y = config.camera.eye_height * config.ceiling_scale;
        if config.chasm_anim_period != self.config.chasm_anim_period {
            self.graph.set_chasm_anim_period(config.chasm_anim_period);
        }
        if config.workers != self.config.workers {
            log::warn!("worker count changes take effect on restart");
        }
        self.config = config;
    }

    /// Runs one frame: stream, populate, simulate, cull, build draw calls and submit.
    pub fn step(&mut self, dt: f64) -> Result<(), RenderError> {
        let t0 = Instant::now();
        let cam = self.config.camera.clone();
        self.yaw = (self.yaw + cam.turn_speed * dt).rem_euclid(core::f64::consts::TAU);
        self.eye.x += cam.walk_speed * dt;
        let dir = Vec3::UNIT_X.rotated_y(self.yaw);
        let player = CoordDouble3::from_world_point(self.eye);

        let delta = self.chunk_set.update(player.chunk, self.config.chunk_distance);
        let mut freed = std::mem::take(&mut self.pending_freed);
        freed.extend_from_slice(&delta.freed_positions);
        if !freed.is_empty() {
            self.voxels.free_chunks(&freed);
        }
        self.populate_new_chunks(&delta.new_positions);

        self.open_nearby_doors(&player);
        self.voxels.update(dt, &player, self.config.ceiling_scale);

        let camera = RenderCamera::new(self.eye, dir, cam.fov_y, cam.aspect);
        let frame = SceneFrame {
            new_chunk_positions: &delta.new_positions,
            freed_chunk_positions: &freed,
            camera: &camera,
            ceiling_scale: self.config.ceiling_scale,
            chunk_height: self.config.chunk_height,
            dt,
        };
        self.graph.update(&frame, &self.voxels, &mut self.backend);
        let submitted = self.graph.submit(&mut self.backend, &camera);
        self.voxels.end_frame();
        submitted?;

        self.frame += 1;
        log::debug!(
            target: "perf",
            "ms={} frame n={} chunks={} new={} freed={} draw_calls={}",
            t0.elapsed().as_millis(),
            self.frame,
            self.voxels.chunks().len(),
            delta.new_positions.len(),
            freed.len(),
            self.graph.draw_calls().len()
        );
        Ok(())
    }

    fn populate_new_chunks(&mut self, positions: &[ChunkInt2]) {
        if positions.is_empty() {
            return;
        }
        let jobs: Vec<PopulateJob> = positions
            .iter()
            .map(|&position| PopulateJob {
                generator: Arc::clone(&self.generator),
                chunk: self.voxels.take_recycled(),
                position,
            })
            .collect();
        let chunks = self.jobs.run_batch(jobs);
        if chunks.len() < positions.len() {
            log::error!("populated {} of {} new chunks", chunks.len(), positions.len());
        }
        for chunk in chunks {
            self.voxels.insert_chunk(chunk);
        }
    }

    /// Starts opening closed doors near the camera in its own chunk.
    fn open_nearby_doors(&mut self, player: &CoordDouble3) {
        let Some(chunk) = self.voxels.chunk_mut(player.chunk) else {
            return;
        };
        let near: Vec<_> = chunk
            .door_positions()
            .filter(|v| chunk.door_anim_inst(*v).is_none())
            .filter(|v| {
                let dx = f64::from(v.x) + 0.5 - player.point.x;
                let dz = f64::from(v.z) + 0.5 - player.point.z;
                dx * dx + dz * dz <= DOOR_OPEN_REACH * DOOR_OPEN_REACH
            })
            .collect();
        for voxel in near {
            log::debug!(target: "events", "door_opening voxel=({}, {}, {})", voxel.x, voxel.y, voxel.z);
            chunk.add_door_anim_inst(VoxelDoorAnimationInstance::opening(voxel, DOOR_ANIM_SPEED));
        }
    }

    /// Releases all chunk and renderer state. Returns the backend buffers still alive,
    /// which is zero unless something leaked.
    pub fn shutdown(&mut self) -> usize {
        let delta = self.chunk_set.clear();
        self.voxels.free_chunks(&delta.freed_positions);
        self.voxels.clear();
        self.graph.shutdown(&mut self.backend);
        self.backend.live_buffer_count()
    }
}

fn build_generator(lib: &mut VoxelShapeLibrary, config: &SceneConfig) -> LevelGenerator {
    let palette = LevelPalette::new(lib, config.ceiling_scale, &config.palette);
    LevelGenerator::new(palette, config.seed, config.chunk_height)
}
