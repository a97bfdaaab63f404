use std::time::Instant;

use arena_chunk::{ChunkInt2, ChunkPool, VoxelChunk, VoxelChunkManager, VoxelInt3};
use arena_geom::Vec3;
use arena_visibility::VoxelVisibilityChunkManager;
use arena_voxels::ArenaVoxelType;
use arena_voxels::door::face_index;
use arena_voxels::mesh_utils::{CHASM_WALL_COMBINATION_COUNT, MAX_INDICES_PER_BUFFER, chasm_wall_faces};
use arena_voxels::writers::write_chasm_wall_index_buffers;

use crate::backend::{RenderBackend, RenderError};
use crate::door::{door_face_transforms, door_fragment_shader, door_pixel_shader_param, door_vertex_shader};
use crate::draw_call::{FragmentShaderType, RenderDrawCall, RenderLightingType, VertexShaderType};
use crate::ids::{IndexBufferId, ObjectTextureId};
use crate::mesh_inst::RenderVoxelMeshInstance;
use crate::textures::VoxelTextureCache;
use crate::transform::RenderTransform;
use crate::voxel_chunk::RenderVoxelChunk;

fn voxel_world_position(chunk: ChunkInt2, voxel: VoxelInt3, ceiling_scale: f64) -> Vec3 {
    chunk.world_origin()
        + Vec3::new(
            f64::from(voxel.x),
            f64::from(voxel.y) * ceiling_scale,
            f64::from(voxel.z),
        )
}

fn door_anim_percent(voxel_chunk: &VoxelChunk, voxel: VoxelInt3) -> f64 {
    voxel_chunk
        .door_anim_inst(voxel)
        .map(|inst| inst.percent_open)
        .unwrap_or(0.0)
}

fn voxel_lighting(voxel_chunk: &VoxelChunk, voxel: VoxelInt3) -> (RenderLightingType, f64) {
    match voxel_chunk.fade_anim_inst(voxel) {
        Some(fade) if !fade.is_done_fading() => {
            (RenderLightingType::PerMesh, (1.0 - fade.percent_faded).clamp(0.0, 1.0))
        }
        _ => (RenderLightingType::PerPixel, 1.0),
    }
}

/// Draw call using `mesh_inst`'s vertex buffers with everything else at its default.
fn base_draw_call(
    mesh_inst: &RenderVoxelMeshInstance,
    transform: RenderTransform,
    index_buffer_id: IndexBufferId,
    lighting: (RenderLightingType, f64),
) -> Option<RenderDrawCall> {
    Some(RenderDrawCall {
        transform,
        position_buffer_id: mesh_inst.position_buffer_id?,
        normal_buffer_id: mesh_inst.normal_buffer_id?,
        tex_coord_buffer_id: mesh_inst.tex_coord_buffer_id?,
        index_buffer_id,
        lighting_type: lighting.0,
        light_percent: lighting.1,
        enable_depth_read: true,
        enable_depth_write: true,
        ..RenderDrawCall::default()
    })
}

/// Writes the draw calls of one voxel into `out`. Leaves `out` empty for air, for
/// closed-off doors and for anything whose buffers or textures are missing.
fn build_voxel_draw_calls(
    render_chunk: &RenderVoxelChunk,
    voxel_chunk: &VoxelChunk,
    textures: &VoxelTextureCache,
    voxel: VoxelInt3,
    ceiling_scale: f64,
    out: &mut Vec<RenderDrawCall>,
) {
    out.clear();
    let position = voxel_chunk.position();
    let shape_def_id = voxel_chunk.shape_def_id(voxel);
    let shape_def = voxel_chunk.shape_def(shape_def_id);
    if shape_def.mesh.is_empty() {
        return;
    }
    let Some(mesh_inst) = render_chunk.mesh_inst_for_shape(shape_def_id) else {
        return;
    };
    let texture_def = voxel_chunk.texture_def(voxel_chunk.texture_def_id(voxel));
    let world_position = voxel_world_position(position, voxel, ceiling_scale);
    let lighting = voxel_lighting(voxel_chunk, voxel);

    match shape_def.voxel_type {
        ArenaVoxelType::Door => {
            let Some(door_def_id) = voxel_chunk.try_get_door_def_id(voxel) else {
                log::error!("door voxel {voxel:?} in chunk {position:?} has no door def");
                return;
            };
            let door_type = voxel_chunk.door_def(door_def_id).door_type;
            let Some(vis) = voxel_chunk.door_vis_inst(voxel) else {
                return;
            };
            if vis.visible_faces().is_empty() {
                return;
            }
            let Some(texture_id) = texture_def.texture_asset(0).and_then(|a| textures.texture_id(a)) else {
                log::warn!("door voxel {voxel:?} in chunk {position:?} has no loaded texture");
                return;
            };
            let Some(&index_buffer_id) = mesh_inst.index_buffer_ids.first() else {
                return;
            };
            let anim_percent = door_anim_percent(voxel_chunk, voxel);
            let transforms = match render_chunk.door_transforms(voxel) {
                Some(t) => *t,
                None => door_face_transforms(door_type, world_position, anim_percent, ceiling_scale),
            };
            for &facing in vis.visible_faces() {
                let Some(mut draw_call) =
                    base_draw_call(mesh_inst, transforms[face_index(facing)], index_buffer_id, lighting)
                else {
                    return;
                };
                draw_call.texture_ids = [Some(texture_id), None];
                draw_call.vertex_shader_type = door_vertex_shader(door_type);
                draw_call.fragment_shader_type = door_fragment_shader(door_type);
                draw_call.pixel_shader_param0 = door_pixel_shader_param(door_type, anim_percent);
                out.push(draw_call);
            }
        }
        ArenaVoxelType::Chasm => {
            let Some(chasm_def_id) = voxel_chunk.try_get_chasm_def_id(voxel) else {
                log::error!("chasm voxel {voxel:?} in chunk {position:?} has no chasm def");
                return;
            };
            let chasm_def = voxel_chunk.chasm_def(chasm_def_id);
            let Some(floor_texture_id) = textures.chasm_floor_texture_id(position, chasm_def_id) else {
                log::warn!("chasm voxel {voxel:?} in chunk {position:?} has no loaded floor texture");
                return;
            };
            let Some(&floor_index_buffer_id) = mesh_inst.index_buffer_ids.first() else {
                return;
            };
            let lighting = if chasm_def.is_emissive {
                (RenderLightingType::PerMesh, 1.0)
            } else {
                lighting
            };
            let transform = RenderTransform::from_translation(world_position);
            let animated = chasm_def.is_animated();

            let Some(mut floor) = base_draw_call(mesh_inst, transform, floor_index_buffer_id, lighting) else {
                return;
            };
            floor.texture_ids = [Some(floor_texture_id), None];
            floor.fragment_shader_type = if animated {
                FragmentShaderType::OpaqueScreenSpaceAnimation
            } else {
                FragmentShaderType::Opaque
            };
            out.push(floor);

            if let Some(wall_index_buffer_id) = render_chunk.chasm_wall_index_buffer(voxel) {
                let Some(wall_texture_id) = textures.chasm_wall_texture_id(position, chasm_def_id) else {
                    return;
                };
                let mut wall = floor;
                wall.index_buffer_id = wall_index_buffer_id;
                wall.texture_ids = [Some(floor_texture_id), Some(wall_texture_id)];
                wall.fragment_shader_type = if animated {
                    FragmentShaderType::OpaqueScreenSpaceAnimationWithAlphaTestLayer
                } else {
                    FragmentShaderType::OpaqueWithAlphaTestLayer
                };
                out.push(wall);
            }
        }
        _ => {
            let transform = RenderTransform::from_translation(world_position);
            for (buffer, &index_buffer_id) in shape_def.mesh.index_buffers.iter().zip(&mesh_inst.index_buffer_ids) {
                let texture_id: Option<ObjectTextureId> = buffer
                    .texture_slot
                    .and_then(|slot| texture_def.texture_asset(slot))
                    .and_then(|asset| textures.texture_id(asset));
                let Some(texture_id) = texture_id else {
                    log::warn!("voxel {voxel:?} in chunk {position:?} is missing a texture, skipping");
                    out.clear();
                    return;
                };
                let Some(mut draw_call) = base_draw_call(mesh_inst, transform, index_buffer_id, lighting) else {
                    out.clear();
                    return;
                };
                draw_call.texture_ids = [Some(texture_id), None];
                draw_call.vertex_shader_type = VertexShaderType::Basic;
                draw_call.fragment_shader_type = if buffer.alpha_tested {
                    FragmentShaderType::AlphaTested
                } else {
                    FragmentShaderType::Opaque
                };
                out.push(draw_call);
            }
        }
    }
}

/// Render chunks for every active voxel chunk plus the frame's flattened draw call list.
#[derive(Debug, Default)]
pub struct RenderVoxelChunkManager {
    chunks: ChunkPool<RenderVoxelChunk>,
    textures: VoxelTextureCache,
    /// One per chasm wall combination, shared by every chunk.
    chasm_wall_index_buffer_ids: Vec<IndexBufferId>,
    draw_calls: Vec<RenderDrawCall>,
    scratch: Vec<RenderDrawCall>,
}

impl RenderVoxelChunkManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the shared chasm wall index buffers.
    pub fn init(&mut self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        debug_assert!(self.chasm_wall_index_buffer_ids.is_empty(), "already initialized");
        let mut indices = [0u32; MAX_INDICES_PER_BUFFER];
        for i in 0..CHASM_WALL_COMBINATION_COUNT {
            let (north, east, south, west) = chasm_wall_faces(i);
            let count = write_chasm_wall_index_buffers(north, east, south, west, &mut indices);
            let populated = backend.create_index_buffer(count).and_then(|id| {
                self.chasm_wall_index_buffer_ids.push(id);
                backend.populate_index_buffer(id, &indices[..count])
            });
            if let Err(err) = populated {
                self.free_chasm_wall_buffers(backend);
                return Err(err);
            }
        }
        Ok(())
    }

    fn free_chasm_wall_buffers(&mut self, backend: &mut dyn RenderBackend) {
        for id in self.chasm_wall_index_buffer_ids.drain(..) {
            backend.free_index_buffer(id);
        }
    }

    pub fn shutdown(&mut self, backend: &mut dyn RenderBackend) {
        self.unload_scene(backend);
        self.free_chasm_wall_buffers(backend);
        self.chunks.trim_pool();
    }

    #[inline]
    pub fn chunk(&self, position: ChunkInt2) -> Option<&RenderVoxelChunk> {
        self.chunks.get(position)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &RenderVoxelChunk> {
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

    pub fn textures(&self) -> &VoxelTextureCache {
        &self.textures
    }

    pub fn chasm_wall_index_buffer_id(&self, wall_index: usize) -> Option<IndexBufferId> {
        self.chasm_wall_index_buffer_ids.get(wall_index).copied()
    }

    /// Visible draw calls gathered by the last rebuild.
    #[inline]
    pub fn draw_calls(&self) -> &[RenderDrawCall] {
        &self.draw_calls
    }

    /// Frees render chunks that left range and spawns empty ones for new positions.
    pub fn update_active_chunks(
        &mut self,
        new_positions: &[ChunkInt2],
        freed_positions: &[ChunkInt2],
        voxel_chunks: &VoxelChunkManager,
        backend: &mut dyn RenderBackend,
    ) {
        for &position in freed_positions {
            let Some(chunk) = self.chunks.get_mut(position) else {
                log::warn!("render chunk ({}, {}) was not active", position.x, position.z);
                continue;
            };
            chunk.free_buffers(backend);
            self.textures.unload_chunk(position);
            self.chunks.recycle(position);
        }

        for &position in new_positions {
            if self.chunks.index_of(position).is_some() {
                log::warn!("render chunk ({}, {}) already active", position.x, position.z);
                continue;
            }
            let Some(voxel_chunk) = voxel_chunks.chunk(position) else {
                log::warn!("no voxel chunk at ({}, {}) to render", position.x, position.z);
                continue;
            };
            let height = voxel_chunk.height();
            self.chunks.spawn(position, |c| c.init(position, height));
        }
    }

    /// Creates a mesh instance for each shape definition that doesn't have one yet.
    fn load_mesh_buffers(
        render_chunk: &mut RenderVoxelChunk,
        voxel_chunk: &VoxelChunk,
        ceiling_scale: f64,
        backend: &mut dyn RenderBackend,
    ) {
        for i in 0..voxel_chunk.shape_def_count() {
            let shape_def_id = i as u16;
            if render_chunk.mesh_inst_id(shape_def_id).is_some() {
                continue;
            }
            let shape_def = voxel_chunk.shape_def(shape_def_id);
            if shape_def.mesh.is_empty() {
                continue;
            }
            match RenderVoxelMeshInstance::load(shape_def, ceiling_scale, backend) {
                Ok(inst) => {
                    render_chunk.add_mesh_inst(shape_def_id, inst);
                }
                Err(err) => {
                    let p = voxel_chunk.position();
                    log::error!("couldn't load mesh for shape def {shape_def_id} in chunk ({}, {}): {err}", p.x, p.z);
                }
            }
        }
    }

    fn load_chasm_wall(
        wall_buffers: &[IndexBufferId],
        render_chunk: &mut RenderVoxelChunk,
        voxel_chunk: &VoxelChunk,
        voxel: VoxelInt3,
    ) {
        let id = voxel_chunk
            .chasm_wall_inst(voxel)
            .and_then(|inst| inst.wall_index())
            .and_then(|i| wall_buffers.get(i).copied());
        render_chunk.set_chasm_wall_index_buffer(voxel, id);
    }

    fn load_door_transforms(render_chunk: &mut RenderVoxelChunk, voxel_chunk: &VoxelChunk, voxel: VoxelInt3, ceiling_scale: f64) {
        let Some(door_def_id) = voxel_chunk.try_get_door_def_id(voxel) else {
            log::error!("expected a door def at {voxel:?}");
            return;
        };
        let door_type = voxel_chunk.door_def(door_def_id).door_type;
        let world_position = voxel_world_position(voxel_chunk.position(), voxel, ceiling_scale);
        let anim_percent = door_anim_percent(voxel_chunk, voxel);
        render_chunk.set_door_transforms(
            voxel,
            door_face_transforms(door_type, world_position, anim_percent, ceiling_scale),
        );
    }

    /// Regenerates the cached draw calls of each listed voxel.
    fn update_chunk_draw_calls(
        &mut self,
        chunk_index: usize,
        voxel_chunk: &VoxelChunk,
        voxels: &[VoxelInt3],
        ceiling_scale: f64,
    ) {
        let Self {
            chunks, textures, scratch, ..
        } = self;
        let render_chunk = chunks.at_mut(chunk_index);
        for &voxel in voxels {
            build_voxel_draw_calls(render_chunk, voxel_chunk, textures, voxel, ceiling_scale, scratch);
            render_chunk.set_draw_calls(voxel, scratch);
        }
    }

    /// Brings render chunks in line with this frame's voxel chunks, then gathers the
    /// draw calls of every visible voxel column.
    pub fn update(
        &mut self,
        new_positions: &[ChunkInt2],
        freed_positions: &[ChunkInt2],
        ceiling_scale: f64,
        voxel_chunks: &VoxelChunkManager,
        visibility: &VoxelVisibilityChunkManager,
        backend: &mut dyn RenderBackend,
    ) {
        let t0 = Instant::now();
        self.update_active_chunks(new_positions, freed_positions, voxel_chunks, backend);

        for &position in new_positions {
            let (Some(voxel_chunk), Some(index)) = (voxel_chunks.chunk(position), self.chunks.index_of(position)) else {
                continue;
            };
            Self::load_mesh_buffers(self.chunks.at_mut(index), voxel_chunk, ceiling_scale, backend);
            self.textures.load_chunk_textures(voxel_chunk, backend);

            let render_chunk = self.chunks.at_mut(index);
            for voxel in voxel_chunk.chasm_positions() {
                Self::load_chasm_wall(&self.chasm_wall_index_buffer_ids, render_chunk, voxel_chunk, voxel);
            }
            for voxel in voxel_chunk.door_positions() {
                Self::load_door_transforms(render_chunk, voxel_chunk, voxel, ceiling_scale);
            }
            log::debug!(
                target: "events",
                "render_chunk_loaded pos=({}, {}) mesh_insts={}",
                position.x,
                position.z,
                self.chunks.at(index).mesh_inst_count()
            );
        }

        for index in 0..self.chunks.len() {
            let position = self.chunks.at(index).position();
            let Some(voxel_chunk) = voxel_chunks.chunk(position) else {
                log::warn!("render chunk ({}, {}) has no voxel chunk", position.x, position.z);
                continue;
            };
            if !voxel_chunk.has_dirty_voxels() {
                continue;
            }

            if !voxel_chunk.dirty_shape_def_positions().is_empty() {
                // Shape and texture defs may have been added since the chunk loaded.
                Self::load_mesh_buffers(self.chunks.at_mut(index), voxel_chunk, ceiling_scale, backend);
                self.textures.load_chunk_textures(voxel_chunk, backend);
            }

            let render_chunk = self.chunks.at_mut(index);
            for &voxel in voxel_chunk.dirty_chasm_wall_inst_positions() {
                Self::load_chasm_wall(&self.chasm_wall_index_buffer_ids, render_chunk, voxel_chunk, voxel);
            }
            for &voxel in voxel_chunk.dirty_door_anim_inst_positions() {
                Self::load_door_transforms(render_chunk, voxel_chunk, voxel, ceiling_scale);
            }

            for voxels in [
                voxel_chunk.dirty_shape_def_positions(),
                voxel_chunk.dirty_door_anim_inst_positions(),
                voxel_chunk.dirty_door_vis_inst_positions(),
                voxel_chunk.dirty_fade_anim_inst_positions(),
                voxel_chunk.dirty_chasm_wall_inst_positions(),
            ] {
                self.update_chunk_draw_calls(index, voxel_chunk, voxels, ceiling_scale);
            }
        }

        self.rebuild_draw_calls_list(visibility);
        log::debug!(
            target: "perf",
            "ms={} render_voxel_update chunks={} draw_calls={}",
            t0.elapsed().as_millis(),
            self.chunks.len(),
            self.draw_calls.len()
        );
    }

    /// Gathers the cached draw calls of every voxel in a frustum-visible column.
    pub fn rebuild_draw_calls_list(&mut self, visibility: &VoxelVisibilityChunkManager) {
        self.draw_calls.clear();
        for render_chunk in self.chunks.iter() {
            let Some(vis_chunk) = visibility.chunk(render_chunk.position()) else {
                continue;
            };
            if !vis_chunk.any_visible_leaf_nodes() {
                continue;
            }
            for (x, z) in vis_chunk.visible_leaf_columns() {
                for y in 0..render_chunk.height() {
                    let voxel = VoxelInt3::new(x as i32, y, z as i32);
                    self.draw_calls.extend_from_slice(render_chunk.draw_calls_at(voxel));
                }
            }
        }
    }

    /// Frees every chunk's buffers and all textures. Chasm wall buffers survive until
    /// [`RenderVoxelChunkManager::shutdown`].
    pub fn unload_scene(&mut self, backend: &mut dyn RenderBackend) {
        for chunk in self.chunks.iter_mut() {
            chunk.free_buffers(backend);
        }
        self.chunks.recycle_all();
        self.textures.clear(backend);
        self.draw_calls.clear();
    }
}
