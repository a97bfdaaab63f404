use arena_chunk::{Chunk, ChunkInt2, PoolChunk, VoxelInt3, VoxelShapeDefId};
use arena_voxels::door::FACE_COUNT;
use hashbrown::HashMap;

use crate::backend::RenderBackend;
use crate::draw_call::RenderDrawCall;
use crate::heap::{RenderVoxelDrawCallHeap, RenderVoxelDrawCallRangeId};
use crate::ids::IndexBufferId;
use crate::mesh_inst::{RenderVoxelMeshInstId, RenderVoxelMeshInstance};
use crate::transform::RenderTransform;

/// Render-side state of one chunk: mesh instances per shape definition, chasm wall and
/// door lookups, and every voxel's cached draw calls.
#[derive(Debug, Default)]
pub struct RenderVoxelChunk {
    chunk: Chunk,
    mesh_insts: Vec<RenderVoxelMeshInstance>,
    mesh_inst_mappings: HashMap<VoxelShapeDefId, RenderVoxelMeshInstId>,
    /// Shared buffers owned by the manager, looked up per chasm voxel.
    chasm_wall_index_buffer_ids: HashMap<VoxelInt3, IndexBufferId>,
    door_transforms: HashMap<VoxelInt3, [RenderTransform; FACE_COUNT]>,
    draw_call_heap: RenderVoxelDrawCallHeap,
    draw_call_range_ids: Vec<Option<RenderVoxelDrawCallRangeId>>,
}

impl RenderVoxelChunk {
    pub fn init(&mut self, position: ChunkInt2, height: i32) {
        self.clear();
        self.chunk.init(position, height);
        let voxel_count = (Chunk::WIDTH * height * Chunk::DEPTH) as usize;
        self.draw_call_range_ids.resize(voxel_count, None);
    }

    #[inline]
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    #[inline]
    pub fn position(&self) -> ChunkInt2 {
        self.chunk.position()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.chunk.height()
    }

    fn voxel_index(&self, voxel: VoxelInt3) -> usize {
        debug_assert!(self.chunk.is_valid_voxel(voxel.x, voxel.y, voxel.z), "{voxel:?}");
        ((voxel.y * Chunk::DEPTH + voxel.z) * Chunk::WIDTH + voxel.x) as usize
    }

    pub fn add_mesh_inst(&mut self, shape_def_id: VoxelShapeDefId, inst: RenderVoxelMeshInstance) -> RenderVoxelMeshInstId {
        assert!(
            self.mesh_insts.len() < usize::from(RenderVoxelMeshInstId::MAX),
            "too many mesh instances in one chunk"
        );
        let id = self.mesh_insts.len() as RenderVoxelMeshInstId;
        self.mesh_insts.push(inst);
        self.mesh_inst_mappings.insert(shape_def_id, id);
        id
    }

    pub fn mesh_inst_count(&self) -> usize {
        self.mesh_insts.len()
    }

    pub fn mesh_inst(&self, id: RenderVoxelMeshInstId) -> &RenderVoxelMeshInstance {
        &self.mesh_insts[usize::from(id)]
    }

    pub fn mesh_inst_id(&self, shape_def_id: VoxelShapeDefId) -> Option<RenderVoxelMeshInstId> {
        self.mesh_inst_mappings.get(&shape_def_id).copied()
    }

    /// Mesh instance used by voxels of `shape_def_id`, if its buffers loaded.
    pub fn mesh_inst_for_shape(&self, shape_def_id: VoxelShapeDefId) -> Option<&RenderVoxelMeshInstance> {
        self.mesh_inst_id(shape_def_id).map(|id| self.mesh_inst(id))
    }

    pub fn set_chasm_wall_index_buffer(&mut self, voxel: VoxelInt3, id: Option<IndexBufferId>) {
        match id {
            Some(id) => {
                self.chasm_wall_index_buffer_ids.insert(voxel, id);
            }
            None => {
                self.chasm_wall_index_buffer_ids.remove(&voxel);
            }
        }
    }

    pub fn chasm_wall_index_buffer(&self, voxel: VoxelInt3) -> Option<IndexBufferId> {
        self.chasm_wall_index_buffer_ids.get(&voxel).copied()
    }

    pub fn set_door_transforms(&mut self, voxel: VoxelInt3, transforms: [RenderTransform; FACE_COUNT]) {
        self.door_transforms.insert(voxel, transforms);
    }

    pub fn door_transforms(&self, voxel: VoxelInt3) -> Option<&[RenderTransform; FACE_COUNT]> {
        self.door_transforms.get(&voxel)
    }

    /// Replaces the voxel's cached draw calls. An empty slice just frees them.
    pub fn set_draw_calls(&mut self, voxel: VoxelInt3, draw_calls: &[RenderDrawCall]) {
        self.free_draw_calls(voxel);
        if draw_calls.is_empty() {
            return;
        }
        let range_id = self.draw_call_heap.alloc(draw_calls.len());
        self.draw_call_heap.get_mut(range_id).copy_from_slice(draw_calls);
        let index = self.voxel_index(voxel);
        self.draw_call_range_ids[index] = Some(range_id);
    }

    pub fn free_draw_calls(&mut self, voxel: VoxelInt3) {
        let index = self.voxel_index(voxel);
        if let Some(range_id) = self.draw_call_range_ids[index].take() {
            self.draw_call_heap.free(range_id);
        }
    }

    pub fn draw_calls_at(&self, voxel: VoxelInt3) -> &[RenderDrawCall] {
        match self.draw_call_range_ids[self.voxel_index(voxel)] {
            Some(range_id) => self.draw_call_heap.get(range_id),
            None => &[],
        }
    }

    pub fn draw_call_count(&self) -> usize {
        self.draw_call_heap.live_draw_call_count()
    }

    /// Frees every mesh instance's backend buffers. Chasm wall buffers belong to the
    /// manager and are left alone.
    pub fn free_buffers(&mut self, backend: &mut dyn RenderBackend) {
        for inst in &mut self.mesh_insts {
            inst.free_buffers(backend);
        }
    }

    pub fn clear(&mut self) {
        debug_assert!(
            self.mesh_insts.iter().all(|inst| !inst.is_loaded()),
            "render chunk cleared with live buffers"
        );
        self.chunk.clear();
        self.mesh_insts.clear();
        self.mesh_inst_mappings.clear();
        self.chasm_wall_index_buffer_ids.clear();
        self.door_transforms.clear();
        self.draw_call_heap.clear();
        self.draw_call_range_ids.clear();
    }
}

impl PoolChunk for RenderVoxelChunk {
    fn position(&self) -> ChunkInt2 {
        self.chunk.position()
    }

    fn clear(&mut self) {
        RenderVoxelChunk::clear(self);
    }
}
