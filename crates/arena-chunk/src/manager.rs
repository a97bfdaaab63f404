use arena_voxels::{ArenaVoxelType, VoxelFacing2D, VoxelShapeDefinition};

use crate::coords::{ChunkInt2, CoordDouble3, CoordInt3, VoxelInt3};
use crate::instances::VoxelDoorVisibilityInstance;
use crate::pool::ChunkPool;
use crate::voxel_chunk::VoxelChunk;

const NORTH: VoxelFacing2D = VoxelFacing2D::NegativeX;
const EAST: VoxelFacing2D = VoxelFacing2D::NegativeZ;
const SOUTH: VoxelFacing2D = VoxelFacing2D::PositiveX;
const WEST: VoxelFacing2D = VoxelFacing2D::PositiveZ;

/// Owns the active voxel chunks and the state that depends on neighboring voxels across
/// chunk boundaries (chasm walls, door face visibility).
#[derive(Debug, Default)]
pub struct VoxelChunkManager {
    chunks: ChunkPool<VoxelChunk>,
}

impl VoxelChunkManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn chunks(&self) -> &ChunkPool<VoxelChunk> {
        &self.chunks
    }

    #[inline]
    pub fn chunk(&self, position: ChunkInt2) -> Option<&VoxelChunk> {
        self.chunks.get(position)
    }

    #[inline]
    pub fn chunk_mut(&mut self, position: ChunkInt2) -> Option<&mut VoxelChunk> {
        self.chunks.get_mut(position)
    }

    /// A cleared chunk for the level populator to fill.
    pub fn take_recycled(&mut self) -> VoxelChunk {
        self.chunks.take_recycled()
    }

    /// Shape at `coord`, or `None` when its chunk is not loaded or Y is out of range.
    pub fn shape_def_at(&self, coord: CoordInt3) -> Option<&VoxelShapeDefinition> {
        self.chunks.get(coord.chunk)?.try_shape_def_at(coord.voxel)
    }

    pub fn free_chunks(&mut self, positions: &[ChunkInt2]) {
        for &position in positions {
            if self.chunks.recycle(position) {
                log::debug!(target: "events", "voxel_chunk_freed pos=({}, {})", position.x, position.z);
            } else {
                log::warn!("freed chunk ({}, {}) was not active", position.x, position.z);
            }
        }
    }

    /// Activates a populated chunk and gives its doors visibility state.
    pub fn insert_chunk(&mut self, mut chunk: VoxelChunk) {
        let position = chunk.position();
        let doors: Vec<VoxelInt3> = chunk.door_positions().collect();
        for voxel in doors {
            chunk.add_door_vis_inst(VoxelDoorVisibilityInstance::new(voxel));
        }
        self.chunks.insert(chunk);
        log::debug!(target: "events", "voxel_chunk_spawned pos=({}, {})", position.x, position.z);
    }

    /// Steps animations, then refreshes chasm walls and door visibility against the
    /// current neighbors and player position.
    pub fn update(&mut self, dt: f64, player: &CoordDouble3, ceiling_scale: f64) {
        for chunk in self.chunks.iter_mut() {
            chunk.update(dt, player, ceiling_scale);
        }
        for i in 0..self.chunks.len() {
            self.update_chunk_chasm_walls(i);
        }
        let player_voxel = player.voxel(ceiling_scale);
        for i in 0..self.chunks.len() {
            self.update_chunk_door_visibility(i, player_voxel);
        }
    }

    fn neighbor_enables_geometry(&self, coord: CoordInt3, facing: VoxelFacing2D) -> bool {
        self.shape_def_at(coord.neighbor(facing))
            .is_some_and(|def| def.enables_neighbor_geometry())
    }

    fn neighbor_allows_door_faces(&self, coord: CoordInt3, facing: VoxelFacing2D) -> bool {
        self.shape_def_at(coord.neighbor(facing))
            .is_none_or(|def| def.allows_adjacent_door_faces())
    }

    fn update_chunk_chasm_walls(&mut self, index: usize) {
        let chunk = self.chunks.at(index);
        let position = chunk.position();
        let updates: Vec<(VoxelInt3, [bool; 4])> = chunk
            .chasm_positions()
            .map(|voxel| {
                let is_chasm = chunk.shape_def(chunk.shape_def_id(voxel)).voxel_type == ArenaVoxelType::Chasm;
                let coord = CoordInt3::new(position, voxel);
                let faces = if is_chasm {
                    [NORTH, EAST, SOUTH, WEST].map(|f| self.neighbor_enables_geometry(coord, f))
                } else {
                    [false; 4]
                };
                (voxel, faces)
            })
            .collect();

        let chunk = self.chunks.at_mut(index);
        for (voxel, [north, east, south, west]) in updates {
            chunk.set_chasm_walls(voxel, north, east, south, west);
        }
    }

    fn update_chunk_door_visibility(&mut self, index: usize, player: CoordInt3) {
        let chunk = self.chunks.at(index);
        let position = chunk.position();
        let updates: Vec<(bool, bool, [bool; 4])> = chunk
            .door_vis_insts()
            .iter()
            .map(|inst| {
                let door = CoordInt3::new(position, inst.voxel);
                let north_inclusive = player.chunk.x < door.chunk.x
                    || (player.chunk.x == door.chunk.x && player.voxel.x <= door.voxel.x);
                let east_inclusive = player.chunk.z < door.chunk.z
                    || (player.chunk.z == door.chunk.z && player.voxel.z <= door.voxel.z);
                let allows = [NORTH, EAST, SOUTH, WEST].map(|f| self.neighbor_allows_door_faces(door, f));
                (north_inclusive, east_inclusive, allows)
            })
            .collect();

        let chunk = self.chunks.at_mut(index);
        for (i, (north_inclusive, east_inclusive, [north, east, south, west])) in updates.into_iter().enumerate() {
            chunk.update_door_vis_inst(i, north_inclusive, east_inclusive, north, east, south, west);
        }
    }

    /// Clears per-frame dirty state in every chunk.
    pub fn end_frame(&mut self) {
        for chunk in self.chunks.iter_mut() {
            chunk.end_frame();
        }
    }

    pub fn clear(&mut self) {
        self.chunks.recycle_all();
        self.chunks.trim_pool();
    }
}
