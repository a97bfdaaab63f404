use std::sync::Arc;

use arena_geom::Vec3;
use hashbrown::HashMap;

use arena_voxels::{
    VoxelChasmDefinition, VoxelDoorDefinition, VoxelShapeDefinition, VoxelTextureDefinition,
};

use crate::Chunk;
use crate::coords::{ChunkInt2, CoordDouble3, VoxelInt3};
use crate::instances::{
    DOOR_CLOSE_DISTANCE, DoorAnimState, VoxelChasmWallInstance, VoxelDoorAnimationInstance,
    VoxelDoorVisibilityInstance, VoxelFadeAnimationInstance,
};
use crate::pool::PoolChunk;

pub type VoxelShapeDefId = u16;
pub type VoxelTextureDefId = u16;
pub type DoorDefId = u16;
pub type ChasmDefId = u16;

pub const AIR_SHAPE_DEF_ID: VoxelShapeDefId = 0;
pub const AIR_TEXTURE_DEF_ID: VoxelTextureDefId = 0;

const DIRTY_SHAPE_DEF: u8 = 1 << 0;
const DIRTY_DOOR_ANIM: u8 = 1 << 1;
const DIRTY_DOOR_VIS: u8 = 1 << 2;
const DIRTY_FADE_ANIM: u8 = 1 << 3;
const DIRTY_CHASM_WALL: u8 = 1 << 4;

fn push_unique<T: PartialEq>(defs: &mut Vec<T>, def: T) -> u16 {
    if let Some(i) = defs.iter().position(|d| *d == def) {
        return i as u16;
    }
    assert!(defs.len() < usize::from(u16::MAX), "too many definitions in one chunk");
    defs.push(def);
    (defs.len() - 1) as u16
}

/// Voxel definitions and per-voxel ids for one chunk, plus the sparse animation state and
/// the positions that changed this frame.
///
/// Voxels are stored Y-major: `(y * DEPTH + z) * WIDTH + x`.
#[derive(Debug, Default)]
pub struct VoxelChunk {
    chunk: Chunk,

    shape_defs: Vec<Arc<VoxelShapeDefinition>>,
    texture_defs: Vec<VoxelTextureDefinition>,
    door_defs: Vec<VoxelDoorDefinition>,
    chasm_defs: Vec<VoxelChasmDefinition>,

    shape_def_ids: Vec<VoxelShapeDefId>,
    texture_def_ids: Vec<VoxelTextureDefId>,
    door_def_indices: HashMap<VoxelInt3, DoorDefId>,
    chasm_def_indices: HashMap<VoxelInt3, ChasmDefId>,

    door_anim_insts: Vec<VoxelDoorAnimationInstance>,
    fade_anim_insts: Vec<VoxelFadeAnimationInstance>,
    chasm_wall_insts: Vec<VoxelChasmWallInstance>,
    door_vis_insts: Vec<VoxelDoorVisibilityInstance>,
    // Slot of each voxel's instance in the vectors above.
    chasm_wall_inst_indices: HashMap<VoxelInt3, usize>,
    door_vis_inst_indices: HashMap<VoxelInt3, usize>,

    dirty_flags: Vec<u8>,
    dirty_shape_def_positions: Vec<VoxelInt3>,
    dirty_door_anim_inst_positions: Vec<VoxelInt3>,
    dirty_door_vis_inst_positions: Vec<VoxelInt3>,
    dirty_fade_anim_inst_positions: Vec<VoxelInt3>,
    dirty_chasm_wall_inst_positions: Vec<VoxelInt3>,

    // Finished animations stay readable until end of frame.
    destroyed_door_anim_insts: Vec<VoxelInt3>,
    destroyed_fade_anim_insts: Vec<VoxelInt3>,
}

impl VoxelChunk {
    /// Resets the chunk to all air at `position`. `air` becomes shape def 0.
    pub fn init(&mut self, position: ChunkInt2, height: i32, air: Arc<VoxelShapeDefinition>) {
        debug_assert!(air.mesh.is_empty(), "shape def 0 must be air");
        self.clear();
        self.chunk.init(position, height);
        self.shape_defs.push(air);
        self.texture_defs.push(VoxelTextureDefinition::default());

        let count = (Chunk::WIDTH * height * Chunk::DEPTH) as usize;
        self.shape_def_ids = vec![AIR_SHAPE_DEF_ID; count];
        self.texture_def_ids = vec![AIR_TEXTURE_DEF_ID; count];
        self.dirty_flags = vec![0; count];
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

    #[inline]
    fn index(&self, voxel: VoxelInt3) -> usize {
        debug_assert!(
            self.chunk.is_valid_voxel(voxel.x, voxel.y, voxel.z),
            "voxel {voxel:?} outside chunk"
        );
        ((voxel.y * Chunk::DEPTH + voxel.z) * Chunk::WIDTH + voxel.x) as usize
    }

    #[inline]
    pub fn shape_def_count(&self) -> usize {
        self.shape_defs.len()
    }

    #[inline]
    pub fn shape_def(&self, id: VoxelShapeDefId) -> &VoxelShapeDefinition {
        &self.shape_defs[usize::from(id)]
    }

    #[inline]
    pub fn texture_def_count(&self) -> usize {
        self.texture_defs.len()
    }

    #[inline]
    pub fn texture_def(&self, id: VoxelTextureDefId) -> &VoxelTextureDefinition {
        &self.texture_defs[usize::from(id)]
    }

    #[inline]
    pub fn door_def(&self, id: DoorDefId) -> &VoxelDoorDefinition {
        &self.door_defs[usize::from(id)]
    }

    #[inline]
    pub fn chasm_def_count(&self) -> usize {
        self.chasm_defs.len()
    }

    #[inline]
    pub fn chasm_def(&self, id: ChasmDefId) -> &VoxelChasmDefinition {
        &self.chasm_defs[usize::from(id)]
    }

    #[inline]
    pub fn shape_def_id(&self, voxel: VoxelInt3) -> VoxelShapeDefId {
        self.shape_def_ids[self.index(voxel)]
    }

    #[inline]
    pub fn texture_def_id(&self, voxel: VoxelInt3) -> VoxelTextureDefId {
        self.texture_def_ids[self.index(voxel)]
    }

    /// Shape at `voxel`, or `None` when the coordinate is outside the chunk.
    pub fn try_shape_def_at(&self, voxel: VoxelInt3) -> Option<&VoxelShapeDefinition> {
        self.chunk
            .is_valid_voxel(voxel.x, voxel.y, voxel.z)
            .then(|| self.shape_def(self.shape_def_id(voxel)))
    }

    /// Registers a shared shape definition; the same `Arc` always maps to the same id.
    pub fn add_shape_def(&mut self, def: Arc<VoxelShapeDefinition>) -> VoxelShapeDefId {
        if let Some(i) = self.shape_defs.iter().position(|d| Arc::ptr_eq(d, &def)) {
            return i as VoxelShapeDefId;
        }
        assert!(self.shape_defs.len() < usize::from(u16::MAX), "too many shape defs in one chunk");
        self.shape_defs.push(def);
        (self.shape_defs.len() - 1) as VoxelShapeDefId
    }

    pub fn add_texture_def(&mut self, def: VoxelTextureDefinition) -> VoxelTextureDefId {
        push_unique(&mut self.texture_defs, def)
    }

    pub fn add_door_def(&mut self, def: VoxelDoorDefinition) -> DoorDefId {
        push_unique(&mut self.door_defs, def)
    }

    pub fn add_chasm_def(&mut self, def: VoxelChasmDefinition) -> ChasmDefId {
        push_unique(&mut self.chasm_defs, def)
    }

    pub fn set_shape_def_id(&mut self, voxel: VoxelInt3, id: VoxelShapeDefId) {
        debug_assert!(usize::from(id) < self.shape_defs.len());
        let i = self.index(voxel);
        if self.shape_def_ids[i] != id {
            self.shape_def_ids[i] = id;
            self.set_dirty(voxel, DIRTY_SHAPE_DEF);
        }
    }

    pub fn set_texture_def_id(&mut self, voxel: VoxelInt3, id: VoxelTextureDefId) {
        debug_assert!(usize::from(id) < self.texture_defs.len());
        let i = self.index(voxel);
        if self.texture_def_ids[i] != id {
            self.texture_def_ids[i] = id;
            self.set_dirty(voxel, DIRTY_SHAPE_DEF);
        }
    }

    pub fn set_voxel(&mut self, voxel: VoxelInt3, shape: VoxelShapeDefId, texture: VoxelTextureDefId) {
        self.set_shape_def_id(voxel, shape);
        self.set_texture_def_id(voxel, texture);
    }

    pub fn add_door_def_position(&mut self, id: DoorDefId, voxel: VoxelInt3) {
        debug_assert!(usize::from(id) < self.door_defs.len());
        self.door_def_indices.insert(voxel, id);
    }

    #[inline]
    pub fn try_get_door_def_id(&self, voxel: VoxelInt3) -> Option<DoorDefId> {
        self.door_def_indices.get(&voxel).copied()
    }

    pub fn door_positions(&self) -> impl Iterator<Item = VoxelInt3> + '_ {
        self.door_def_indices.keys().copied()
    }

    pub fn add_chasm_def_position(&mut self, id: ChasmDefId, voxel: VoxelInt3) {
        debug_assert!(usize::from(id) < self.chasm_defs.len());
        self.chasm_def_indices.insert(voxel, id);
    }

    #[inline]
    pub fn try_get_chasm_def_id(&self, voxel: VoxelInt3) -> Option<ChasmDefId> {
        self.chasm_def_indices.get(&voxel).copied()
    }

    pub fn chasm_positions(&self) -> impl Iterator<Item = VoxelInt3> + '_ {
        self.chasm_def_indices.keys().copied()
    }

    // ---------------------------------------------------------------- instances

    #[inline]
    pub fn door_anim_insts(&self) -> &[VoxelDoorAnimationInstance] {
        &self.door_anim_insts
    }

    pub fn door_anim_inst(&self, voxel: VoxelInt3) -> Option<&VoxelDoorAnimationInstance> {
        self.door_anim_insts.iter().find(|i| i.voxel == voxel)
    }

    /// Starts (or restarts) a door animation at the instance's voxel.
    pub fn add_door_anim_inst(&mut self, inst: VoxelDoorAnimationInstance) {
        debug_assert!(self.door_def_indices.contains_key(&inst.voxel), "door anim without a door def");
        self.destroyed_door_anim_insts.retain(|v| *v != inst.voxel);
        match self.door_anim_insts.iter_mut().find(|i| i.voxel == inst.voxel) {
            Some(existing) => *existing = inst,
            None => self.door_anim_insts.push(inst),
        }
        self.set_dirty(inst.voxel, DIRTY_DOOR_ANIM);
    }

    #[inline]
    pub fn fade_anim_insts(&self) -> &[VoxelFadeAnimationInstance] {
        &self.fade_anim_insts
    }

    pub fn fade_anim_inst(&self, voxel: VoxelInt3) -> Option<&VoxelFadeAnimationInstance> {
        self.fade_anim_insts.iter().find(|i| i.voxel == voxel)
    }

    pub fn add_fade_anim_inst(&mut self, inst: VoxelFadeAnimationInstance) {
        if self.fade_anim_inst(inst.voxel).is_some() {
            return;
        }
        self.fade_anim_insts.push(inst);
        self.set_dirty(inst.voxel, DIRTY_FADE_ANIM);
    }

    #[inline]
    pub fn chasm_wall_insts(&self) -> &[VoxelChasmWallInstance] {
        &self.chasm_wall_insts
    }

    pub fn chasm_wall_inst(&self, voxel: VoxelInt3) -> Option<&VoxelChasmWallInstance> {
        let &i = self.chasm_wall_inst_indices.get(&voxel)?;
        self.chasm_wall_insts.get(i)
    }

    /// Sets the walls of the chasm at `voxel`, adding or removing its instance as needed.
    /// Returns whether anything changed.
    pub fn set_chasm_walls(&mut self, voxel: VoxelInt3, north: bool, east: bool, south: bool, west: bool) -> bool {
        let new_inst = VoxelChasmWallInstance::new(voxel, north, east, south, west);
        let existing = self.chasm_wall_inst_indices.get(&voxel).copied();
        let changed = match (existing, new_inst.face_count() > 0) {
            (Some(i), true) => {
                let changed = self.chasm_wall_insts[i] != new_inst;
                self.chasm_wall_insts[i] = new_inst;
                changed
            }
            (Some(i), false) => {
                self.chasm_wall_insts.swap_remove(i);
                self.chasm_wall_inst_indices.remove(&voxel);
                if let Some(moved) = self.chasm_wall_insts.get(i) {
                    self.chasm_wall_inst_indices.insert(moved.voxel, i);
                }
                true
            }
            (None, true) => {
                self.chasm_wall_inst_indices.insert(voxel, self.chasm_wall_insts.len());
                self.chasm_wall_insts.push(new_inst);
                true
            }
            (None, false) => false,
        };
        if changed {
            self.set_dirty(voxel, DIRTY_CHASM_WALL);
        }
        changed
    }

    #[inline]
    pub fn door_vis_insts(&self) -> &[VoxelDoorVisibilityInstance] {
        &self.door_vis_insts
    }

    pub fn door_vis_inst(&self, voxel: VoxelInt3) -> Option<&VoxelDoorVisibilityInstance> {
        let &i = self.door_vis_inst_indices.get(&voxel)?;
        self.door_vis_insts.get(i)
    }

    pub fn add_door_vis_inst(&mut self, inst: VoxelDoorVisibilityInstance) {
        if self.door_vis_inst_indices.contains_key(&inst.voxel) {
            return;
        }
        self.door_vis_inst_indices.insert(inst.voxel, self.door_vis_insts.len());
        self.door_vis_insts.push(inst);
        self.set_dirty(inst.voxel, DIRTY_DOOR_VIS);
    }

    /// Re-evaluates door visibility instance `index`; see
    /// [`VoxelDoorVisibilityInstance::update`] for the arguments.
    #[allow(clippy::too_many_arguments)]
    pub fn update_door_vis_inst(
        &mut self,
        index: usize,
        camera_north_inclusive: bool,
        camera_east_inclusive: bool,
        north_allows: bool,
        east_allows: bool,
        south_allows: bool,
        west_allows: bool,
    ) {
        let inst = &mut self.door_vis_insts[index];
        let voxel = inst.voxel;
        if inst.update(
            camera_north_inclusive,
            camera_east_inclusive,
            north_allows,
            east_allows,
            south_allows,
            west_allows,
        ) {
            self.set_dirty(voxel, DIRTY_DOOR_VIS);
        }
    }

    // ---------------------------------------------------------------- dirty tracking

    fn set_dirty(&mut self, voxel: VoxelInt3, flag: u8) {
        let i = self.index(voxel);
        if self.dirty_flags[i] & flag != 0 {
            return;
        }
        self.dirty_flags[i] |= flag;
        let list = match flag {
            DIRTY_SHAPE_DEF => &mut self.dirty_shape_def_positions,
            DIRTY_DOOR_ANIM => &mut self.dirty_door_anim_inst_positions,
            DIRTY_DOOR_VIS => &mut self.dirty_door_vis_inst_positions,
            DIRTY_FADE_ANIM => &mut self.dirty_fade_anim_inst_positions,
            _ => &mut self.dirty_chasm_wall_inst_positions,
        };
        list.push(voxel);
    }

    #[inline]
    pub fn dirty_shape_def_positions(&self) -> &[VoxelInt3] {
        &self.dirty_shape_def_positions
    }

    /// Doors that animated this frame, including ones that just closed.
    #[inline]
    pub fn dirty_door_anim_inst_positions(&self) -> &[VoxelInt3] {
        &self.dirty_door_anim_inst_positions
    }

    #[inline]
    pub fn dirty_door_vis_inst_positions(&self) -> &[VoxelInt3] {
        &self.dirty_door_vis_inst_positions
    }

    /// Fading voxels, including ones that finished this frame.
    #[inline]
    pub fn dirty_fade_anim_inst_positions(&self) -> &[VoxelInt3] {
        &self.dirty_fade_anim_inst_positions
    }

    #[inline]
    pub fn dirty_chasm_wall_inst_positions(&self) -> &[VoxelInt3] {
        &self.dirty_chasm_wall_inst_positions
    }

    pub fn has_dirty_voxels(&self) -> bool {
        !(self.dirty_shape_def_positions.is_empty()
            && self.dirty_door_anim_inst_positions.is_empty()
            && self.dirty_door_vis_inst_positions.is_empty()
            && self.dirty_fade_anim_inst_positions.is_empty()
            && self.dirty_chasm_wall_inst_positions.is_empty())
    }

    // ---------------------------------------------------------------- simulation

    /// Advances door and fade animations. Doors left open start closing once the player
    /// is far enough away; finished fades turn their voxel into air.
    pub fn update(&mut self, dt: f64, player: &CoordDouble3, ceiling_scale: f64) {
        let origin = self.position().world_origin();
        let player_point = player.to_world_point();

        for i in 0..self.door_anim_insts.len() {
            let inst = &mut self.door_anim_insts[i];
            let voxel = inst.voxel;
            if self.destroyed_door_anim_insts.contains(&voxel) {
                continue;
            }
            inst.update(dt);
            match inst.state {
                DoorAnimState::Closed => self.destroyed_door_anim_insts.push(voxel),
                DoorAnimState::Closing => {}
                DoorAnimState::Opening | DoorAnimState::Open => {
                    let center = origin
                        + Vec3::new(
                            f64::from(voxel.x) + 0.5,
                            (f64::from(voxel.y) + 0.5) * ceiling_scale,
                            f64::from(voxel.z) + 0.5,
                        );
                    if (player_point - center).length() >= DOOR_CLOSE_DISTANCE {
                        inst.set_state(DoorAnimState::Closing);
                    }
                }
            }
            self.set_dirty(voxel, DIRTY_DOOR_ANIM);
        }

        for i in 0..self.fade_anim_insts.len() {
            let inst = &mut self.fade_anim_insts[i];
            let voxel = inst.voxel;
            if self.destroyed_fade_anim_insts.contains(&voxel) {
                continue;
            }
            inst.update(dt);
            let done = inst.is_done_fading();
            self.set_dirty(voxel, DIRTY_FADE_ANIM);
            if done {
                self.set_voxel(voxel, AIR_SHAPE_DEF_ID, AIR_TEXTURE_DEF_ID);
                self.destroyed_fade_anim_insts.push(voxel);
            }
        }
    }

    /// End-of-frame clean-up: clears dirty state and drops finished animations.
    pub fn end_frame(&mut self) {
        for list in [
            &mut self.dirty_shape_def_positions,
            &mut self.dirty_door_anim_inst_positions,
            &mut self.dirty_door_vis_inst_positions,
            &mut self.dirty_fade_anim_inst_positions,
            &mut self.dirty_chasm_wall_inst_positions,
        ] {
            for voxel in list.drain(..) {
                let i = ((voxel.y * Chunk::DEPTH + voxel.z) * Chunk::WIDTH + voxel.x) as usize;
                self.dirty_flags[i] = 0;
            }
        }

        let destroyed_doors = std::mem::take(&mut self.destroyed_door_anim_insts);
        self.door_anim_insts.retain(|i| !destroyed_doors.contains(&i.voxel));
        let destroyed_fades = std::mem::take(&mut self.destroyed_fade_anim_insts);
        self.fade_anim_insts.retain(|i| !destroyed_fades.contains(&i.voxel));
    }

    pub fn clear(&mut self) {
        self.chunk.clear();
        self.shape_defs.clear();
        self.texture_defs.clear();
        self.door_defs.clear();
        self.chasm_defs.clear();
        self.shape_def_ids.clear();
        self.texture_def_ids.clear();
        self.door_def_indices.clear();
        self.chasm_def_indices.clear();
        self.door_anim_insts.clear();
        self.fade_anim_insts.clear();
        self.chasm_wall_insts.clear();
        self.door_vis_insts.clear();
        self.chasm_wall_inst_indices.clear();
        self.door_vis_inst_indices.clear();
        self.dirty_flags.clear();
        self.dirty_shape_def_positions.clear();
        self.dirty_door_anim_inst_positions.clear();
        self.dirty_door_vis_inst_positions.clear();
        self.dirty_fade_anim_inst_positions.clear();
        self.dirty_chasm_wall_inst_positions.clear();
        self.destroyed_door_anim_insts.clear();
        self.destroyed_fade_anim_insts.clear();
    }
}

impl PoolChunk for VoxelChunk {
    fn position(&self) -> ChunkInt2 {
        VoxelChunk::position(self)
    }

    fn clear(&mut self) {
        VoxelChunk::clear(self);
    }
}
