use std::sync::Arc;

use arena_chunk::instances::{DOOR_ANIM_SPEED, DOOR_CLOSE_DISTANCE};
use arena_chunk::{
    AIR_SHAPE_DEF_ID, ChunkInt2, CoordDouble3, DoorAnimState, VoxelChunk,
    VoxelDoorAnimationInstance, VoxelFadeAnimationInstance, VoxelInt3,
};
use arena_geom::Vec3;
use arena_voxels::{
    ArenaDoorType, ArenaVoxelShape, TextureAsset, VoxelDoorDefinition, VoxelShapeLibrary,
    VoxelShapeScaleType, VoxelTextureDefinition,
};

fn new_chunk(lib: &mut VoxelShapeLibrary, position: ChunkInt2) -> VoxelChunk {
    let mut chunk = VoxelChunk::default();
    chunk.init(position, 3, lib.air());
    chunk
}

fn far_player() -> CoordDouble3 {
    CoordDouble3::new(ChunkInt2::new(10, 10), Vec3::new(1.0, 1.0, 1.0))
}

#[test]
fn init_fills_with_air() {
    let mut lib = VoxelShapeLibrary::new();
    let chunk = new_chunk(&mut lib, ChunkInt2::new(2, -1));
    assert_eq!(chunk.position(), ChunkInt2::new(2, -1));
    assert_eq!(chunk.height(), 3);
    assert_eq!(chunk.shape_def_id(VoxelInt3::new(63, 2, 63)), AIR_SHAPE_DEF_ID);
    assert!(chunk.shape_def(AIR_SHAPE_DEF_ID).mesh.is_empty());
    assert!(chunk.try_shape_def_at(VoxelInt3::new(0, 3, 0)).is_none());
    assert!(chunk.try_shape_def_at(VoxelInt3::new(-1, 0, 0)).is_none());
    assert!(!chunk.has_dirty_voxels());
}

#[test]
fn definitions_are_deduplicated() {
    let mut lib = VoxelShapeLibrary::new();
    let mut chunk = new_chunk(&mut lib, ChunkInt2::default());
    let wall = lib.get_or_create(&ArenaVoxelShape::Wall, VoxelShapeScaleType::ScaledFromMin, 1.0);
    let a = chunk.add_shape_def(Arc::clone(&wall));
    let b = chunk.add_shape_def(wall);
    assert_eq!(a, b);
    assert_eq!(chunk.shape_def_count(), 2);

    let tex = VoxelTextureDefinition::new(vec![TextureAsset::new("WALL.IMG")]);
    let t1 = chunk.add_texture_def(tex.clone());
    let t2 = chunk.add_texture_def(tex);
    assert_eq!(t1, t2);
    assert_eq!(chunk.texture_def_count(), 2);
}

#[test]
fn dirty_positions_are_unique_until_end_of_frame() {
    let mut lib = VoxelShapeLibrary::new();
    let mut chunk = new_chunk(&mut lib, ChunkInt2::default());
    let wall = chunk.add_shape_def(lib.get_or_create(&ArenaVoxelShape::Wall, VoxelShapeScaleType::ScaledFromMin, 1.0));
    let tex = chunk.add_texture_def(VoxelTextureDefinition::new(vec![TextureAsset::new("A.IMG")]));

    let v = VoxelInt3::new(4, 1, 5);
    chunk.set_voxel(v, wall, tex);
    chunk.set_voxel(v, wall, tex);
    chunk.set_shape_def_id(VoxelInt3::new(5, 1, 5), wall);
    assert_eq!(chunk.dirty_shape_def_positions(), &[v, VoxelInt3::new(5, 1, 5)]);

    chunk.end_frame();
    assert!(!chunk.has_dirty_voxels());

    // Setting the same id again is not a change.
    chunk.set_shape_def_id(v, wall);
    assert!(chunk.dirty_shape_def_positions().is_empty());
    chunk.set_shape_def_id(v, AIR_SHAPE_DEF_ID);
    assert_eq!(chunk.dirty_shape_def_positions(), &[v]);
}

#[test]
fn chasm_wall_instances_follow_their_faces() {
    let mut lib = VoxelShapeLibrary::new();
    let mut chunk = new_chunk(&mut lib, ChunkInt2::default());
    let v = VoxelInt3::new(1, 0, 1);

    assert!(!chunk.set_chasm_walls(v, false, false, false, false));
    assert!(chunk.set_chasm_walls(v, true, false, false, true));
    assert_eq!(chunk.chasm_wall_inst(v).and_then(|i| i.wall_index()), Some(0b1001 - 1));
    assert!(!chunk.set_chasm_walls(v, true, false, false, true));
    assert!(chunk.set_chasm_walls(v, false, false, false, false));
    assert!(chunk.chasm_wall_inst(v).is_none());
    assert_eq!(chunk.dirty_chasm_wall_inst_positions(), &[v]);
}

#[test]
fn chasm_wall_lookup_survives_removals() {
    let mut lib = VoxelShapeLibrary::new();
    let mut chunk = new_chunk(&mut lib, ChunkInt2::default());
    let chasms: Vec<_> = (0..40).map(|i| VoxelInt3::new(i % 8, 0, i / 8)).collect();
    for (i, &v) in chasms.iter().enumerate() {
        assert!(chunk.set_chasm_walls(v, i % 2 == 0, true, false, i % 3 == 0));
    }
    // Drop every third instance; the rest must still be found with their own faces.
    for &v in chasms.iter().step_by(3) {
        assert!(chunk.set_chasm_walls(v, false, false, false, false));
    }
    for (i, &v) in chasms.iter().enumerate() {
        match chunk.chasm_wall_inst(v) {
            Some(inst) => {
                assert_ne!(i % 3, 0, "{v:?} was removed");
                assert_eq!(inst.voxel, v);
                assert_eq!((inst.north, inst.east, inst.west), (i % 2 == 0, true, false));
            }
            None => assert_eq!(i % 3, 0, "{v:?} lost its instance"),
        }
    }
    assert_eq!(chunk.chasm_wall_insts().len(), 40 - 14);

    chunk.end_frame();
    chunk.init(ChunkInt2::new(1, 1), 3, lib.air());
    assert!(chunk.chasm_wall_inst(chasms[1]).is_none());
    assert!(chunk.set_chasm_walls(chasms[1], true, false, false, false));
    assert_eq!(chunk.chasm_wall_insts().len(), 1);
}

#[test]
fn door_opens_then_closes_when_player_walks_away() {
    let mut lib = VoxelShapeLibrary::new();
    let mut chunk = new_chunk(&mut lib, ChunkInt2::default());
    let door = VoxelInt3::new(10, 0, 10);
    let def = chunk.add_door_def(VoxelDoorDefinition {
        door_type: ArenaDoorType::Swinging,
    });
    chunk.add_door_def_position(def, door);
    chunk.add_door_anim_inst(VoxelDoorAnimationInstance::opening(door, DOOR_ANIM_SPEED));
    assert_eq!(chunk.dirty_door_anim_inst_positions(), &[door]);
    chunk.end_frame();

    let near = CoordDouble3::new(ChunkInt2::default(), Vec3::new(10.5, 0.5, 10.5 + DOOR_CLOSE_DISTANCE * 0.5));
    chunk.update(0.5, &near, 1.0);
    let inst = chunk.door_anim_inst(door).copied().unwrap();
    assert_eq!(inst.state, DoorAnimState::Opening);
    assert!((inst.percent_open - 0.65).abs() < 1e-9);
    chunk.end_frame();

    chunk.update(1.0, &near, 1.0);
    assert_eq!(chunk.door_anim_inst(door).unwrap().state, DoorAnimState::Open);
    chunk.end_frame();

    chunk.update(0.1, &far_player(), 1.0);
    assert_eq!(chunk.door_anim_inst(door).unwrap().state, DoorAnimState::Closing);
    chunk.end_frame();

    chunk.update(2.0, &far_player(), 1.0);
    // Closed this frame: still readable and dirty so the renderer can reset it.
    assert_eq!(chunk.door_anim_inst(door).unwrap().state, DoorAnimState::Closed);
    assert_eq!(chunk.dirty_door_anim_inst_positions(), &[door]);
    chunk.end_frame();
    assert!(chunk.door_anim_inst(door).is_none());
}

#[test]
fn finished_fade_turns_voxel_into_air() {
    let mut lib = VoxelShapeLibrary::new();
    let mut chunk = new_chunk(&mut lib, ChunkInt2::default());
    let wall = chunk.add_shape_def(lib.get_or_create(&ArenaVoxelShape::Wall, VoxelShapeScaleType::ScaledFromMin, 1.0));
    let v = VoxelInt3::new(0, 0, 0);
    chunk.set_shape_def_id(v, wall);
    chunk.add_fade_anim_inst(VoxelFadeAnimationInstance::new(v));
    chunk.end_frame();

    chunk.update(0.6, &far_player(), 1.0);
    assert_eq!(chunk.shape_def_id(v), wall);
    chunk.end_frame();

    chunk.update(0.6, &far_player(), 1.0);
    assert_eq!(chunk.shape_def_id(v), AIR_SHAPE_DEF_ID);
    assert_eq!(chunk.dirty_fade_anim_inst_positions(), &[v]);
    assert_eq!(chunk.dirty_shape_def_positions(), &[v]);
    assert!(chunk.fade_anim_inst(v).unwrap().is_done_fading());
    chunk.end_frame();
    assert!(chunk.fade_anim_inst(v).is_none());
}

#[test]
fn clear_resets_everything() {
    let mut lib = VoxelShapeLibrary::new();
    let mut chunk = new_chunk(&mut lib, ChunkInt2::new(3, 3));
    chunk.set_chasm_walls(VoxelInt3::new(0, 0, 0), true, true, true, true);
    chunk.clear();
    assert_eq!(chunk.shape_def_count(), 0);
    assert!(chunk.chasm_wall_insts().is_empty());
    assert!(!chunk.has_dirty_voxels());
    assert_eq!(chunk.position(), ChunkInt2::default());
}
