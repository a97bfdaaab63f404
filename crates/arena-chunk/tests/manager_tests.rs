use arena_chunk::{ChunkInt2, CoordDouble3, VoxelChunk, VoxelChunkManager, VoxelInt3};
use arena_geom::Vec3;
use arena_voxels::{
    ArenaDoorType, ArenaVoxelShape, ChasmType, TextureAsset, VoxelChasmDefinition,
    VoxelDoorDefinition, VoxelFacing2D, VoxelShapeLibrary, VoxelShapeScaleType,
    VoxelTextureDefinition,
};

fn chunk_at(lib: &mut VoxelShapeLibrary, position: ChunkInt2) -> VoxelChunk {
    let mut chunk = VoxelChunk::default();
    chunk.init(position, 2, lib.air());
    chunk
}

fn place(lib: &mut VoxelShapeLibrary, chunk: &mut VoxelChunk, voxel: VoxelInt3, shape: ArenaVoxelShape) {
    let def = lib.get_or_create(&shape, VoxelShapeScaleType::ScaledFromMin, 1.0);
    let id = chunk.add_shape_def(def);
    let tex = chunk.add_texture_def(VoxelTextureDefinition::new(vec![TextureAsset::new("T.IMG")]));
    chunk.set_voxel(voxel, id, tex);
}

fn add_chasm(lib: &mut VoxelShapeLibrary, chunk: &mut VoxelChunk, voxel: VoxelInt3) {
    place(lib, chunk, voxel, ArenaVoxelShape::Chasm { chasm_type: ChasmType::Wet });
    let def = chunk.add_chasm_def(VoxelChasmDefinition::classic(
        ChasmType::Wet,
        TextureAsset::new("WALL.IMG"),
        vec![TextureAsset::with_index("WATER.CFA", 0)],
    ));
    chunk.add_chasm_def_position(def, voxel);
}

fn player_at(x: f64, z: f64) -> CoordDouble3 {
    CoordDouble3::from_world_point(Vec3::new(x, 0.5, z))
}

#[test]
fn chasm_walls_see_across_chunk_edges() {
    let mut lib = VoxelShapeLibrary::new();
    let mut manager = VoxelChunkManager::new();

    let origin = ChunkInt2::new(0, 0);
    let mut a = chunk_at(&mut lib, origin);
    let chasm = VoxelInt3::new(63, 0, 10);
    add_chasm(&mut lib, &mut a, chasm);
    // North neighbor inside the chunk is a wall.
    place(&mut lib, &mut a, VoxelInt3::new(62, 0, 10), ArenaVoxelShape::Wall);
    manager.insert_chunk(a);

    manager.update(0.0, &player_at(5.0, 5.0), 1.0);
    let inst = *manager.chunk(origin).unwrap().chasm_wall_inst(chasm).unwrap();
    assert!(inst.north && !inst.south && !inst.east && !inst.west);
    manager.end_frame();

    // South neighbor lives in the next chunk along +X.
    let mut b = chunk_at(&mut lib, ChunkInt2::new(1, 0));
    place(&mut lib, &mut b, VoxelInt3::new(0, 0, 10), ArenaVoxelShape::Wall);
    manager.insert_chunk(b);
    manager.update(0.0, &player_at(5.0, 5.0), 1.0);
    let chunk = manager.chunk(origin).unwrap();
    let inst = chunk.chasm_wall_inst(chasm).unwrap();
    assert!(inst.north && inst.south);
    assert_eq!(chunk.dirty_chasm_wall_inst_positions(), &[chasm]);
    manager.end_frame();

    manager.free_chunks(&[ChunkInt2::new(1, 0)]);
    manager.update(0.0, &player_at(5.0, 5.0), 1.0);
    assert!(!manager.chunk(origin).unwrap().chasm_wall_inst(chasm).unwrap().south);
}

#[test]
fn door_faces_track_the_camera_side() {
    let mut lib = VoxelShapeLibrary::new();
    let mut manager = VoxelChunkManager::new();
    let origin = ChunkInt2::new(0, 0);
    let mut chunk = chunk_at(&mut lib, origin);
    let door = VoxelInt3::new(20, 0, 20);
    place(&mut lib, &mut chunk, door, ArenaVoxelShape::Door);
    let def = chunk.add_door_def(VoxelDoorDefinition {
        door_type: ArenaDoorType::Sliding,
    });
    chunk.add_door_def_position(def, door);
    // Wall on the east side blocks that face.
    place(&mut lib, &mut chunk, VoxelInt3::new(20, 0, 19), ArenaVoxelShape::Wall);
    manager.insert_chunk(chunk);

    // Camera north-west of the door: north face, and the east face is blocked.
    manager.update(0.0, &player_at(10.5, 10.5), 1.0);
    let faces = manager.chunk(origin).unwrap().door_vis_inst(door).unwrap().visible_faces().to_vec();
    assert_eq!(faces, vec![VoxelFacing2D::NegativeX]);
    manager.end_frame();

    // Camera south-west: south face plus west face.
    manager.update(0.0, &player_at(30.5, 30.5), 1.0);
    let chunk = manager.chunk(origin).unwrap();
    let faces = chunk.door_vis_inst(door).unwrap().visible_faces().to_vec();
    assert_eq!(faces, vec![VoxelFacing2D::PositiveX, VoxelFacing2D::PositiveZ]);
    assert_eq!(chunk.dirty_door_vis_inst_positions(), &[door]);
    manager.end_frame();

    // Same side again: nothing dirty.
    manager.update(0.0, &player_at(31.5, 31.5), 1.0);
    assert!(manager.chunk(origin).unwrap().dirty_door_vis_inst_positions().is_empty());
}

#[test]
fn missing_chunks_allow_door_faces() {
    let mut lib = VoxelShapeLibrary::new();
    let mut manager = VoxelChunkManager::new();
    let origin = ChunkInt2::new(0, 0);
    let mut chunk = chunk_at(&mut lib, origin);
    let door = VoxelInt3::new(0, 0, 0);
    place(&mut lib, &mut chunk, door, ArenaVoxelShape::Door);
    let def = chunk.add_door_def(VoxelDoorDefinition {
        door_type: ArenaDoorType::Raising,
    });
    chunk.add_door_def_position(def, door);
    manager.insert_chunk(chunk);

    manager.update(0.0, &player_at(-10.0, -10.0), 1.0);
    let faces = manager.chunk(origin).unwrap().door_vis_inst(door).unwrap().visible_faces().to_vec();
    assert_eq!(faces, vec![VoxelFacing2D::NegativeX, VoxelFacing2D::NegativeZ]);
}
