#![cfg(test)]

use arena_chunk::{Chunk, ChunkInt2, VoxelChunkManager, VoxelInt3};
use arena_voxels::{
    ArenaDoorType, ArenaVoxelType, ChasmType, TextureAsset, VoxelChasmAnimation, VoxelShapeLibrary,
    VoxelShapeScaleType,
};

use crate::config::{PaletteConfig, SceneConfig};
use crate::demo::Demo;
use crate::level::{ColumnKind, LevelGenerator, LevelPalette};

const DT: f64 = 1.0 / 60.0;

fn small_config() -> SceneConfig {
    let mut cfg = SceneConfig::default();
    cfg.chunk_distance = 0;
    cfg.workers = 1;
    cfg.camera.walk_speed = 0.0;
    cfg
}

fn generator(seed: i32, chunk_height: i32) -> LevelGenerator {
    let mut lib = VoxelShapeLibrary::new();
    LevelGenerator::new(LevelPalette::new(&mut lib, 1.0, &PaletteConfig::default()), seed, chunk_height)
}

const CUSTOM_PALETTE: &str = r#"
[palette]
floor = ["STONE.IMG"]
wall = ["BRICK.IMG", { filename = "BRICK.IMG", index = 1 }, "ROOF.IMG"]
raised_scale = "ScaledFromMin"
door_types = ["Raising"]

[[palette.chasms]]
chasm_type = "Dry"
wall = "PIT.IMG"
animation = "PIT.CFA"

[[palette.chasms]]
chasm_type = "Wet"
wall = "SWAMP.IMG"
animation = "SWAMPANI.CFA"
frame_count = 3

[[palette.chasms]]
chasm_type = "Lava"
wall = "LAVACHASM.IMG"
animation = "LAVAANI.CFA"
"#;

#[test]
fn partial_config_keeps_defaults() {
    let cfg = SceneConfig::from_toml_str("seed = 7\n[camera]\nfov_y = 90.0\n").unwrap();
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.camera.fov_y, 90.0);
    let defaults = SceneConfig::default();
    assert_eq!(cfg.chunk_distance, defaults.chunk_distance);
    assert_eq!(cfg.camera.aspect, defaults.camera.aspect);
    assert_eq!(cfg.chasm_anim_period, arena_render::CHASM_ANIM_SECONDS);
}

#[test]
fn invalid_config_values_are_rejected() {
    assert!(SceneConfig::from_toml_str("ceiling_scale = 0.0").is_err());
    assert!(SceneConfig::from_toml_str("chunk_height = 1").is_err());
    assert!(SceneConfig::from_toml_str("chunk_distance = -1").is_err());
    assert!(SceneConfig::from_toml_str("chasm_anim_period = -2.0").is_err());
    assert!(SceneConfig::from_toml_str("seed = \"abc\"").is_err());
}

#[test]
fn palette_parses_from_toml() {
    let cfg = SceneConfig::from_toml_str(CUSTOM_PALETTE).unwrap();
    let palette = &cfg.palette;
    assert_eq!(palette.floor, vec![TextureAsset::new("STONE.IMG")]);
    assert_eq!(palette.wall[1], TextureAsset::with_index("BRICK.IMG", 1));
    assert_eq!(palette.raised_scale, VoxelShapeScaleType::ScaledFromMin);
    assert_eq!(palette.door_types, vec![ArenaDoorType::Raising]);
    // Omitted keys keep their defaults.
    assert_eq!(palette.door, PaletteConfig::default().door);
    let wet = palette.chasm(ChasmType::Wet).unwrap();
    assert_eq!(wet.wall, TextureAsset::new("SWAMP.IMG"));
    assert_eq!(wet.frames().len(), 3);
    assert_eq!(palette.chasm(ChasmType::Dry).unwrap().frame_count, 5);
}

#[test]
fn incomplete_palettes_are_rejected() {
    assert!(SceneConfig::from_toml_str("[palette]\nwall = [\"WALL.IMG\"]").is_err());
    assert!(SceneConfig::from_toml_str("[palette]\ndoor_types = []").is_err());
    assert!(SceneConfig::from_toml_str("[palette]\ndoor_types = [\"Revolving\"]").is_err());
    let missing_lava = "[[palette.chasms]]\nchasm_type = \"Dry\"\nwall = \"PIT.IMG\"\nanimation = \"PIT.CFA\"";
    assert!(SceneConfig::from_toml_str(missing_lava).is_err());
}

#[test]
fn populated_chunk_uses_the_configured_palette() {
    let cfg = SceneConfig::from_toml_str(CUSTOM_PALETTE).unwrap();
    let mut lib = VoxelShapeLibrary::new();
    let generator = LevelGenerator::new(LevelPalette::new(&mut lib, 1.0, &cfg.palette), cfg.seed, 3);

    // Scan until the layout has produced a floor, a wall, a door and a wet chasm.
    let (mut floor, mut wall, mut door, mut wet) = (false, false, false, false);
    for cz in -4..4 {
        for cx in -4..4 {
            let mut chunk = VoxelChunkManager::new().take_recycled();
            generator.populate(&mut chunk, ChunkInt2::new(cx, cz));
            for z in 0..Chunk::DEPTH {
                for x in 0..Chunk::WIDTH {
                    let bottom = VoxelInt3::new(x, 0, z);
                    let main = VoxelInt3::new(x, 1, z);
                    let tex = |v: VoxelInt3, slot: usize| {
                        chunk.texture_def(chunk.texture_def_id(v)).texture_asset(slot).cloned()
                    };
                    let kind = |v: VoxelInt3| chunk.shape_def(chunk.shape_def_id(v)).voxel_type;
                    if kind(bottom) == ArenaVoxelType::Floor {
                        assert_eq!(tex(bottom, 0), Some(TextureAsset::new("STONE.IMG")));
                        floor = true;
                    }
                    if kind(main) == ArenaVoxelType::Wall {
                        assert_eq!(tex(main, 2), Some(TextureAsset::new("ROOF.IMG")));
                        wall = true;
                    }
                    if let Some(def) = chunk.try_get_door_def_id(main) {
                        assert_eq!(chunk.door_def(def).door_type, ArenaDoorType::Raising);
                        door = true;
                    }
                    if let Some(def) = chunk.try_get_chasm_def_id(bottom) {
                        let chasm = chunk.chasm_def(def);
                        if chasm.chasm_type == ChasmType::Wet {
                            assert_eq!(chasm.wall_texture, TextureAsset::new("SWAMP.IMG"));
                            let VoxelChasmAnimation::Animated { frames } = &chasm.animation else {
                                panic!("wet chasms animate");
                            };
                            assert_eq!(frames.len(), 3);
                            wet = true;
                        }
                    }
                }
            }
        }
    }
    assert!(floor && wall && door && wet, "floor={floor} wall={wall} door={door} wet={wet}");
}

#[test]
fn palette_changes_force_repopulation() {
    let base = SceneConfig::default();
    let mut repainted = base.clone();
    repainted.palette.floor = vec![TextureAsset::new("STONE.IMG")];
    assert!(base.requires_repopulate(&repainted));
}

#[test]
fn only_layout_changes_force_repopulation() {
    let base = SceneConfig::default();
    let mut farther = base.clone();
    farther.chunk_distance += 2;
    farther.camera.turn_speed = 0.0;
    assert!(!base.requires_repopulate(&farther));
    let mut reseeded = base.clone();
    reseeded.seed += 1;
    assert!(base.requires_repopulate(&reseeded));
    let mut taller = base.clone();
    taller.ceiling_scale = 1.5;
    assert!(base.requires_repopulate(&taller));
}

#[test]
fn populated_chunk_matches_the_column_layout() {
    let generator = generator(1337, 3);
    let mut chunk = VoxelChunkManager::new().take_recycled();
    let position = ChunkInt2::new(-1, 2);
    generator.populate(&mut chunk, position);
    assert_eq!(chunk.position(), position);
    assert_eq!(chunk.height(), 3);

    let voxel_type = |v: VoxelInt3| chunk.shape_def(chunk.shape_def_id(v)).voxel_type;
    for z in 0..Chunk::DEPTH {
        for x in 0..Chunk::WIDTH {
            let kind = generator.column_kind(position.x * Chunk::WIDTH + x, position.z * Chunk::DEPTH + z);
            let floor = VoxelInt3::new(x, 0, z);
            let main = VoxelInt3::new(x, 1, z);
            match kind {
                ColumnKind::Chasm(chasm_type) => {
                    assert_eq!(voxel_type(floor), ArenaVoxelType::Chasm);
                    let def = chunk.try_get_chasm_def_id(floor).unwrap();
                    assert_eq!(chunk.chasm_def(def).chasm_type, chasm_type);
                    assert_eq!(voxel_type(main), ArenaVoxelType::None);
                }
                ColumnKind::Door => {
                    assert_eq!(voxel_type(main), ArenaVoxelType::Door);
                    assert!(chunk.try_get_door_def_id(main).is_some());
                    assert_eq!(voxel_type(VoxelInt3::new(x, 2, z)), ArenaVoxelType::Wall);
                }
                ColumnKind::Wall => {
                    assert_eq!(voxel_type(floor), ArenaVoxelType::Floor);
                    assert_eq!(voxel_type(main), ArenaVoxelType::Wall);
                    assert_eq!(voxel_type(VoxelInt3::new(x, 2, z)), ArenaVoxelType::Wall);
                }
                ColumnKind::Raised => assert_eq!(voxel_type(main), ArenaVoxelType::Raised),
                ColumnKind::Diagonal { .. } => assert_eq!(voxel_type(main), ArenaVoxelType::Diagonal),
                ColumnKind::Open => {
                    assert_eq!(voxel_type(floor), ArenaVoxelType::Floor);
                    assert_eq!(voxel_type(main), ArenaVoxelType::None);
                }
            }
        }
    }
    // Shape defs are shared, not duplicated per voxel.
    assert!(chunk.shape_def_count() <= 10, "{}", chunk.shape_def_count());
}

#[test]
fn layout_depends_only_on_seed_and_world_position() {
    let a = generator(42, 2);
    let b = generator(42, 4);
    let c = generator(43, 2);
    let mut differs = false;
    for wz in -70..70 {
        for wx in (-70..70).step_by(7) {
            assert_eq!(a.column_kind(wx, wz), b.column_kind(wx, wz));
            differs |= a.column_kind(wx, wz) != c.column_kind(wx, wz);
        }
    }
    assert!(differs);
}

#[test]
fn demo_streams_populates_and_draws() {
    let mut demo = Demo::new(small_config()).unwrap();
    for _ in 0..3 {
        demo.step(DT).unwrap();
    }
    assert_eq!(demo.frame(), 3);
    assert_eq!(demo.active_chunk_count(), 1);
    assert!(demo.graph().render_chunks().chunk(ChunkInt2::new(0, 0)).is_some());
    let stats = demo.last_frame_stats();
    assert!(stats.draw_call_count > 0);
    assert_eq!(stats.draw_call_count, demo.graph().draw_calls().len());
    assert_eq!(demo.shutdown(), 0);
}

#[test]
fn walking_across_a_chunk_border_swaps_chunks() {
    let mut cfg = small_config();
    // 32 voxels per frame: the eye enters chunk (1, 0) on the second frame.
    cfg.camera.walk_speed = 32.0 / DT;
    let mut demo = Demo::new(cfg).unwrap();
    demo.step(DT).unwrap();
    assert!(demo.graph().render_chunks().chunk(ChunkInt2::new(0, 0)).is_some());
    demo.step(DT).unwrap();
    assert!(demo.eye().x > 64.0);
    assert_eq!(demo.active_chunk_count(), 1);
    assert!(demo.graph().render_chunks().chunk(ChunkInt2::new(1, 0)).is_some());
    assert!(demo.graph().render_chunks().chunk(ChunkInt2::new(0, 0)).is_none());
    assert!(demo.graph().visibility().chunk(ChunkInt2::new(0, 0)).is_none());
    assert_eq!(demo.shutdown(), 0);
}

#[test]
fn reseeding_repopulates_in_place() {
    let mut demo = Demo::new(small_config()).unwrap();
    demo.step(DT).unwrap();
    let buffers_before = demo.backend().live_buffer_count();

    let mut reseeded = demo.config().clone();
    reseeded.seed += 1;
    reseeded.chunk_distance = 1;
    demo.apply_config(reseeded);
    demo.step(DT).unwrap();
    assert_eq!(demo.active_chunk_count(), 9);
    assert_eq!(demo.graph().render_chunks().len(), 9);
    assert!(demo.backend().live_buffer_count() > buffers_before);
    assert_eq!(demo.shutdown(), 0);
}
