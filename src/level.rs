//! Procedural level layout for the demo: a floor layer with chasms cut into it and a
//! main floor of walls, raised platforms, diagonals and doors, all driven by 2D noise in
//! world space so neighboring chunks line up.

use std::sync::Arc;

use arena_chunk::{Chunk, ChunkInt2, VoxelChunk, VoxelInt3};
use arena_voxels::{
    ArenaDoorType, ArenaVoxelShape, ChasmType, VoxelChasmDefinition, VoxelDoorDefinition, VoxelShapeDefinition,
    VoxelShapeLibrary, VoxelShapeScaleType, VoxelTextureDefinition,
};
use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::config::PaletteConfig;

const WALL_THRESHOLD: f32 = 0.35;
const RAISED_THRESHOLD: f32 = 0.25;
const CHASM_THRESHOLD: f32 = -0.55;
const DIAGONAL_THRESHOLD: f32 = 0.80;
/// Door lattice spacing in voxels; doors replace walls on this grid.
const DOOR_SPACING: i32 = 16;

/// A chasm type's shared shape plus the definition each chasm voxel gets.
#[derive(Debug)]
struct ChasmEntry {
    chasm_type: ChasmType,
    shape: Arc<VoxelShapeDefinition>,
    def: VoxelChasmDefinition,
}

/// Shared shape definitions and per-kind textures the populator hands out. Built once
/// per ceiling scale and palette config.
#[derive(Debug)]
pub struct LevelPalette {
    air: Arc<VoxelShapeDefinition>,
    floor: Arc<VoxelShapeDefinition>,
    wall: Arc<VoxelShapeDefinition>,
    raised: Arc<VoxelShapeDefinition>,
    diagonal: [Arc<VoxelShapeDefinition>; 2],
    door: Arc<VoxelShapeDefinition>,
    chasms: Vec<ChasmEntry>,
    floor_tex: VoxelTextureDefinition,
    wall_tex: VoxelTextureDefinition,
    raised_tex: VoxelTextureDefinition,
    diagonal_tex: VoxelTextureDefinition,
    door_tex: VoxelTextureDefinition,
    door_types: Vec<ArenaDoorType>,
}

impl LevelPalette {
    /// `config` must have passed [`PaletteConfig::validate`].
    pub fn new(lib: &mut VoxelShapeLibrary, ceiling_scale: f64, config: &PaletteConfig) -> Self {
        let mut shape = |s: ArenaVoxelShape, scale| lib.get_or_create(&s, scale, ceiling_scale);
        let floor = shape(ArenaVoxelShape::Floor, VoxelShapeScaleType::ScaledFromMin);
        let wall = shape(ArenaVoxelShape::Wall, VoxelShapeScaleType::ScaledFromMin);
        let raised = shape(
            ArenaVoxelShape::Raised {
                y_offset: 0.0,
                y_size: 0.25,
                v_bottom: 0.75,
                v_top: 1.0,
            },
            config.raised_scale,
        );
        let diagonal = [
            shape(ArenaVoxelShape::Diagonal { type1: true }, VoxelShapeScaleType::ScaledFromMin),
            shape(ArenaVoxelShape::Diagonal { type1: false }, VoxelShapeScaleType::ScaledFromMin),
        ];
        let door = shape(ArenaVoxelShape::Door, VoxelShapeScaleType::ScaledFromMin);
        let chasms = config
            .chasms
            .iter()
            .map(|style| ChasmEntry {
                chasm_type: style.chasm_type,
                shape: shape(
                    ArenaVoxelShape::Chasm {
                        chasm_type: style.chasm_type,
                    },
                    VoxelShapeScaleType::ScaledFromMin,
                ),
                def: VoxelChasmDefinition::classic(style.chasm_type, style.wall.clone(), style.frames()),
            })
            .collect();
        Self {
            air: lib.air(),
            floor,
            wall,
            raised,
            diagonal,
            door,
            chasms,
            floor_tex: VoxelTextureDefinition::new(config.floor.clone()),
            wall_tex: VoxelTextureDefinition::new(config.wall.clone()),
            raised_tex: VoxelTextureDefinition::new(config.raised.clone()),
            diagonal_tex: VoxelTextureDefinition::new(config.diagonal.clone()),
            door_tex: VoxelTextureDefinition::new(config.door.clone()),
            door_types: config.door_types.clone(),
        }
    }

    fn chasm(&self, chasm_type: ChasmType) -> Option<&ChasmEntry> {
        self.chasms.iter().find(|c| c.chasm_type == chasm_type)
    }

    /// Door type of the lattice door at world voxel `(wx, wz)`, cycling through the palette.
    fn door_type_for(&self, wx: i32, wz: i32) -> Option<ArenaDoorType> {
        let n = i32::try_from(self.door_types.len()).ok()?;
        if n == 0 {
            return None;
        }
        let i = (wx.div_euclid(DOOR_SPACING) + wz.div_euclid(DOOR_SPACING)).rem_euclid(n);
        self.door_types.get(i as usize).copied()
    }
}

/// What one voxel column of the main floor holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Open,
    Wall,
    Door,
    Raised,
    Diagonal { type1: bool },
    Chasm(ChasmType),
}

/// Fills recycled voxel chunks. Shared read-only across population workers.
pub struct LevelGenerator {
    palette: LevelPalette,
    layout: FastNoiseLite,
    detail: FastNoiseLite,
    chunk_height: i32,
}

impl LevelGenerator {
    pub fn new(palette: LevelPalette, seed: i32, chunk_height: i32) -> Self {
        debug_assert!(chunk_height >= 2);
        let mut layout = FastNoiseLite::with_seed(seed);
        layout.set_noise_type(Some(NoiseType::OpenSimplex2));
        layout.set_frequency(Some(0.045));
        let mut detail = FastNoiseLite::with_seed(seed.wrapping_add(1));
        detail.set_noise_type(Some(NoiseType::OpenSimplex2));
        detail.set_frequency(Some(0.11));
        Self {
            palette,
            layout,
            detail,
            chunk_height,
        }
    }

    /// Layout of the column at world voxel `(wx, wz)`.
    pub fn column_kind(&self, wx: i32, wz: i32) -> ColumnKind {
        let h = self.layout.get_noise_2d(wx as f32, wz as f32);
        let d = self.detail.get_noise_2d(wx as f32, wz as f32);
        if h < CHASM_THRESHOLD {
            let chasm_type = if d < -0.3 {
                ChasmType::Dry
            } else if d < 0.4 {
                ChasmType::Wet
            } else {
                ChasmType::Lava
            };
            return ColumnKind::Chasm(chasm_type);
        }
        if h > WALL_THRESHOLD {
            if wx.rem_euclid(DOOR_SPACING) == 0 && wz.rem_euclid(DOOR_SPACING) == DOOR_SPACING / 2 {
                return ColumnKind::Door;
            }
            if d > DIAGONAL_THRESHOLD {
                return ColumnKind::Diagonal { type1: (wx + wz) % 2 == 0 };
            }
            return ColumnKind::Wall;
        }
        if h > RAISED_THRESHOLD {
            return ColumnKind::Raised;
        }
        ColumnKind::Open
    }

    /// Resets `chunk` to `position` and lays out its voxels.
    pub fn populate(&self, chunk: &mut VoxelChunk, position: ChunkInt2) {
        chunk.init(position, self.chunk_height, Arc::clone(&self.palette.air));
        let p = &self.palette;

        let floor = chunk.add_shape_def(Arc::clone(&p.floor));
        let floor_tex = chunk.add_texture_def(p.floor_tex.clone());
        let wall = chunk.add_shape_def(Arc::clone(&p.wall));
        let wall_tex = chunk.add_texture_def(p.wall_tex.clone());
        let raised_tex = chunk.add_texture_def(p.raised_tex.clone());
        let door_tex = chunk.add_texture_def(p.door_tex.clone());
        let diagonal_tex = chunk.add_texture_def(p.diagonal_tex.clone());

        let origin_x = position.x * Chunk::WIDTH;
        let origin_z = position.z * Chunk::DEPTH;
        for z in 0..Chunk::DEPTH {
            for x in 0..Chunk::WIDTH {
                let floor_voxel = VoxelInt3::new(x, 0, z);
                let main_voxel = VoxelInt3::new(x, 1, z);
                match self.column_kind(origin_x + x, origin_z + z) {
                    ColumnKind::Chasm(chasm_type) => {
                        let Some(entry) = p.chasm(chasm_type) else {
                            continue;
                        };
                        let shape_id = chunk.add_shape_def(Arc::clone(&entry.shape));
                        let tex = chunk.add_texture_def(VoxelTextureDefinition::default());
                        chunk.set_voxel(floor_voxel, shape_id, tex);
                        let def = chunk.add_chasm_def(entry.def.clone());
                        chunk.add_chasm_def_position(def, floor_voxel);
                    }
                    kind => {
                        chunk.set_voxel(floor_voxel, floor, floor_tex);
                        match kind {
                            ColumnKind::Wall => {
                                for y in 1..self.chunk_height {
                                    chunk.set_voxel(VoxelInt3::new(x, y, z), wall, wall_tex);
                                }
                            }
                            ColumnKind::Door => {
                                let door = chunk.add_shape_def(Arc::clone(&p.door));
                                chunk.set_voxel(main_voxel, door, door_tex);
                                if let Some(door_type) = p.door_type_for(origin_x + x, origin_z + z) {
                                    let def = chunk.add_door_def(VoxelDoorDefinition { door_type });
                                    chunk.add_door_def_position(def, main_voxel);
                                }
                                for y in 2..self.chunk_height {
                                    chunk.set_voxel(VoxelInt3::new(x, y, z), wall, wall_tex);
                                }
                            }
                            ColumnKind::Raised => {
                                let raised = chunk.add_shape_def(Arc::clone(&p.raised));
                                chunk.set_voxel(main_voxel, raised, raised_tex);
                            }
                            ColumnKind::Diagonal { type1 } => {
                                let shape = &p.diagonal[usize::from(!type1)];
                                let diagonal = chunk.add_shape_def(Arc::clone(shape));
                                chunk.set_voxel(main_voxel, diagonal, diagonal_tex);
                            }
                            ColumnKind::Open | ColumnKind::Chasm(_) => {}
                        }
                    }
                }
            }
        }
    }
}
