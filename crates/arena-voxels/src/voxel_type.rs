//! The closed set of classic voxel shapes and their capability table.

use serde::Deserialize;

use crate::facing::VoxelFacing2D;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
pub enum ChasmType {
    Dry,
    Wet,
    Lava,
}

impl ChasmType {
    #[inline]
    pub fn is_dry(self) -> bool {
        matches!(self, ChasmType::Dry)
    }
}

/// Shape parameters of one classic voxel configuration. Each variant carries exactly the
/// parameters its geometry writer needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ArenaVoxelShape {
    None,
    Wall,
    Floor,
    Ceiling,
    Raised {
        y_offset: f64,
        y_size: f64,
        v_bottom: f64,
        v_top: f64,
    },
    /// `type1` runs from the (0,0) corner to the (1,1) corner; otherwise (1,0) to (0,1).
    Diagonal { type1: bool },
    TransparentWall,
    Edge {
        facing: VoxelFacing2D,
        y_offset: f64,
        flipped: bool,
    },
    Chasm { chasm_type: ChasmType },
    Door,
}

/// Fieldless tag of [`ArenaVoxelShape`], used to key per-type tables.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArenaVoxelType {
    None = 0,
    Wall = 1,
    Floor = 2,
    Ceiling = 3,
    Raised = 4,
    Diagonal = 5,
    TransparentWall = 6,
    Edge = 7,
    Chasm = 8,
    Door = 9,
}

pub const ARENA_VOXEL_TYPE_COUNT: usize = 10;

impl ArenaVoxelType {
    pub const ALL: [ArenaVoxelType; ARENA_VOXEL_TYPE_COUNT] = [
        ArenaVoxelType::None,
        ArenaVoxelType::Wall,
        ArenaVoxelType::Floor,
        ArenaVoxelType::Ceiling,
        ArenaVoxelType::Raised,
        ArenaVoxelType::Diagonal,
        ArenaVoxelType::TransparentWall,
        ArenaVoxelType::Edge,
        ArenaVoxelType::Chasm,
        ArenaVoxelType::Door,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn capabilities(self) -> VoxelCapabilities {
        CAPABILITIES[self.index()]
    }
}

/// Derived behavior flags for one voxel type.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct VoxelCapabilities {
    pub allows_back_faces: bool,
    pub enables_neighbor_geometry: bool,
    pub allows_adjacent_door_faces: bool,
    pub allows_internal_face_removal: bool,
    pub allows_adjacent_face_combining: bool,
    pub is_context_sensitive: bool,
    pub is_elevated_platform: bool,
}

const fn caps(
    allows_back_faces: bool,
    enables_neighbor_geometry: bool,
    allows_adjacent_door_faces: bool,
    allows_internal_face_removal: bool,
    allows_adjacent_face_combining: bool,
    is_context_sensitive: bool,
    is_elevated_platform: bool,
) -> VoxelCapabilities {
    VoxelCapabilities {
        allows_back_faces,
        enables_neighbor_geometry,
        allows_adjacent_door_faces,
        allows_internal_face_removal,
        allows_adjacent_face_combining,
        is_context_sensitive,
        is_elevated_platform,
    }
}

// Columns: back faces, neighbor geometry, adjacent door faces, internal face removal,
// face combining, context sensitive, elevated platform.
#[rustfmt::skip]
const CAPABILITIES: [VoxelCapabilities; ARENA_VOXEL_TYPE_COUNT] = [
    caps(false, false, true,  false, false, false, false), // None
    caps(false, true,  false, true,  true,  false, false), // Wall
    caps(false, true,  true,  true,  true,  false, false), // Floor
    caps(false, true,  true,  true,  true,  false, false), // Ceiling
    caps(false, true,  true,  true,  true,  false, true),  // Raised
    caps(true,  true,  true,  false, false, false, false), // Diagonal
    caps(false, true,  true,  false, false, false, false), // TransparentWall
    caps(true,  true,  true,  false, false, false, false), // Edge
    caps(true,  false, true,  false, true,  true,  false), // Chasm
    caps(false, true,  false, false, false, false, false), // Door
];

impl ArenaVoxelShape {
    #[inline]
    pub fn voxel_type(&self) -> ArenaVoxelType {
        match self {
            ArenaVoxelShape::None => ArenaVoxelType::None,
            ArenaVoxelShape::Wall => ArenaVoxelType::Wall,
            ArenaVoxelShape::Floor => ArenaVoxelType::Floor,
            ArenaVoxelShape::Ceiling => ArenaVoxelType::Ceiling,
            ArenaVoxelShape::Raised { .. } => ArenaVoxelType::Raised,
            ArenaVoxelShape::Diagonal { .. } => ArenaVoxelType::Diagonal,
            ArenaVoxelShape::TransparentWall => ArenaVoxelType::TransparentWall,
            ArenaVoxelShape::Edge { .. } => ArenaVoxelType::Edge,
            ArenaVoxelShape::Chasm { .. } => ArenaVoxelType::Chasm,
            ArenaVoxelShape::Door => ArenaVoxelType::Door,
        }
    }

    #[inline]
    pub fn capabilities(&self) -> VoxelCapabilities {
        self.voxel_type().capabilities()
    }

    /// Collision box `(width, height, depth, y_offset, y_rotation)` in unscaled voxel units.
    pub fn box_values(&self) -> (f64, f64, f64, f64, f64) {
        match *self {
            ArenaVoxelShape::Raised { y_offset, y_size, .. } => (1.0, y_size, 1.0, y_offset, 0.0),
            ArenaVoxelShape::Chasm { chasm_type } => {
                // Sits just under the chasm floor so the box never has zero height.
                let mut height = CHASM_BOX_THICKNESS;
                if !chasm_type.is_dry() {
                    height += 1.0 - crate::mesh_utils::CHASM_DEFAULT_HEIGHT;
                }
                (1.0, height, 1.0, -CHASM_BOX_THICKNESS, 0.0)
            }
            ArenaVoxelShape::Diagonal { type1 } => {
                let angle = core::f64::consts::FRAC_PI_4;
                let rotation = if type1 { -angle } else { angle };
                (
                    core::f64::consts::SQRT_2 - DIAGONAL_THICKNESS,
                    1.0,
                    DIAGONAL_THICKNESS,
                    0.0,
                    rotation,
                )
            }
            _ => (1.0, 1.0, 1.0, 0.0, 0.0),
        }
    }
}

const CHASM_BOX_THICKNESS: f64 = 0.10;
const DIAGONAL_THICKNESS: f64 = 0.050;
