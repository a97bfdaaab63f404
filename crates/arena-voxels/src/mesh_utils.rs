//! Mesh layout constants, scale policies and per-shape buffer sizes.

use serde::Deserialize;

use crate::voxel_type::ArenaVoxelType;

pub const POSITION_COMPONENTS_PER_VERTEX: usize = 3;
pub const NORMAL_COMPONENTS_PER_VERTEX: usize = 3;
pub const TEX_COORD_COMPONENTS_PER_VERTEX: usize = 2;
pub const INDICES_PER_TRIANGLE: usize = 3;
pub const INDICES_PER_QUAD: usize = 6;

pub const MAX_OPAQUE_INDEX_BUFFERS: usize = 3;
pub const MAX_ALPHA_TESTED_INDEX_BUFFERS: usize = 1;
pub const MAX_INDEX_BUFFERS: usize = MAX_OPAQUE_INDEX_BUFFERS + MAX_ALPHA_TESTED_INDEX_BUFFERS;

/// Largest vertex count of any shape (walls and raised platforms).
pub const MAX_VERTICES_PER_VOXEL: usize = 24;
pub const MAX_INDICES_PER_BUFFER: usize = 8 * INDICES_PER_TRIANGLE;

/// Inward bias keeping edge quads off the neighbor's faces.
pub const EDGE_EPSILON: f64 = 1.0e-5;

/// Water/lava surface height of wet chasms, relative to the voxel top.
pub const CHASM_DEFAULT_HEIGHT: f64 = 0.834;

/// Chasm walls: one index buffer per non-empty north/east/south/west combination.
pub const CHASM_WALL_COMBINATION_COUNT: usize = 15;

/// How a unit-space vertex Y is mapped into a voxel scaled by the ceiling height.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
pub enum VoxelShapeScaleType {
    /// Y is multiplied by the ceiling scale.
    #[default]
    ScaledFromMin,
    /// Y is taken as-is from the bottom of the voxel.
    UnscaledFromMin,
    /// Y keeps its unit distance below the top of the scaled voxel.
    UnscaledFromMax,
}

#[inline]
pub fn scaled_vertex_y(y: f64, scale_type: VoxelShapeScaleType, ceiling_scale: f64) -> f64 {
    match scale_type {
        VoxelShapeScaleType::ScaledFromMin => y * ceiling_scale,
        VoxelShapeScaleType::UnscaledFromMin => y,
        VoxelShapeScaleType::UnscaledFromMax => y + (ceiling_scale - 1.0),
    }
}

/// Maps the four chasm wall flags to `[0, CHASM_WALL_COMBINATION_COUNT)`. At least one
/// flag must be set.
#[inline]
pub fn chasm_wall_index(north: bool, east: bool, south: bool, west: bool) -> usize {
    let bits = (north as usize) | ((east as usize) << 1) | ((south as usize) << 2) | ((west as usize) << 3);
    debug_assert!(bits != 0, "chasm wall needs at least one face");
    bits - 1
}

/// Inverse of [`chasm_wall_index`].
#[inline]
pub fn chasm_wall_faces(index: usize) -> (bool, bool, bool, bool) {
    debug_assert!(index < CHASM_WALL_COMBINATION_COUNT);
    let bits = index + 1;
    (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0)
}

/// Renderer vertex count for a voxel type, taken from the writer tables.
pub const fn vertex_count(voxel_type: ArenaVoxelType) -> usize {
    use crate::writers as w;
    match voxel_type {
        ArenaVoxelType::None => 0,
        ArenaVoxelType::Wall => w::WALL_VERTEX_COUNT,
        ArenaVoxelType::Floor => w::FLOOR_VERTEX_COUNT,
        ArenaVoxelType::Ceiling => w::CEILING_VERTEX_COUNT,
        ArenaVoxelType::Raised => w::RAISED_VERTEX_COUNT,
        ArenaVoxelType::Diagonal => w::DIAGONAL_VERTEX_COUNT,
        ArenaVoxelType::TransparentWall => w::TRANSPARENT_WALL_VERTEX_COUNT,
        ArenaVoxelType::Edge => w::EDGE_VERTEX_COUNT,
        ArenaVoxelType::Chasm => w::CHASM_VERTEX_COUNT,
        ArenaVoxelType::Door => w::DOOR_VERTEX_COUNT,
    }
}

/// Index counts of the opaque buffers of a voxel type, in buffer order.
pub const fn opaque_index_counts(voxel_type: ArenaVoxelType) -> &'static [usize] {
    use crate::writers as w;
    match voxel_type {
        ArenaVoxelType::Wall => &[
            w::WALL_SIDE_INDEX_COUNT,
            w::WALL_BOTTOM_INDEX_COUNT,
            w::WALL_TOP_INDEX_COUNT,
        ],
        ArenaVoxelType::Floor => &[w::FLOOR_INDEX_COUNT],
        ArenaVoxelType::Ceiling => &[w::CEILING_INDEX_COUNT],
        ArenaVoxelType::Raised => &[w::RAISED_BOTTOM_INDEX_COUNT, w::RAISED_TOP_INDEX_COUNT],
        ArenaVoxelType::Diagonal => &[w::DIAGONAL_INDEX_COUNT],
        ArenaVoxelType::Chasm => &[w::CHASM_FLOOR_INDEX_COUNT],
        ArenaVoxelType::None
        | ArenaVoxelType::TransparentWall
        | ArenaVoxelType::Edge
        | ArenaVoxelType::Door => &[],
    }
}

/// Index count of the alpha-tested buffer of a voxel type, if it has one.
pub const fn alpha_tested_index_count(voxel_type: ArenaVoxelType) -> Option<usize> {
    use crate::writers as w;
    match voxel_type {
        ArenaVoxelType::Raised => Some(w::RAISED_SIDE_INDEX_COUNT),
        ArenaVoxelType::TransparentWall => Some(w::TRANSPARENT_WALL_INDEX_COUNT),
        ArenaVoxelType::Edge => Some(w::EDGE_INDEX_COUNT),
        ArenaVoxelType::Door => Some(w::DOOR_INDEX_COUNT),
        _ => None,
    }
}
