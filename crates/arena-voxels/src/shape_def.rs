use crate::mesh_def::VoxelMeshDefinition;
use crate::mesh_utils::{VoxelShapeScaleType, scaled_vertex_y};
use crate::voxel_type::{ArenaVoxelShape, ArenaVoxelType};

/// Only boxes exist so far; other collision shapes would be added here.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum VoxelShapeType {
    #[default]
    Box,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelBoxShapeDefinition {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub y_offset: f64,
    pub y_rotation: f64,
}

impl VoxelBoxShapeDefinition {
    pub fn new(width: f64, height: f64, depth: f64, y_offset: f64, y_rotation: f64) -> Self {
        debug_assert!(width > 0.0);
        debug_assert!(height > 0.0);
        debug_assert!(depth > 0.0);
        Self {
            width,
            height,
            depth,
            y_offset,
            y_rotation,
        }
    }
}

impl Default for VoxelBoxShapeDefinition {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 0.0, 0.0)
    }
}

/// Mesh plus collision box, scale policy and capability flags of one voxel configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelShapeDefinition {
    pub shape_type: VoxelShapeType,
    pub box_shape: VoxelBoxShapeDefinition,
    pub mesh: VoxelMeshDefinition,
    pub scale_type: VoxelShapeScaleType,
    pub ceiling_scale: f64,
    pub voxel_type: ArenaVoxelType,
}

impl VoxelShapeDefinition {
    pub fn init_box_from_classic(
        shape: &ArenaVoxelShape,
        scale_type: VoxelShapeScaleType,
        ceiling_scale: f64,
    ) -> Self {
        debug_assert!(ceiling_scale > 0.0);
        let (width, height, depth, y_offset, y_rotation) = shape.box_values();
        Self {
            shape_type: VoxelShapeType::Box,
            box_shape: VoxelBoxShapeDefinition::new(width, height, depth, y_offset, y_rotation),
            mesh: VoxelMeshDefinition::init_classic(shape),
            scale_type,
            ceiling_scale,
            voxel_type: shape.voxel_type(),
        }
    }

    /// Empty shape used for air and trigger voxels.
    pub fn air() -> Self {
        Self::init_box_from_classic(&ArenaVoxelShape::None, VoxelShapeScaleType::ScaledFromMin, 1.0)
    }

    /// Bottom and top of the collision box in world units above the voxel's base.
    pub fn box_world_y_range(&self) -> (f64, f64) {
        let bottom = self.box_shape.y_offset;
        let top = bottom + self.box_shape.height;
        (
            scaled_vertex_y(bottom, self.scale_type, self.ceiling_scale),
            scaled_vertex_y(top, self.scale_type, self.ceiling_scale),
        )
    }

    #[inline]
    pub fn allows_back_faces(&self) -> bool {
        self.voxel_type.capabilities().allows_back_faces
    }

    #[inline]
    pub fn allows_adjacent_door_faces(&self) -> bool {
        self.voxel_type.capabilities().allows_adjacent_door_faces
    }

    #[inline]
    pub fn allows_internal_face_removal(&self) -> bool {
        self.voxel_type.capabilities().allows_internal_face_removal
    }

    #[inline]
    pub fn allows_adjacent_face_combining(&self) -> bool {
        self.voxel_type.capabilities().allows_adjacent_face_combining
    }

    #[inline]
    pub fn enables_neighbor_geometry(&self) -> bool {
        self.voxel_type.capabilities().enables_neighbor_geometry
    }

    #[inline]
    pub fn is_context_sensitive(&self) -> bool {
        self.voxel_type.capabilities().is_context_sensitive
    }

    #[inline]
    pub fn is_elevated_platform(&self) -> bool {
        self.voxel_type.capabilities().is_elevated_platform
    }
}

impl Default for VoxelShapeDefinition {
    fn default() -> Self {
        Self::air()
    }
}
