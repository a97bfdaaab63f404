use std::sync::Arc;

use hashbrown::HashMap;

use crate::facing::VoxelFacing2D;
use crate::mesh_utils::VoxelShapeScaleType;
use crate::shape_def::VoxelShapeDefinition;
use crate::voxel_type::{ArenaVoxelShape, ArenaVoxelType, ChasmType};

/// Hashable identity of a shape configuration (float parameters compared bitwise).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct ShapeKey {
    voxel_type: ArenaVoxelType,
    params: [u64; 4],
    facing: Option<VoxelFacing2D>,
    chasm_type: Option<ChasmType>,
    scale_type: VoxelShapeScaleType,
    ceiling_scale: u64,
}

impl ShapeKey {
    fn new(shape: &ArenaVoxelShape, scale_type: VoxelShapeScaleType, ceiling_scale: f64) -> Self {
        let mut key = ShapeKey {
            voxel_type: shape.voxel_type(),
            params: [0; 4],
            facing: None,
            chasm_type: None,
            scale_type,
            ceiling_scale: ceiling_scale.to_bits(),
        };
        match *shape {
            ArenaVoxelShape::Raised {
                y_offset,
                y_size,
                v_bottom,
                v_top,
            } => {
                key.params = [
                    y_offset.to_bits(),
                    y_size.to_bits(),
                    v_bottom.to_bits(),
                    v_top.to_bits(),
                ];
            }
            ArenaVoxelShape::Diagonal { type1 } => key.params[0] = type1 as u64,
            ArenaVoxelShape::Edge {
                facing,
                y_offset,
                flipped,
            } => {
                key.facing = Some(facing);
                key.params = [y_offset.to_bits(), flipped as u64, 0, 0];
            }
            ArenaVoxelShape::Chasm { chasm_type } => key.chasm_type = Some(chasm_type),
            _ => {}
        }
        key
    }
}

/// Builds each distinct shape configuration once and hands out shared references.
pub struct VoxelShapeLibrary {
    shapes: HashMap<ShapeKey, Arc<VoxelShapeDefinition>>,
    air: Arc<VoxelShapeDefinition>,
}

impl VoxelShapeLibrary {
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            air: Arc::new(VoxelShapeDefinition::air()),
        }
    }

    pub fn air(&self) -> Arc<VoxelShapeDefinition> {
        Arc::clone(&self.air)
    }

    pub fn get_or_create(
        &mut self,
        shape: &ArenaVoxelShape,
        scale_type: VoxelShapeScaleType,
        ceiling_scale: f64,
    ) -> Arc<VoxelShapeDefinition> {
        let key = ShapeKey::new(shape, scale_type, ceiling_scale);
        let entry = self.shapes.entry(key).or_insert_with(|| {
            log::debug!(target: "events", "shape_def_created type={:?} scale={:?}", key.voxel_type, scale_type);
            Arc::new(VoxelShapeDefinition::init_box_from_classic(
                shape,
                scale_type,
                ceiling_scale,
            ))
        });
        Arc::clone(entry)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Drops every cached shape; outstanding `Arc`s stay valid.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl Default for VoxelShapeLibrary {
    fn default() -> Self {
        Self::new()
    }
}
