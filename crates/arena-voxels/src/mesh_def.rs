use crate::facing::VoxelFacing3D;
use crate::mesh_utils::{
    MAX_ALPHA_TESTED_INDEX_BUFFERS, MAX_OPAQUE_INDEX_BUFFERS, NORMAL_COMPONENTS_PER_VERTEX,
    POSITION_COMPONENTS_PER_VERTEX, TEX_COORD_COMPONENTS_PER_VERTEX, VoxelShapeScaleType,
    scaled_vertex_y, vertex_count,
};
use crate::voxel_type::ArenaVoxelShape;
use crate::writers as w;

const SIDE_FACINGS: [VoxelFacing3D; 4] = [
    VoxelFacing3D::NegativeX,
    VoxelFacing3D::PositiveX,
    VoxelFacing3D::NegativeZ,
    VoxelFacing3D::PositiveZ,
];

/// One triangle list of a mesh, drawn with a single texture and shader.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelMeshIndexBuffer {
    pub indices: Vec<u32>,
    /// Voxel faces this buffer draws; empty for geometry not on a voxel face.
    pub facings: Vec<VoxelFacing3D>,
    /// Slot in the voxel's texture definition, `None` for screen-space textures.
    pub texture_slot: Option<usize>,
    pub alpha_tested: bool,
    /// Whether the faces in `facings` are completely closed off by this buffer.
    pub full_coverage: bool,
}

impl VoxelMeshIndexBuffer {
    fn new(indices: &[u32], facings: &[VoxelFacing3D], texture_slot: Option<usize>) -> Self {
        Self {
            indices: indices.to_vec(),
            facings: facings.to_vec(),
            texture_slot,
            alpha_tested: false,
            full_coverage: !facings.is_empty(),
        }
    }

    fn alpha_tested(mut self) -> Self {
        self.alpha_tested = true;
        self.full_coverage = false;
        self
    }

    fn covering(mut self, full_coverage: bool) -> Self {
        self.full_coverage = full_coverage && !self.alpha_tested;
        self
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Renderer geometry shared by every voxel of one shape configuration.
///
/// Positions are stored in unit voxel space; the ceiling scale is applied when the
/// geometry is written out for a renderer (see [`Self::write_renderer_geometry_buffers`]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelMeshDefinition {
    pub positions: Vec<f64>,
    pub normals: Vec<f64>,
    pub tex_coords: Vec<f64>,
    /// Ordered by texture slot; at most three opaque and one alpha-tested buffer.
    pub index_buffers: Vec<VoxelMeshIndexBuffer>,
}

impl VoxelMeshDefinition {
    pub fn init_classic(shape: &ArenaVoxelShape) -> Self {
        let vertices = vertex_count(shape.voxel_type());
        let mut def = VoxelMeshDefinition {
            positions: vec![0.0; vertices * POSITION_COMPONENTS_PER_VERTEX],
            normals: vec![0.0; vertices * NORMAL_COMPONENTS_PER_VERTEX],
            tex_coords: vec![0.0; vertices * TEX_COORD_COMPONENTS_PER_VERTEX],
            index_buffers: Vec::new(),
        };
        let (p, n, t) = (&mut def.positions, &mut def.normals, &mut def.tex_coords);

        match *shape {
            ArenaVoxelShape::None => {}
            ArenaVoxelShape::Wall => {
                w::write_wall_geometry_buffers(p, n, t);
                def.index_buffers = vec![
                    VoxelMeshIndexBuffer::new(&w::WALL_SIDE_INDICES, &SIDE_FACINGS, Some(0)),
                    VoxelMeshIndexBuffer::new(&w::WALL_BOTTOM_INDICES, &[VoxelFacing3D::NegativeY], Some(1)),
                    VoxelMeshIndexBuffer::new(&w::WALL_TOP_INDICES, &[VoxelFacing3D::PositiveY], Some(2)),
                ];
            }
            ArenaVoxelShape::Floor => {
                w::write_floor_geometry_buffers(p, n, t);
                def.index_buffers = vec![VoxelMeshIndexBuffer::new(
                    &w::FLOOR_INDICES,
                    &[VoxelFacing3D::PositiveY],
                    Some(0),
                )];
            }
            ArenaVoxelShape::Ceiling => {
                w::write_ceiling_geometry_buffers(p, n, t);
                def.index_buffers = vec![VoxelMeshIndexBuffer::new(
                    &w::CEILING_INDICES,
                    &[VoxelFacing3D::NegativeY],
                    Some(0),
                )];
            }
            ArenaVoxelShape::Raised {
                y_offset,
                y_size,
                v_bottom,
                v_top,
            } => {
                w::write_raised_geometry_buffers(y_offset, y_size, v_bottom, v_top, p, n, t);
                def.index_buffers = vec![
                    VoxelMeshIndexBuffer::new(&w::RAISED_SIDE_INDICES, &SIDE_FACINGS, Some(0))
                        .alpha_tested(),
                    VoxelMeshIndexBuffer::new(&w::RAISED_BOTTOM_INDICES, &[VoxelFacing3D::NegativeY], Some(1))
                        .covering(y_offset <= 0.0),
                    VoxelMeshIndexBuffer::new(&w::RAISED_TOP_INDICES, &[VoxelFacing3D::PositiveY], Some(2))
                        .covering(y_offset + y_size >= 1.0),
                ];
            }
            ArenaVoxelShape::Diagonal { type1 } => {
                w::write_diagonal_geometry_buffers(type1, p, n, t);
                def.index_buffers = vec![VoxelMeshIndexBuffer::new(&w::DIAGONAL_INDICES, &[], Some(0))];
            }
            ArenaVoxelShape::TransparentWall => {
                w::write_transparent_wall_geometry_buffers(p, n, t);
                def.index_buffers = vec![
                    VoxelMeshIndexBuffer::new(&w::TRANSPARENT_WALL_INDICES, &SIDE_FACINGS, Some(0))
                        .alpha_tested(),
                ];
            }
            ArenaVoxelShape::Edge {
                facing,
                y_offset,
                flipped,
            } => {
                w::write_edge_geometry_buffers(facing, y_offset, flipped, p, n, t);
                def.index_buffers = vec![
                    VoxelMeshIndexBuffer::new(&w::EDGE_INDICES, &[facing.to_3d()], Some(0)).alpha_tested(),
                ];
            }
            ArenaVoxelShape::Chasm { .. } => {
                // Floor only; the walls depend on neighbors and are chosen per voxel.
                w::write_chasm_geometry_buffers(p, n, t);
                def.index_buffers = vec![
                    VoxelMeshIndexBuffer::new(&w::CHASM_FLOOR_INDICES, &[VoxelFacing3D::PositiveY], None)
                        .covering(false),
                ];
            }
            ArenaVoxelShape::Door => {
                w::write_door_geometry_buffers(p, n, t);
                def.index_buffers =
                    vec![VoxelMeshIndexBuffer::new(&w::DOOR_INDICES, &[], Some(0)).alpha_tested()];
            }
        }

        debug_assert!(def.opaque_buffer_count() <= MAX_OPAQUE_INDEX_BUFFERS);
        debug_assert!(def.alpha_tested_buffer_count() <= MAX_ALPHA_TESTED_INDEX_BUFFERS);
        def
    }

    /// Air has a shape (for trigger voxels) but no render mesh.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_COMPONENTS_PER_VERTEX
    }

    pub fn opaque_buffer_count(&self) -> usize {
        self.index_buffers.iter().filter(|b| !b.alpha_tested).count()
    }

    pub fn alpha_tested_buffer_count(&self) -> usize {
        self.index_buffers.iter().filter(|b| b.alpha_tested).count()
    }

    pub fn find_index_buffer_index_with_facing(&self, facing: VoxelFacing3D) -> Option<usize> {
        self.index_buffers
            .iter()
            .position(|b| b.facings.contains(&facing))
    }

    pub fn find_texture_slot_index_with_facing(&self, facing: VoxelFacing3D) -> Option<usize> {
        self.find_index_buffer_index_with_facing(facing)
            .and_then(|i| self.index_buffers[i].texture_slot)
    }

    /// True when the given voxel face is completely closed by opaque geometry, so the
    /// neighbor's face against it can be culled.
    pub fn has_full_coverage_of_facing(&self, facing: VoxelFacing3D) -> bool {
        self.find_index_buffer_index_with_facing(facing)
            .is_some_and(|i| self.index_buffers[i].full_coverage)
    }

    /// Writes renderer-ready vertex data with Y mapped through `scale_type`.
    pub fn write_renderer_geometry_buffers(
        &self,
        scale_type: VoxelShapeScaleType,
        ceiling_scale: f64,
        out_positions: &mut [f64],
        out_normals: &mut [f64],
        out_tex_coords: &mut [f64],
    ) {
        assert!(out_positions.len() >= self.positions.len());
        assert!(out_normals.len() >= self.normals.len());
        assert!(out_tex_coords.len() >= self.tex_coords.len());

        for (dst, src) in out_positions
            .chunks_exact_mut(POSITION_COMPONENTS_PER_VERTEX)
            .zip(self.positions.chunks_exact(POSITION_COMPONENTS_PER_VERTEX))
        {
            dst[0] = src[0];
            dst[1] = scaled_vertex_y(src[1], scale_type, ceiling_scale);
            dst[2] = src[2];
        }
        out_normals[..self.normals.len()].copy_from_slice(&self.normals);
        out_tex_coords[..self.tex_coords.len()].copy_from_slice(&self.tex_coords);
    }
}
