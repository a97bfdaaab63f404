use arena_voxels::VoxelShapeDefinition;
use arena_voxels::mesh_utils::{
    MAX_INDEX_BUFFERS, NORMAL_COMPONENTS_PER_VERTEX, POSITION_COMPONENTS_PER_VERTEX,
    TEX_COORD_COMPONENTS_PER_VERTEX,
};

use crate::backend::{RenderBackend, RenderError};
use crate::ids::{IndexBufferId, VertexAttributeBufferId, VertexPositionBufferId};

pub type RenderVoxelMeshInstId = u16;

/// Backend buffers of one shape definition inside one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderVoxelMeshInstance {
    pub position_buffer_id: Option<VertexPositionBufferId>,
    pub normal_buffer_id: Option<VertexAttributeBufferId>,
    pub tex_coord_buffer_id: Option<VertexAttributeBufferId>,
    /// Parallel to the mesh definition's index buffers.
    pub index_buffer_ids: Vec<IndexBufferId>,
}

impl RenderVoxelMeshInstance {
    /// Creates and fills the buffers for `shape_def`'s mesh. On failure everything created
    /// so far is freed again.
    pub fn load(
        shape_def: &VoxelShapeDefinition,
        ceiling_scale: f64,
        backend: &mut dyn RenderBackend,
    ) -> Result<Self, RenderError> {
        let mut inst = RenderVoxelMeshInstance::default();
        if let Err(err) = inst.try_load(shape_def, ceiling_scale, backend) {
            inst.free_buffers(backend);
            return Err(err);
        }
        Ok(inst)
    }

    fn try_load(
        &mut self,
        shape_def: &VoxelShapeDefinition,
        ceiling_scale: f64,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        let mesh = &shape_def.mesh;
        debug_assert!(!mesh.is_empty(), "air has no render mesh");
        debug_assert!(mesh.index_buffers.len() <= MAX_INDEX_BUFFERS);
        let vertex_count = mesh.vertex_count();

        let position_id = backend.create_vertex_position_buffer(vertex_count, POSITION_COMPONENTS_PER_VERTEX)?;
        self.position_buffer_id = Some(position_id);
        let normal_id = backend.create_vertex_attribute_buffer(vertex_count, NORMAL_COMPONENTS_PER_VERTEX)?;
        self.normal_buffer_id = Some(normal_id);
        let tex_coord_id = backend.create_vertex_attribute_buffer(vertex_count, TEX_COORD_COMPONENTS_PER_VERTEX)?;
        self.tex_coord_buffer_id = Some(tex_coord_id);

        let mut positions = vec![0.0; vertex_count * POSITION_COMPONENTS_PER_VERTEX];
        let mut normals = vec![0.0; vertex_count * NORMAL_COMPONENTS_PER_VERTEX];
        let mut tex_coords = vec![0.0; vertex_count * TEX_COORD_COMPONENTS_PER_VERTEX];
        mesh.write_renderer_geometry_buffers(
            shape_def.scale_type,
            ceiling_scale,
            &mut positions,
            &mut normals,
            &mut tex_coords,
        );
        backend.populate_vertex_position_buffer(position_id, &positions)?;
        backend.populate_vertex_attribute_buffer(normal_id, &normals)?;
        backend.populate_vertex_attribute_buffer(tex_coord_id, &tex_coords)?;

        for buffer in &mesh.index_buffers {
            let id = backend.create_index_buffer(buffer.indices.len())?;
            self.index_buffer_ids.push(id);
            backend.populate_index_buffer(id, &buffer.indices)?;
        }
        Ok(())
    }

    /// All vertex buffers exist.
    pub fn is_loaded(&self) -> bool {
        self.position_buffer_id.is_some() && self.normal_buffer_id.is_some() && self.tex_coord_buffer_id.is_some()
    }

    pub fn free_buffers(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(id) = self.position_buffer_id.take() {
            backend.free_vertex_position_buffer(id);
        }
        if let Some(id) = self.normal_buffer_id.take() {
            backend.free_vertex_attribute_buffer(id);
        }
        if let Some(id) = self.tex_coord_buffer_id.take() {
            backend.free_vertex_attribute_buffer(id);
        }
        for id in self.index_buffer_ids.drain(..) {
            backend.free_index_buffer(id);
        }
    }
}
