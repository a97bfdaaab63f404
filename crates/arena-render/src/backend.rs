use core::fmt;

use arena_geom::RenderCamera;
use arena_voxels::TextureAsset;
use thiserror::Error;

use crate::draw_call::RenderDrawCall;
use crate::ids::{IndexBufferId, ObjectTextureId, VertexAttributeBufferId, VertexPositionBufferId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    VertexPositions,
    VertexAttributes,
    Indices,
    Texture,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::VertexPositions => "vertex position",
            ResourceKind::VertexAttributes => "vertex attribute",
            ResourceKind::Indices => "index",
            ResourceKind::Texture => "texture",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("couldn't allocate {kind} buffer of {count} elements")]
    BufferAllocation { kind: ResourceKind, count: usize },
    #[error("no live {kind} resource with id {id}")]
    InvalidId { kind: ResourceKind, id: u32 },
    #[error("{kind} buffer holds {expected} values but got {actual}")]
    SizeMismatch {
        kind: ResourceKind,
        expected: usize,
        actual: usize,
    },
}

/// Per-frame values shared by every draw call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderFrameSettings {
    /// Position in the chasm floor animation, `[0, 1)`.
    pub chasm_anim_percent: f64,
    pub ambient_percent: f64,
}

/// Resource allocation and frame submission as seen by the voxel scene.
///
/// Creation calls return an error when the backend runs out of room; callers log it and
/// skip the affected geometry.
pub trait RenderBackend {
    fn create_vertex_position_buffer(
        &mut self,
        vertex_count: usize,
        components_per_vertex: usize,
    ) -> Result<VertexPositionBufferId, RenderError>;
    fn create_vertex_attribute_buffer(
        &mut self,
        vertex_count: usize,
        components_per_vertex: usize,
    ) -> Result<VertexAttributeBufferId, RenderError>;
    fn create_index_buffer(&mut self, index_count: usize) -> Result<IndexBufferId, RenderError>;

    fn populate_vertex_position_buffer(
        &mut self,
        id: VertexPositionBufferId,
        positions: &[f64],
    ) -> Result<(), RenderError>;
    fn populate_vertex_attribute_buffer(
        &mut self,
        id: VertexAttributeBufferId,
        attributes: &[f64],
    ) -> Result<(), RenderError>;
    fn populate_index_buffer(&mut self, id: IndexBufferId, indices: &[u32]) -> Result<(), RenderError>;

    fn free_vertex_position_buffer(&mut self, id: VertexPositionBufferId);
    fn free_vertex_attribute_buffer(&mut self, id: VertexAttributeBufferId);
    fn free_index_buffer(&mut self, id: IndexBufferId);

    fn create_object_texture(&mut self, asset: &TextureAsset) -> Result<ObjectTextureId, RenderError>;
    /// 1x1 texture holding one palette index (dry chasm floors).
    fn create_solid_color_texture(&mut self, palette_index: u8) -> Result<ObjectTextureId, RenderError>;
    /// All frames stacked vertically in one texture (animated chasm floors).
    fn create_texture_sheet(&mut self, frames: &[TextureAsset]) -> Result<ObjectTextureId, RenderError>;
    fn free_object_texture(&mut self, id: ObjectTextureId);

    fn submit_frame(
        &mut self,
        camera: &RenderCamera,
        settings: &RenderFrameSettings,
        draw_calls: &[RenderDrawCall],
    ) -> Result<(), RenderError>;
}
