use arena_geom::RenderCamera;
use arena_voxels::TextureAsset;
use hashbrown::HashMap;

use crate::backend::{RenderBackend, RenderError, RenderFrameSettings, ResourceKind};
use crate::draw_call::RenderDrawCall;
use crate::ids::{IndexBufferId, ObjectTextureId, VertexAttributeBufferId, VertexPositionBufferId};

#[derive(Clone, Debug)]
struct FloatBuffer {
    components: usize,
    data: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadlessTexture {
    Asset(TextureAsset),
    SolidColor(u8),
    Sheet(Vec<TextureAsset>),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeadlessFrameStats {
    pub draw_call_count: usize,
    pub opaque_draw_call_count: usize,
    pub triangle_count: usize,
}

/// Backend that keeps buffers in memory and validates submitted frames instead of
/// rasterizing them. Used by the demo binary and the tests.
#[derive(Debug)]
pub struct HeadlessRenderBackend {
    next_id: u32,
    positions: HashMap<u32, FloatBuffer>,
    attributes: HashMap<u32, FloatBuffer>,
    indices: HashMap<u32, Vec<u32>>,
    textures: HashMap<u32, HeadlessTexture>,
    buffer_budget: Option<usize>,
    frames_submitted: u64,
    last_frame: HeadlessFrameStats,
}

impl Default for HeadlessRenderBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessRenderBackend {
    pub fn new() -> Self {
        Self {
            // Zero stays unused so a default-constructed id never resolves.
            next_id: 1,
            positions: HashMap::new(),
            attributes: HashMap::new(),
            indices: HashMap::new(),
            textures: HashMap::new(),
            buffer_budget: None,
            frames_submitted: 0,
            last_frame: HeadlessFrameStats::default(),
        }
    }

    /// Fails buffer creation once `budget` geometry buffers are alive.
    pub fn with_buffer_budget(budget: usize) -> Self {
        Self {
            buffer_budget: Some(budget),
            ..Self::new()
        }
    }

    pub fn live_buffer_count(&self) -> usize {
        self.positions.len() + self.attributes.len() + self.indices.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn texture(&self, id: ObjectTextureId) -> Option<&HeadlessTexture> {
        self.textures.get(&id.0)
    }

    pub fn position_buffer(&self, id: VertexPositionBufferId) -> Option<&[f64]> {
        self.positions.get(&id.0).map(|b| b.data.as_slice())
    }

    pub fn index_buffer(&self, id: IndexBufferId) -> Option<&[u32]> {
        self.indices.get(&id.0).map(|b| b.as_slice())
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    pub fn last_frame_stats(&self) -> HeadlessFrameStats {
        self.last_frame
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_budget(&self, kind: ResourceKind, count: usize) -> Result<(), RenderError> {
        let over_budget = self.buffer_budget.is_some_and(|b| self.live_buffer_count() >= b);
        if count == 0 || over_budget {
            return Err(RenderError::BufferAllocation { kind, count });
        }
        Ok(())
    }

    fn check_draw_call(&self, draw_call: &RenderDrawCall) -> Result<usize, RenderError> {
        let invalid = |kind, id: u32| RenderError::InvalidId { kind, id };
        if !self.positions.contains_key(&draw_call.position_buffer_id.0) {
            return Err(invalid(ResourceKind::VertexPositions, draw_call.position_buffer_id.0));
        }
        for id in [draw_call.normal_buffer_id, draw_call.tex_coord_buffer_id] {
            if !self.attributes.contains_key(&id.0) {
                return Err(invalid(ResourceKind::VertexAttributes, id.0));
            }
        }
        for id in draw_call.texture_ids.iter().flatten() {
            if !self.textures.contains_key(&id.0) {
                return Err(invalid(ResourceKind::Texture, id.0));
            }
        }
        let indices = self
            .indices
            .get(&draw_call.index_buffer_id.0)
            .ok_or_else(|| invalid(ResourceKind::Indices, draw_call.index_buffer_id.0))?;
        Ok(indices.len() / 3)
    }
}

fn populate_floats(
    buffers: &mut HashMap<u32, FloatBuffer>,
    kind: ResourceKind,
    id: u32,
    values: &[f64],
) -> Result<(), RenderError> {
    let buffer = buffers.get_mut(&id).ok_or(RenderError::InvalidId { kind, id })?;
    if values.len() != buffer.data.len() {
        return Err(RenderError::SizeMismatch {
            kind,
            expected: buffer.data.len(),
            actual: values.len(),
        });
    }
    debug_assert_eq!(values.len() % buffer.components, 0);
    buffer.data.copy_from_slice(values);
    Ok(())
}

impl RenderBackend for HeadlessRenderBackend {
    fn create_vertex_position_buffer(
        &mut self,
        vertex_count: usize,
        components_per_vertex: usize,
    ) -> Result<VertexPositionBufferId, RenderError> {
        self.check_budget(ResourceKind::VertexPositions, vertex_count)?;
        let id = self.next();
        self.positions.insert(
            id,
            FloatBuffer {
                components: components_per_vertex,
                data: vec![0.0; vertex_count * components_per_vertex],
            },
        );
        Ok(VertexPositionBufferId(id))
    }

    fn create_vertex_attribute_buffer(
        &mut self,
        vertex_count: usize,
        components_per_vertex: usize,
    ) -> Result<VertexAttributeBufferId, RenderError> {
        self.check_budget(ResourceKind::VertexAttributes, vertex_count)?;
        let id = self.next();
        self.attributes.insert(
            id,
            FloatBuffer {
                components: components_per_vertex,
                data: vec![0.0; vertex_count * components_per_vertex],
            },
        );
        Ok(VertexAttributeBufferId(id))
    }

    fn create_index_buffer(&mut self, index_count: usize) -> Result<IndexBufferId, RenderError> {
        self.check_budget(ResourceKind::Indices, index_count)?;
        let id = self.next();
        self.indices.insert(id, vec![0; index_count]);
        Ok(IndexBufferId(id))
    }

    fn populate_vertex_position_buffer(
        &mut self,
        id: VertexPositionBufferId,
        positions: &[f64],
    ) -> Result<(), RenderError> {
        populate_floats(&mut self.positions, ResourceKind::VertexPositions, id.0, positions)
    }

    fn populate_vertex_attribute_buffer(
        &mut self,
        id: VertexAttributeBufferId,
        attributes: &[f64],
    ) -> Result<(), RenderError> {
        populate_floats(&mut self.attributes, ResourceKind::VertexAttributes, id.0, attributes)
    }

    fn populate_index_buffer(&mut self, id: IndexBufferId, indices: &[u32]) -> Result<(), RenderError> {
        let kind = ResourceKind::Indices;
        let buffer = self
            .indices
            .get_mut(&id.0)
            .ok_or(RenderError::InvalidId { kind, id: id.0 })?;
        if buffer.len() != indices.len() {
            return Err(RenderError::SizeMismatch {
                kind,
                expected: buffer.len(),
                actual: indices.len(),
            });
        }
        buffer.copy_from_slice(indices);
        Ok(())
    }

    fn free_vertex_position_buffer(&mut self, id: VertexPositionBufferId) {
        if self.positions.remove(&id.0).is_none() {
            log::warn!("freeing unknown vertex position buffer {id}");
        }
    }

    fn free_vertex_attribute_buffer(&mut self, id: VertexAttributeBufferId) {
        if self.attributes.remove(&id.0).is_none() {
            log::warn!("freeing unknown vertex attribute buffer {id}");
        }
    }

    fn free_index_buffer(&mut self, id: IndexBufferId) {
        if self.indices.remove(&id.0).is_none() {
            log::warn!("freeing unknown index buffer {id}");
        }
    }

    fn create_object_texture(&mut self, asset: &TextureAsset) -> Result<ObjectTextureId, RenderError> {
        let id = self.next();
        self.textures.insert(id, HeadlessTexture::Asset(asset.clone()));
        Ok(ObjectTextureId(id))
    }

    fn create_solid_color_texture(&mut self, palette_index: u8) -> Result<ObjectTextureId, RenderError> {
        let id = self.next();
        self.textures.insert(id, HeadlessTexture::SolidColor(palette_index));
        Ok(ObjectTextureId(id))
    }

    fn create_texture_sheet(&mut self, frames: &[TextureAsset]) -> Result<ObjectTextureId, RenderError> {
        if frames.is_empty() {
            return Err(RenderError::BufferAllocation {
                kind: ResourceKind::Texture,
                count: 0,
            });
        }
        let id = self.next();
        self.textures.insert(id, HeadlessTexture::Sheet(frames.to_vec()));
        Ok(ObjectTextureId(id))
    }

    fn free_object_texture(&mut self, id: ObjectTextureId) {
        if self.textures.remove(&id.0).is_none() {
            log::warn!("freeing unknown texture {id}");
        }
    }

    fn submit_frame(
        &mut self,
        _camera: &RenderCamera,
        _settings: &RenderFrameSettings,
        draw_calls: &[RenderDrawCall],
    ) -> Result<(), RenderError> {
        let mut stats = HeadlessFrameStats::default();
        for draw_call in draw_calls {
            stats.triangle_count += self.check_draw_call(draw_call)?;
            stats.draw_call_count += 1;
            if draw_call.fragment_shader_type.is_opaque() {
                stats.opaque_draw_call_count += 1;
            }
        }
        self.frames_submitted += 1;
        self.last_frame = stats;
        log::debug!(
            target: "perf",
            "headless_frame n={} draw_calls={} opaque={} triangles={}",
            self.frames_submitted,
            stats.draw_call_count,
            stats.opaque_draw_call_count,
            stats.triangle_count
        );
        Ok(())
    }
}
