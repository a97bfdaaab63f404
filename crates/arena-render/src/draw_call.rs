use crate::ids::{IndexBufferId, ObjectTextureId, VertexAttributeBufferId, VertexPositionBufferId};
use crate::transform::RenderTransform;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VertexShaderType {
    #[default]
    Basic,
    /// Applies the pre-scale translation before scaling.
    RaisingDoor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FragmentShaderType {
    /// Most walls, floors and ceilings.
    #[default]
    Opaque,
    /// Dry chasm walls.
    OpaqueWithAlphaTestLayer,
    /// Water and lava chasm floors.
    OpaqueScreenSpaceAnimation,
    /// Water and lava chasm walls.
    OpaqueScreenSpaceAnimationWithAlphaTestLayer,
    AlphaTested,
    /// Sliding and splitting doors.
    AlphaTestedWithVariableTexCoordUMin,
    /// Raising doors.
    AlphaTestedWithVariableTexCoordVMin,
}

impl FragmentShaderType {
    pub fn is_opaque(self) -> bool {
        matches!(
            self,
            FragmentShaderType::Opaque
                | FragmentShaderType::OpaqueWithAlphaTestLayer
                | FragmentShaderType::OpaqueScreenSpaceAnimation
                | FragmentShaderType::OpaqueScreenSpaceAnimationWithAlphaTestLayer
        )
    }

    /// Whether the shader samples the second texture slot.
    pub fn uses_second_texture(self) -> bool {
        matches!(
            self,
            FragmentShaderType::OpaqueWithAlphaTestLayer
                | FragmentShaderType::OpaqueScreenSpaceAnimationWithAlphaTestLayer
        )
    }

    pub fn uses_tex_coord_param(self) -> bool {
        matches!(
            self,
            FragmentShaderType::AlphaTestedWithVariableTexCoordUMin
                | FragmentShaderType::AlphaTestedWithVariableTexCoordVMin
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderLightingType {
    /// One light level for the whole mesh (`light_percent`).
    PerMesh,
    #[default]
    PerPixel,
}

/// Everything the backend needs to draw one mesh instance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderDrawCall {
    pub transform: RenderTransform,
    pub position_buffer_id: VertexPositionBufferId,
    pub normal_buffer_id: VertexAttributeBufferId,
    pub tex_coord_buffer_id: VertexAttributeBufferId,
    pub index_buffer_id: IndexBufferId,
    pub texture_ids: [Option<ObjectTextureId>; 2],
    pub vertex_shader_type: VertexShaderType,
    pub fragment_shader_type: FragmentShaderType,
    /// Shader-specific value, e.g. the visible texture coordinate start of a sliding door.
    pub pixel_shader_param0: f64,
    pub lighting_type: RenderLightingType,
    pub light_percent: f64,
    pub enable_depth_read: bool,
    pub enable_depth_write: bool,
}
