//! Per-face placement and shading of animated doors.

use arena_geom::Vec3;
use arena_voxels::ArenaDoorType;
use arena_voxels::door::{
    BASE_ANGLES, FACE_COUNT, HINGE_OFFSETS, animated_scale_amount, animated_tex_coord_percent,
    swinging_rotation_radians,
};

use crate::draw_call::{FragmentShaderType, VertexShaderType};
use crate::transform::RenderTransform;

/// Transform of door face `face_index` for a door whose voxel min corner is at
/// `voxel_position`.
pub fn door_face_transform(
    door_type: ArenaDoorType,
    face_index: usize,
    voxel_position: Vec3,
    anim_percent: f64,
    ceiling_scale: f64,
) -> RenderTransform {
    assert!(face_index < FACE_COUNT, "door face {face_index} out of range");
    let base_angle = BASE_ANGLES[face_index];
    let translation = voxel_position + HINGE_OFFSETS[face_index];
    match door_type {
        ArenaDoorType::Swinging => RenderTransform {
            translation,
            rotation_y: swinging_rotation_radians(base_angle, anim_percent),
            ..RenderTransform::IDENTITY
        },
        ArenaDoorType::Sliding | ArenaDoorType::Splitting => RenderTransform {
            translation,
            rotation_y: base_angle,
            scale: Vec3::new(1.0, 1.0, animated_scale_amount(anim_percent)),
            ..RenderTransform::IDENTITY
        },
        ArenaDoorType::Raising => RenderTransform {
            translation,
            rotation_y: base_angle,
            scale: Vec3::new(1.0, animated_scale_amount(anim_percent), 1.0),
            pre_scale_translation: Vec3::new(0.0, -ceiling_scale, 0.0),
        },
    }
}

/// All four faces at once, indexed like [`arena_voxels::door::FACINGS`].
pub fn door_face_transforms(
    door_type: ArenaDoorType,
    voxel_position: Vec3,
    anim_percent: f64,
    ceiling_scale: f64,
) -> [RenderTransform; FACE_COUNT] {
    core::array::from_fn(|i| door_face_transform(door_type, i, voxel_position, anim_percent, ceiling_scale))
}

pub fn door_vertex_shader(door_type: ArenaDoorType) -> VertexShaderType {
    match door_type {
        ArenaDoorType::Raising => VertexShaderType::RaisingDoor,
        _ => VertexShaderType::Basic,
    }
}

pub fn door_fragment_shader(door_type: ArenaDoorType) -> FragmentShaderType {
    match door_type {
        ArenaDoorType::Swinging => FragmentShaderType::AlphaTested,
        ArenaDoorType::Sliding | ArenaDoorType::Splitting => FragmentShaderType::AlphaTestedWithVariableTexCoordUMin,
        ArenaDoorType::Raising => FragmentShaderType::AlphaTestedWithVariableTexCoordVMin,
    }
}

/// Texture coordinate start passed to the door shaders. Swinging doors never crop.
pub fn door_pixel_shader_param(door_type: ArenaDoorType, anim_percent: f64) -> f64 {
    match door_type {
        ArenaDoorType::Swinging => 0.0,
        _ => animated_tex_coord_percent(anim_percent),
    }
}
