//! Door face layout and animation curves.
//!
//! A door voxel draws the same X=0 quad once per side. Face `i` is rotated by
//! `BASE_ANGLES[i]` about +Y and then moved by `HINGE_OFFSETS[i]` so its outward normal
//! matches `FACINGS[i]`.

use core::f64::consts::{FRAC_PI_2, PI};

use arena_geom::Vec3;

use crate::facing::VoxelFacing2D;

pub const FACE_COUNT: usize = 4;

pub const FACINGS: [VoxelFacing2D; FACE_COUNT] = [
    VoxelFacing2D::NegativeX,
    VoxelFacing2D::PositiveX,
    VoxelFacing2D::NegativeZ,
    VoxelFacing2D::PositiveZ,
];

pub const BASE_ANGLES: [f64; FACE_COUNT] = [0.0, PI, -FRAC_PI_2, FRAC_PI_2];

pub const HINGE_OFFSETS: [Vec3; FACE_COUNT] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
];

/// Fraction of a sliding/raising door that stays visible when fully open.
pub const DOOR_MIN_VISIBLE: f64 = 0.10;

/// Keeps a fully open swinging door from lying exactly in the wall plane.
const SWING_EPSILON: f64 = 0.001;

#[inline]
pub fn face_index(facing: VoxelFacing2D) -> usize {
    match facing {
        VoxelFacing2D::NegativeX => 0,
        VoxelFacing2D::PositiveX => 1,
        VoxelFacing2D::NegativeZ => 2,
        VoxelFacing2D::PositiveZ => 3,
    }
}

#[inline]
pub fn swinging_rotation_radians(base_angle: f64, anim_percent: f64) -> f64 {
    base_angle - (FRAC_PI_2 - SWING_EPSILON) * anim_percent
}

/// Texture-space start of the visible part of a sliding/raising door.
#[inline]
pub fn animated_tex_coord_percent(anim_percent: f64) -> f64 {
    ((1.0 - DOOR_MIN_VISIBLE) * anim_percent).clamp(0.0, 1.0 - DOOR_MIN_VISIBLE)
}

#[inline]
pub fn animated_scale_amount(anim_percent: f64) -> f64 {
    1.0 - animated_tex_coord_percent(anim_percent)
}
