//! Geometry and index writers for every classic voxel shape.
//!
//! All writers fill caller-provided slices and never allocate. Positions are in unit
//! voxel space (`[0,1]` on every axis before ceiling scaling). Faces that share a corner
//! still get their own vertices so each face can carry its own texture coordinates.
//!
//! Triangles wind counter-clockwise when seen from the side their normal points to.

use crate::facing::VoxelFacing2D;
use crate::mesh_utils::{
    EDGE_EPSILON, NORMAL_COMPONENTS_PER_VERTEX, POSITION_COMPONENTS_PER_VERTEX,
    TEX_COORD_COMPONENTS_PER_VERTEX,
};

const H: f64 = core::f64::consts::FRAC_1_SQRT_2;

#[inline]
fn write_components(out: &mut [f64], src: &[f64]) {
    assert!(out.len() >= src.len(), "output buffer too small: {} < {}", out.len(), src.len());
    out[..src.len()].copy_from_slice(src);
}

#[inline]
fn write_indices(out: &mut [u32], src: &[u32]) {
    assert!(out.len() >= src.len(), "index buffer too small: {} < {}", out.len(), src.len());
    out[..src.len()].copy_from_slice(src);
}

/// Two triangles `a,b,c` and `c,d,a` for the quad starting at vertex `base`.
const fn quad(base: u32) -> [u32; 6] {
    [base, base + 1, base + 2, base + 2, base + 3, base]
}

// ---------------------------------------------------------------- wall

pub const WALL_VERTEX_COUNT: usize = 24;

#[rustfmt::skip]
const WALL_POSITIONS: [f64; WALL_VERTEX_COUNT * POSITION_COMPONENTS_PER_VERTEX] = [
    // X=0
    0.0, 1.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 1.0,  0.0, 1.0, 1.0,
    // X=1
    1.0, 1.0, 1.0,  1.0, 0.0, 1.0,  1.0, 0.0, 0.0,  1.0, 1.0, 0.0,
    // Y=0
    0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  1.0, 0.0, 1.0,  0.0, 0.0, 1.0,
    // Y=1
    0.0, 1.0, 1.0,  1.0, 1.0, 1.0,  1.0, 1.0, 0.0,  0.0, 1.0, 0.0,
    // Z=0
    1.0, 1.0, 0.0,  1.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 1.0, 0.0,
    // Z=1
    0.0, 1.0, 1.0,  0.0, 0.0, 1.0,  1.0, 0.0, 1.0,  1.0, 1.0, 1.0,
];

#[rustfmt::skip]
const BOX_NORMALS: [f64; WALL_VERTEX_COUNT * NORMAL_COMPONENTS_PER_VERTEX] = [
    -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,
     1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,
     0.0, -1.0, 0.0,  0.0, -1.0, 0.0,  0.0, -1.0, 0.0,  0.0, -1.0, 0.0,
     0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,
     0.0, 0.0, -1.0,  0.0, 0.0, -1.0,  0.0, 0.0, -1.0,  0.0, 0.0, -1.0,
     0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,
];

#[rustfmt::skip]
const QUAD_TEX_COORDS: [f64; 4 * TEX_COORD_COMPONENTS_PER_VERTEX] = [
    0.0, 0.0,  0.0, 1.0,  1.0, 1.0,  1.0, 0.0,
];

#[rustfmt::skip]
const QUAD_TEX_COORDS_MIRRORED: [f64; 4 * TEX_COORD_COMPONENTS_PER_VERTEX] = [
    1.0, 0.0,  1.0, 1.0,  0.0, 1.0,  0.0, 0.0,
];

pub const WALL_SIDE_INDICES: [u32; 24] = concat4(quad(0), quad(4), quad(16), quad(20));
pub const WALL_BOTTOM_INDICES: [u32; 6] = quad(8);
pub const WALL_TOP_INDICES: [u32; 6] = quad(12);
pub const WALL_SIDE_INDEX_COUNT: usize = WALL_SIDE_INDICES.len();
pub const WALL_BOTTOM_INDEX_COUNT: usize = WALL_BOTTOM_INDICES.len();
pub const WALL_TOP_INDEX_COUNT: usize = WALL_TOP_INDICES.len();

const fn concat4(a: [u32; 6], b: [u32; 6], c: [u32; 6], d: [u32; 6]) -> [u32; 24] {
    let mut out = [0u32; 24];
    let mut i = 0;
    while i < 6 {
        out[i] = a[i];
        out[6 + i] = b[i];
        out[12 + i] = c[i];
        out[18 + i] = d[i];
        i += 1;
    }
    out
}

const fn concat2(a: [u32; 6], b: [u32; 6]) -> [u32; 12] {
    let mut out = [0u32; 12];
    let mut i = 0;
    while i < 6 {
        out[i] = a[i];
        out[6 + i] = b[i];
        i += 1;
    }
    out
}

pub fn write_wall_geometry_buffers(
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    write_components(out_positions, &WALL_POSITIONS);
    write_components(out_normals, &BOX_NORMALS);
    for face in 0..6 {
        let start = face * QUAD_TEX_COORDS.len();
        write_components(&mut out_tex_coords[start..], &QUAD_TEX_COORDS);
    }
}

pub fn write_wall_index_buffers(out_sides: &mut [u32], out_bottom: &mut [u32], out_top: &mut [u32]) {
    write_indices(out_sides, &WALL_SIDE_INDICES);
    write_indices(out_bottom, &WALL_BOTTOM_INDICES);
    write_indices(out_top, &WALL_TOP_INDICES);
}

// ---------------------------------------------------------------- floor / ceiling

pub const FLOOR_VERTEX_COUNT: usize = 4;
pub const CEILING_VERTEX_COUNT: usize = 4;

#[rustfmt::skip]
const FLOOR_POSITIONS: [f64; FLOOR_VERTEX_COUNT * POSITION_COMPONENTS_PER_VERTEX] = [
    0.0, 1.0, 1.0,  1.0, 1.0, 1.0,  1.0, 1.0, 0.0,  0.0, 1.0, 0.0,
];
#[rustfmt::skip]
const FLOOR_NORMALS: [f64; FLOOR_VERTEX_COUNT * NORMAL_COMPONENTS_PER_VERTEX] = [
    0.0, 1.0, 0.0,  0.0, 1.0, 0.0,  0.0, 1.0, 0.0,  0.0, 1.0, 0.0,
];
#[rustfmt::skip]
const FLOOR_TEX_COORDS: [f64; FLOOR_VERTEX_COUNT * TEX_COORD_COMPONENTS_PER_VERTEX] = [
    0.0, 1.0,  1.0, 1.0,  1.0, 0.0,  0.0, 0.0,
];
pub const FLOOR_INDICES: [u32; 6] = quad(0);
pub const FLOOR_INDEX_COUNT: usize = FLOOR_INDICES.len();

#[rustfmt::skip]
const CEILING_POSITIONS: [f64; CEILING_VERTEX_COUNT * POSITION_COMPONENTS_PER_VERTEX] = [
    0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  1.0, 0.0, 1.0,  0.0, 0.0, 1.0,
];
#[rustfmt::skip]
const CEILING_NORMALS: [f64; CEILING_VERTEX_COUNT * NORMAL_COMPONENTS_PER_VERTEX] = [
    0.0, -1.0, 0.0,  0.0, -1.0, 0.0,  0.0, -1.0, 0.0,  0.0, -1.0, 0.0,
];
pub const CEILING_INDICES: [u32; 6] = quad(0);
pub const CEILING_INDEX_COUNT: usize = CEILING_INDICES.len();

pub fn write_floor_geometry_buffers(
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    write_components(out_positions, &FLOOR_POSITIONS);
    write_components(out_normals, &FLOOR_NORMALS);
    write_components(out_tex_coords, &FLOOR_TEX_COORDS);
}

pub fn write_floor_index_buffers(out_indices: &mut [u32]) {
    write_indices(out_indices, &FLOOR_INDICES);
}

pub fn write_ceiling_geometry_buffers(
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    write_components(out_positions, &CEILING_POSITIONS);
    write_components(out_normals, &CEILING_NORMALS);
    write_components(out_tex_coords, &QUAD_TEX_COORDS);
}

pub fn write_ceiling_index_buffers(out_indices: &mut [u32]) {
    write_indices(out_indices, &CEILING_INDICES);
}

// ---------------------------------------------------------------- raised platform

pub const RAISED_VERTEX_COUNT: usize = 24;
pub const RAISED_SIDE_INDICES: [u32; 24] = WALL_SIDE_INDICES;
pub const RAISED_BOTTOM_INDICES: [u32; 6] = WALL_BOTTOM_INDICES;
pub const RAISED_TOP_INDICES: [u32; 6] = WALL_TOP_INDICES;
pub const RAISED_SIDE_INDEX_COUNT: usize = RAISED_SIDE_INDICES.len();
pub const RAISED_BOTTOM_INDEX_COUNT: usize = RAISED_BOTTOM_INDICES.len();
pub const RAISED_TOP_INDEX_COUNT: usize = RAISED_TOP_INDICES.len();

#[rustfmt::skip]
const RAISED_CAP_TEX_COORDS: [f64; 4 * TEX_COORD_COMPONENTS_PER_VERTEX] = [
    1.0, 1.0,  0.0, 1.0,  0.0, 0.0,  1.0, 0.0,
];

/// Same layout as the wall with Y remapped to `y_offset..y_offset+y_size`. Side faces
/// sample `v_top` at the top edge and `v_bottom` at the bottom edge.
pub fn write_raised_geometry_buffers(
    y_offset: f64,
    y_size: f64,
    v_bottom: f64,
    v_top: f64,
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    let y_bottom = y_offset;
    let y_top = y_offset + y_size;
    write_components(out_positions, &WALL_POSITIONS);
    for vertex in 0..RAISED_VERTEX_COUNT {
        let y = &mut out_positions[vertex * POSITION_COMPONENTS_PER_VERTEX + 1];
        *y = if *y > 0.5 { y_top } else { y_bottom };
    }
    write_components(out_normals, &BOX_NORMALS);

    let side_tex_coords = [0.0, v_top, 0.0, v_bottom, 1.0, v_bottom, 1.0, v_top];
    for face in 0..6 {
        let start = face * side_tex_coords.len();
        let src: &[f64] = if face == 2 || face == 3 {
            &RAISED_CAP_TEX_COORDS
        } else {
            &side_tex_coords
        };
        write_components(&mut out_tex_coords[start..], src);
    }
}

pub fn write_raised_index_buffers(
    out_alpha_tested_sides: &mut [u32],
    out_bottom: &mut [u32],
    out_top: &mut [u32],
) {
    write_indices(out_alpha_tested_sides, &RAISED_SIDE_INDICES);
    write_indices(out_bottom, &RAISED_BOTTOM_INDICES);
    write_indices(out_top, &RAISED_TOP_INDICES);
}

// ---------------------------------------------------------------- diagonal

pub const DIAGONAL_VERTEX_COUNT: usize = 8;

#[rustfmt::skip]
const DIAGONAL_TYPE1_POSITIONS: [f64; DIAGONAL_VERTEX_COUNT * POSITION_COMPONENTS_PER_VERTEX] = [
    // front
    0.0, 1.0, 0.0,  0.0, 0.0, 0.0,  1.0, 0.0, 1.0,  1.0, 1.0, 1.0,
    // back
    1.0, 1.0, 1.0,  1.0, 0.0, 1.0,  0.0, 0.0, 0.0,  0.0, 1.0, 0.0,
];
#[rustfmt::skip]
const DIAGONAL_TYPE1_NORMALS: [f64; DIAGONAL_VERTEX_COUNT * NORMAL_COMPONENTS_PER_VERTEX] = [
    -H, 0.0, H,  -H, 0.0, H,  -H, 0.0, H,  -H, 0.0, H,
     H, 0.0, -H,  H, 0.0, -H,  H, 0.0, -H,  H, 0.0, -H,
];
#[rustfmt::skip]
const DIAGONAL_TYPE2_POSITIONS: [f64; DIAGONAL_VERTEX_COUNT * POSITION_COMPONENTS_PER_VERTEX] = [
    // front
    1.0, 1.0, 0.0,  1.0, 0.0, 0.0,  0.0, 0.0, 1.0,  0.0, 1.0, 1.0,
    // back
    0.0, 1.0, 1.0,  0.0, 0.0, 1.0,  1.0, 0.0, 0.0,  1.0, 1.0, 0.0,
];
#[rustfmt::skip]
const DIAGONAL_TYPE2_NORMALS: [f64; DIAGONAL_VERTEX_COUNT * NORMAL_COMPONENTS_PER_VERTEX] = [
    -H, 0.0, -H,  -H, 0.0, -H,  -H, 0.0, -H,  -H, 0.0, -H,
     H, 0.0, H,   H, 0.0, H,   H, 0.0, H,   H, 0.0, H,
];

pub const DIAGONAL_INDICES: [u32; 12] = concat2(quad(0), quad(4));
pub const DIAGONAL_INDEX_COUNT: usize = DIAGONAL_INDICES.len();

pub fn write_diagonal_geometry_buffers(
    type1: bool,
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    if type1 {
        write_components(out_positions, &DIAGONAL_TYPE1_POSITIONS);
        write_components(out_normals, &DIAGONAL_TYPE1_NORMALS);
    } else {
        write_components(out_positions, &DIAGONAL_TYPE2_POSITIONS);
        write_components(out_normals, &DIAGONAL_TYPE2_NORMALS);
    }
    write_components(out_tex_coords, &QUAD_TEX_COORDS);
    write_components(&mut out_tex_coords[QUAD_TEX_COORDS.len()..], &QUAD_TEX_COORDS_MIRRORED);
}

pub fn write_diagonal_index_buffers(out_indices: &mut [u32]) {
    write_indices(out_indices, &DIAGONAL_INDICES);
}

// ---------------------------------------------------------------- transparent wall

pub const TRANSPARENT_WALL_VERTEX_COUNT: usize = 16;
pub const TRANSPARENT_WALL_INDICES: [u32; 24] = concat4(quad(0), quad(4), quad(8), quad(12));
pub const TRANSPARENT_WALL_INDEX_COUNT: usize = TRANSPARENT_WALL_INDICES.len();

/// The four side faces of the wall (X=0, X=1, Z=0, Z=1) without caps.
pub fn write_transparent_wall_geometry_buffers(
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    const FACE_POSITIONS: usize = 4 * POSITION_COMPONENTS_PER_VERTEX;
    const FACE_NORMALS: usize = 4 * NORMAL_COMPONENTS_PER_VERTEX;
    for (dst, src) in [0usize, 1, 4, 5].into_iter().enumerate() {
        write_components(
            &mut out_positions[dst * FACE_POSITIONS..],
            &WALL_POSITIONS[src * FACE_POSITIONS..(src + 1) * FACE_POSITIONS],
        );
        write_components(
            &mut out_normals[dst * FACE_NORMALS..],
            &BOX_NORMALS[src * FACE_NORMALS..(src + 1) * FACE_NORMALS],
        );
        write_components(&mut out_tex_coords[dst * QUAD_TEX_COORDS.len()..], &QUAD_TEX_COORDS);
    }
}

pub fn write_transparent_wall_index_buffers(out_alpha_tested: &mut [u32]) {
    write_indices(out_alpha_tested, &TRANSPARENT_WALL_INDICES);
}

// ---------------------------------------------------------------- edge

pub const EDGE_VERTEX_COUNT: usize = 8;
pub const EDGE_INDICES: [u32; 12] = concat2(quad(0), quad(4));
pub const EDGE_INDEX_COUNT: usize = EDGE_INDICES.len();

/// A two-sided quad hugging the `facing` side of the voxel, pulled inward by
/// [`EDGE_EPSILON`] and spanning `y_offset..y_offset+1`. `flipped` mirrors U.
pub fn write_edge_geometry_buffers(
    facing: VoxelFacing2D,
    y_offset: f64,
    flipped: bool,
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    let y_bottom = y_offset;
    let y_top = y_offset + 1.0;
    let bias_min = EDGE_EPSILON;
    let bias_max = 1.0 - EDGE_EPSILON;

    // Front quad corners in wall face order: top-start, bottom-start, bottom-end, top-end.
    let front: [[f64; 3]; 4] = match facing {
        VoxelFacing2D::NegativeX => [
            [bias_min, y_top, 0.0],
            [bias_min, y_bottom, 0.0],
            [bias_min, y_bottom, 1.0],
            [bias_min, y_top, 1.0],
        ],
        VoxelFacing2D::PositiveX => [
            [bias_max, y_top, 1.0],
            [bias_max, y_bottom, 1.0],
            [bias_max, y_bottom, 0.0],
            [bias_max, y_top, 0.0],
        ],
        VoxelFacing2D::NegativeZ => [
            [1.0, y_top, bias_min],
            [1.0, y_bottom, bias_min],
            [0.0, y_bottom, bias_min],
            [0.0, y_top, bias_min],
        ],
        VoxelFacing2D::PositiveZ => [
            [0.0, y_top, bias_max],
            [0.0, y_bottom, bias_max],
            [1.0, y_bottom, bias_max],
            [1.0, y_top, bias_max],
        ],
    };
    let normal = facing.normal();

    for (i, corner) in front.iter().chain(front.iter().rev()).enumerate() {
        let p = i * POSITION_COMPONENTS_PER_VERTEX;
        out_positions[p..p + 3].copy_from_slice(corner);
        let n = if i < 4 { normal } else { -normal };
        let q = i * NORMAL_COMPONENTS_PER_VERTEX;
        out_normals[q..q + 3].copy_from_slice(&[n.x, n.y, n.z]);
    }

    let (front_uvs, back_uvs) = if flipped {
        (&QUAD_TEX_COORDS_MIRRORED, &QUAD_TEX_COORDS)
    } else {
        (&QUAD_TEX_COORDS, &QUAD_TEX_COORDS_MIRRORED)
    };
    write_components(out_tex_coords, front_uvs);
    write_components(&mut out_tex_coords[front_uvs.len()..], back_uvs);
}

pub fn write_edge_index_buffers(out_alpha_tested: &mut [u32]) {
    write_indices(out_alpha_tested, &EDGE_INDICES);
}

// ---------------------------------------------------------------- chasm

pub const CHASM_VERTEX_COUNT: usize = 20;

#[rustfmt::skip]
const CHASM_POSITIONS: [f64; CHASM_VERTEX_COUNT * POSITION_COMPONENTS_PER_VERTEX] = [
    // Y=0 (floor)
    0.0, 0.0, 1.0,  1.0, 0.0, 1.0,  1.0, 0.0, 0.0,  0.0, 0.0, 0.0,
    // X=0 (north wall, facing in)
    0.0, 1.0, 1.0,  0.0, 0.0, 1.0,  0.0, 0.0, 0.0,  0.0, 1.0, 0.0,
    // X=1 (south wall)
    1.0, 1.0, 0.0,  1.0, 0.0, 0.0,  1.0, 0.0, 1.0,  1.0, 1.0, 1.0,
    // Z=0 (east wall)
    0.0, 1.0, 0.0,  0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  1.0, 1.0, 0.0,
    // Z=1 (west wall)
    1.0, 1.0, 1.0,  1.0, 0.0, 1.0,  0.0, 0.0, 1.0,  0.0, 1.0, 1.0,
];

#[rustfmt::skip]
const CHASM_NORMALS: [f64; CHASM_VERTEX_COUNT * NORMAL_COMPONENTS_PER_VERTEX] = [
    0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,
    1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,
    -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,
    0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,
    0.0, 0.0, -1.0,  0.0, 0.0, -1.0,  0.0, 0.0, -1.0,  0.0, 0.0, -1.0,
];

pub const CHASM_FLOOR_INDICES: [u32; 6] = quad(0);
pub const CHASM_FLOOR_INDEX_COUNT: usize = CHASM_FLOOR_INDICES.len();
pub const CHASM_NORTH_WALL_INDICES: [u32; 6] = quad(4);
pub const CHASM_SOUTH_WALL_INDICES: [u32; 6] = quad(8);
pub const CHASM_EAST_WALL_INDICES: [u32; 6] = quad(12);
pub const CHASM_WEST_WALL_INDICES: [u32; 6] = quad(16);

pub fn write_chasm_geometry_buffers(
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    write_components(out_positions, &CHASM_POSITIONS);
    write_components(out_normals, &CHASM_NORMALS);
    for face in 0..5 {
        let start = face * QUAD_TEX_COORDS.len();
        write_components(&mut out_tex_coords[start..], &QUAD_TEX_COORDS);
    }
}

pub fn write_chasm_floor_index_buffers(out_indices: &mut [u32]) {
    write_indices(out_indices, &CHASM_FLOOR_INDICES);
}

/// Writes the requested chasm wall quads back to back in north, east, south, west order
/// and returns the number of indices written.
pub fn write_chasm_wall_index_buffers(
    north: bool,
    east: bool,
    south: bool,
    west: bool,
    out_indices: &mut [u32],
) -> usize {
    let mut count = 0;
    for (enabled, quad_indices) in [
        (north, &CHASM_NORTH_WALL_INDICES),
        (east, &CHASM_EAST_WALL_INDICES),
        (south, &CHASM_SOUTH_WALL_INDICES),
        (west, &CHASM_WEST_WALL_INDICES),
    ] {
        if enabled {
            write_indices(&mut out_indices[count..], quad_indices);
            count += quad_indices.len();
        }
    }
    count
}

// ---------------------------------------------------------------- door

pub const DOOR_VERTEX_COUNT: usize = 4;

#[rustfmt::skip]
const DOOR_POSITIONS: [f64; DOOR_VERTEX_COUNT * POSITION_COMPONENTS_PER_VERTEX] = [
    0.0, 1.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 1.0,  0.0, 1.0, 1.0,
];
#[rustfmt::skip]
const DOOR_NORMALS: [f64; DOOR_VERTEX_COUNT * NORMAL_COMPONENTS_PER_VERTEX] = [
    -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,
];
pub const DOOR_INDICES: [u32; 6] = quad(0);
pub const DOOR_INDEX_COUNT: usize = DOOR_INDICES.len();

/// One X=0 quad; door voxels draw it once per face with a per-face transform.
pub fn write_door_geometry_buffers(
    out_positions: &mut [f64],
    out_normals: &mut [f64],
    out_tex_coords: &mut [f64],
) {
    write_components(out_positions, &DOOR_POSITIONS);
    write_components(out_normals, &DOOR_NORMALS);
    write_components(out_tex_coords, &QUAD_TEX_COORDS);
}

pub fn write_door_index_buffers(out_alpha_tested: &mut [u32]) {
    write_indices(out_alpha_tested, &DOOR_INDICES);
}
