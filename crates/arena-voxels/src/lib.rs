//! Voxel shape definitions: classic shape sum type, geometry writers, shared mesh and
//! shape definitions and the library that caches them.
#![forbid(unsafe_code)]

pub mod defs;
pub mod door;
mod facing;
mod library;
mod mesh_def;
pub mod mesh_utils;
mod shape_def;
mod voxel_type;
pub mod writers;

pub use defs::{
    ArenaDoorType, TextureAsset, VoxelChasmAnimation, VoxelChasmDefinition, VoxelDoorDefinition,
    VoxelTextureDefinition,
};
pub use facing::{VoxelFacing2D, VoxelFacing3D};
pub use library::VoxelShapeLibrary;
pub use mesh_def::{VoxelMeshDefinition, VoxelMeshIndexBuffer};
pub use mesh_utils::{VoxelShapeScaleType, scaled_vertex_y};
pub use shape_def::{VoxelBoxShapeDefinition, VoxelShapeDefinition, VoxelShapeType};
pub use voxel_type::{
    ARENA_VOXEL_TYPE_COUNT, ArenaVoxelShape, ArenaVoxelType, ChasmType, VoxelCapabilities,
};
