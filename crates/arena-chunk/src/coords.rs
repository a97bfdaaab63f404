use arena_geom::Vec3;
use arena_voxels::VoxelFacing2D;

use crate::Chunk;

/// Chunk grid coordinate. `z` is the second horizontal axis, matching world Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkInt2 {
    pub x: i32,
    pub z: i32,
}

impl ChunkInt2 {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Chebyshev distance in chunks; the streaming area is a square.
    #[inline]
    pub fn distance(self, other: ChunkInt2) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// World-space position of the chunk's (0, 0, 0) corner.
    #[inline]
    pub fn world_origin(self) -> Vec3 {
        Vec3::new(
            f64::from(self.x * Chunk::WIDTH),
            0.0,
            f64::from(self.z * Chunk::DEPTH),
        )
    }
}

impl From<(i32, i32)> for ChunkInt2 {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Voxel coordinate local to a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelInt3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelInt3 {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn neighbor(self, facing: VoxelFacing2D) -> VoxelInt3 {
        let (dx, dz) = facing.delta();
        VoxelInt3::new(self.x + dx, self.y, self.z + dz)
    }
}

/// A voxel addressed by chunk plus local voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CoordInt3 {
    pub chunk: ChunkInt2,
    pub voxel: VoxelInt3,
}

impl CoordInt3 {
    #[inline]
    pub const fn new(chunk: ChunkInt2, voxel: VoxelInt3) -> Self {
        Self { chunk, voxel }
    }

    /// Adjacent voxel across `facing`, stepping into the next chunk at the edges.
    pub fn neighbor(self, facing: VoxelFacing2D) -> CoordInt3 {
        let v = self.voxel.neighbor(facing);
        let (cx, x) = (self.chunk.x + v.x.div_euclid(Chunk::WIDTH), v.x.rem_euclid(Chunk::WIDTH));
        let (cz, z) = (self.chunk.z + v.z.div_euclid(Chunk::DEPTH), v.z.rem_euclid(Chunk::DEPTH));
        CoordInt3::new(ChunkInt2::new(cx, cz), VoxelInt3::new(x, v.y, z))
    }
}

/// A point addressed by chunk plus chunk-local offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CoordDouble3 {
    pub chunk: ChunkInt2,
    pub point: Vec3,
}

impl CoordDouble3 {
    #[inline]
    pub const fn new(chunk: ChunkInt2, point: Vec3) -> Self {
        Self { chunk, point }
    }

    pub fn from_world_point(world: Vec3) -> Self {
        let width = f64::from(Chunk::WIDTH);
        let depth = f64::from(Chunk::DEPTH);
        let cx = (world.x / width).floor();
        let cz = (world.z / depth).floor();
        Self {
            chunk: ChunkInt2::new(cx as i32, cz as i32),
            point: Vec3::new(world.x - cx * width, world.y, world.z - cz * depth),
        }
    }

    #[inline]
    pub fn to_world_point(self) -> Vec3 {
        self.chunk.world_origin() + self.point
    }

    /// The voxel containing this point, with Y measured in ceiling-scaled voxels.
    pub fn voxel(self, ceiling_scale: f64) -> CoordInt3 {
        CoordInt3::new(
            self.chunk,
            VoxelInt3::new(
                self.point.x.floor() as i32,
                (self.point.y / ceiling_scale).floor() as i32,
                self.point.z.floor() as i32,
            ),
        )
    }
}
