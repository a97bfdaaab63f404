use arena_geom::Vec3;

/// Horizontal facing of a voxel side. North is -X, east is -Z.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VoxelFacing2D {
    PositiveX,
    NegativeX,
    PositiveZ,
    NegativeZ,
}

impl VoxelFacing2D {
    pub const ALL: [VoxelFacing2D; 4] = [
        VoxelFacing2D::PositiveX,
        VoxelFacing2D::NegativeX,
        VoxelFacing2D::PositiveZ,
        VoxelFacing2D::NegativeZ,
    ];

    #[inline]
    pub fn to_3d(self) -> VoxelFacing3D {
        match self {
            VoxelFacing2D::PositiveX => VoxelFacing3D::PositiveX,
            VoxelFacing2D::NegativeX => VoxelFacing3D::NegativeX,
            VoxelFacing2D::PositiveZ => VoxelFacing3D::PositiveZ,
            VoxelFacing2D::NegativeZ => VoxelFacing3D::NegativeZ,
        }
    }

    #[inline]
    pub fn opposite(self) -> VoxelFacing2D {
        match self {
            VoxelFacing2D::PositiveX => VoxelFacing2D::NegativeX,
            VoxelFacing2D::NegativeX => VoxelFacing2D::PositiveX,
            VoxelFacing2D::PositiveZ => VoxelFacing2D::NegativeZ,
            VoxelFacing2D::NegativeZ => VoxelFacing2D::PositiveZ,
        }
    }

    /// Grid step `(dx, dz)` out of this side.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            VoxelFacing2D::PositiveX => (1, 0),
            VoxelFacing2D::NegativeX => (-1, 0),
            VoxelFacing2D::PositiveZ => (0, 1),
            VoxelFacing2D::NegativeZ => (0, -1),
        }
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        self.to_3d().normal()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VoxelFacing3D {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl VoxelFacing3D {
    pub const ALL: [VoxelFacing3D; 6] = [
        VoxelFacing3D::PositiveX,
        VoxelFacing3D::NegativeX,
        VoxelFacing3D::PositiveY,
        VoxelFacing3D::NegativeY,
        VoxelFacing3D::PositiveZ,
        VoxelFacing3D::NegativeZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            VoxelFacing3D::PositiveX => Vec3::UNIT_X,
            VoxelFacing3D::NegativeX => -Vec3::UNIT_X,
            VoxelFacing3D::PositiveY => Vec3::UNIT_Y,
            VoxelFacing3D::NegativeY => -Vec3::UNIT_Y,
            VoxelFacing3D::PositiveZ => Vec3::UNIT_Z,
            VoxelFacing3D::NegativeZ => -Vec3::UNIT_Z,
        }
    }

    /// Horizontal facings map back to 2D; the Y facings have no 2D form.
    #[inline]
    pub fn to_2d(self) -> Option<VoxelFacing2D> {
        match self {
            VoxelFacing3D::PositiveX => Some(VoxelFacing2D::PositiveX),
            VoxelFacing3D::NegativeX => Some(VoxelFacing2D::NegativeX),
            VoxelFacing3D::PositiveZ => Some(VoxelFacing2D::PositiveZ),
            VoxelFacing3D::NegativeZ => Some(VoxelFacing2D::NegativeZ),
            VoxelFacing3D::PositiveY | VoxelFacing3D::NegativeY => None,
        }
    }
}
