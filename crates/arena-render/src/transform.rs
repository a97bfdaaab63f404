use arena_geom::Vec3;

/// Placement of one mesh instance: `translation + Ry(rotation) * (scale * (p + pre) - pre)`
/// where `pre` is the pre-scale translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTransform {
    pub translation: Vec3,
    pub rotation_y: f64,
    pub scale: Vec3,
    /// Moves the scaling origin; raising doors shrink toward the top of the voxel.
    pub pre_scale_translation: Vec3,
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RenderTransform {
    pub const IDENTITY: RenderTransform = RenderTransform {
        translation: Vec3::ZERO,
        rotation_y: 0.0,
        scale: Vec3::ONE,
        pre_scale_translation: Vec3::ZERO,
    };

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        let pre = self.pre_scale_translation;
        let p = point + pre;
        let scaled = Vec3::new(p.x * self.scale.x, p.y * self.scale.y, p.z * self.scale.z) - pre;
        self.translation + scaled.rotated_y(self.rotation_y)
    }

    /// Rotation only; normals ignore the non-uniform door scales since those never
    /// stretch along the normal.
    #[inline]
    pub fn apply_direction(&self, dir: Vec3) -> Vec3 {
        dir.rotated_y(self.rotation_y)
    }
}
