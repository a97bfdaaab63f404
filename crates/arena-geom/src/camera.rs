use crate::{Aabb, Vec3};

/// Signed distance from `point` to the plane through `plane_point` with unit `normal`.
#[inline]
pub fn distance_to_plane(point: Vec3, plane_point: Vec3, normal: Vec3) -> f64 {
    (point - plane_point).dot(normal)
}

/// Result of testing a box against the camera frustum.
///
/// Both flags false means the box straddles at least one plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BBoxVisibility {
    pub completely_visible: bool,
    pub completely_invisible: bool,
}

/// Per-frame camera state used for frustum culling.
///
/// The frustum is described by five inward-facing plane normals that all pass through
/// the eye: the forward (near) plane plus the four side planes. There is no far plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderCamera {
    pub world_point: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub fov_y: f64,
    pub aspect: f64,
    pub left_frustum_normal: Vec3,
    pub right_frustum_normal: Vec3,
    pub bottom_frustum_normal: Vec3,
    pub top_frustum_normal: Vec3,
}

impl RenderCamera {
    /// Builds a camera at `eye` looking along `direction`. `fov_y` is the vertical field of
    /// view in degrees, `aspect` is width over height.
    pub fn new(eye: Vec3, direction: Vec3, fov_y: f64, aspect: f64) -> Self {
        debug_assert!(fov_y > 0.0 && fov_y < 180.0);
        debug_assert!(aspect > 0.0);
        let forward = direction.normalized();
        let mut right = forward.cross(Vec3::UNIT_Y).normalized();
        if right.length() == 0.0 {
            // Looking straight up or down; any horizontal right vector works.
            right = Vec3::UNIT_Z;
        }
        let up = right.cross(forward).normalized();

        let tan_y = (fov_y.to_radians() * 0.5).tan();
        let tan_x = tan_y * aspect;
        Self {
            world_point: eye,
            forward,
            right,
            up,
            fov_y,
            aspect,
            left_frustum_normal: (right + forward * tan_x).normalized(),
            right_frustum_normal: (-right + forward * tan_x).normalized(),
            bottom_frustum_normal: (up + forward * tan_y).normalized(),
            top_frustum_normal: (-up + forward * tan_y).normalized(),
        }
    }

    #[inline]
    pub fn frustum_normals(&self) -> [Vec3; 5] {
        [
            self.forward,
            self.left_frustum_normal,
            self.right_frustum_normal,
            self.bottom_frustum_normal,
            self.top_frustum_normal,
        ]
    }

    /// Classifies `bbox` against the frustum by counting box corners on the inner side of
    /// each plane. Completely invisible as soon as every corner is outside one plane.
    pub fn bbox_visibility(&self, bbox: &Aabb) -> BBoxVisibility {
        let corners = bbox.corners();
        let mut result = BBoxVisibility {
            completely_visible: true,
            completely_invisible: false,
        };
        for normal in self.frustum_normals() {
            let inside = corners
                .iter()
                .filter(|&&c| distance_to_plane(c, self.world_point, normal) >= 0.0)
                .count();
            if inside < corners.len() {
                result.completely_visible = false;
            }
            if inside == 0 {
                result.completely_invisible = true;
                break;
            }
        }
        result
    }

    #[inline]
    pub fn is_point_in_frustum(&self, point: Vec3) -> bool {
        self.frustum_normals()
            .iter()
            .all(|&n| distance_to_plane(point, self.world_point, n) >= 0.0)
    }
}
