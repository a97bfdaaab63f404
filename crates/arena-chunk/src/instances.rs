//! Per-voxel animation and context state stored sparsely in a chunk.

use arena_voxels::VoxelFacing2D;
use arena_voxels::mesh_utils::chasm_wall_index;

use crate::coords::VoxelInt3;

/// Percent per second of an opening or closing door.
pub const DOOR_ANIM_SPEED: f64 = 1.30;
/// Distance in voxels beyond which an open door starts closing.
pub const DOOR_CLOSE_DISTANCE: f64 = 3.0;
/// Seconds for a fading voxel to disappear.
pub const FADING_VOXEL_SECONDS: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorAnimState {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelDoorAnimationInstance {
    pub voxel: VoxelInt3,
    pub speed: f64,
    pub percent_open: f64,
    pub state: DoorAnimState,
}

impl VoxelDoorAnimationInstance {
    pub fn opening(voxel: VoxelInt3, speed: f64) -> Self {
        debug_assert!(speed > 0.0);
        Self {
            voxel,
            speed,
            percent_open: 0.0,
            state: DoorAnimState::Opening,
        }
    }

    pub fn set_state(&mut self, state: DoorAnimState) {
        self.state = state;
    }

    pub fn update(&mut self, dt: f64) {
        let delta = self.speed * dt;
        match self.state {
            DoorAnimState::Opening => {
                self.percent_open = (self.percent_open + delta).min(1.0);
                if self.percent_open >= 1.0 {
                    self.state = DoorAnimState::Open;
                }
            }
            DoorAnimState::Closing => {
                self.percent_open = (self.percent_open - delta).max(0.0);
                if self.percent_open <= 0.0 {
                    self.state = DoorAnimState::Closed;
                }
            }
            DoorAnimState::Open | DoorAnimState::Closed => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelFadeAnimationInstance {
    pub voxel: VoxelInt3,
    pub speed: f64,
    pub percent_faded: f64,
}

impl VoxelFadeAnimationInstance {
    pub fn new(voxel: VoxelInt3) -> Self {
        Self::with_speed(voxel, 1.0 / FADING_VOXEL_SECONDS)
    }

    pub fn with_speed(voxel: VoxelInt3, speed: f64) -> Self {
        Self {
            voxel,
            speed,
            percent_faded: 0.0,
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.percent_faded = (self.percent_faded + self.speed * dt).min(1.0);
    }

    #[inline]
    pub fn is_done_fading(&self) -> bool {
        self.percent_faded >= 1.0
    }
}

/// Which inward walls a chasm voxel shows. Only exists while at least one is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelChasmWallInstance {
    pub voxel: VoxelInt3,
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl VoxelChasmWallInstance {
    pub fn new(voxel: VoxelInt3, north: bool, east: bool, south: bool, west: bool) -> Self {
        Self {
            voxel,
            north,
            east,
            south,
            west,
        }
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        [self.north, self.east, self.south, self.west]
            .into_iter()
            .filter(|&f| f)
            .count()
    }

    /// Chasm wall index buffer for this combination, `None` with no walls.
    #[inline]
    pub fn wall_index(&self) -> Option<usize> {
        (self.face_count() > 0).then(|| chasm_wall_index(self.north, self.east, self.south, self.west))
    }
}

/// Door faces the camera can currently see; at most one per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelDoorVisibilityInstance {
    pub voxel: VoxelInt3,
    faces: [VoxelFacing2D; 2],
    face_count: usize,
}

impl VoxelDoorVisibilityInstance {
    pub fn new(voxel: VoxelInt3) -> Self {
        Self {
            voxel,
            faces: [VoxelFacing2D::NegativeX; 2],
            face_count: 0,
        }
    }

    #[inline]
    pub fn visible_faces(&self) -> &[VoxelFacing2D] {
        &self.faces[..self.face_count]
    }

    /// Picks the face on each axis that points toward the camera, dropping it when the
    /// neighbor on that side blocks door faces. Returns whether the set changed.
    pub fn update(
        &mut self,
        camera_north_inclusive: bool,
        camera_east_inclusive: bool,
        north_allows: bool,
        east_allows: bool,
        south_allows: bool,
        west_allows: bool,
    ) -> bool {
        let before = (self.faces, self.face_count);
        self.faces = [VoxelFacing2D::NegativeX; 2];
        self.face_count = 0;

        let x_face = if camera_north_inclusive {
            north_allows.then_some(VoxelFacing2D::NegativeX)
        } else {
            south_allows.then_some(VoxelFacing2D::PositiveX)
        };
        let z_face = if camera_east_inclusive {
            east_allows.then_some(VoxelFacing2D::NegativeZ)
        } else {
            west_allows.then_some(VoxelFacing2D::PositiveZ)
        };
        for face in [x_face, z_face].into_iter().flatten() {
            self.faces[self.face_count] = face;
            self.face_count += 1;
        }
        (self.faces, self.face_count) != before
    }
}
