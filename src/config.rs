use std::error::Error;
use std::fs;
use std::path::Path;

use arena_voxels::{ArenaDoorType, ChasmType, TextureAsset, VoxelShapeScaleType};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y: f64,
    pub aspect: f64,
    /// Eye height in voxels above world Y 0; scaled by the ceiling.
    pub eye_height: f64,
    /// Radians per second the demo camera turns around +Y.
    pub turn_speed: f64,
    /// Voxels per second the camera drifts along +X, streaming chunks as it goes.
    pub walk_speed: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y: 60.0,
            aspect: 16.0 / 9.0,
            eye_height: 1.6,
            turn_speed: 0.6,
            walk_speed: 4.0,
        }
    }
}

/// Look of one chasm type: the wall texture plus the frames of its surface animation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChasmStyle {
    pub chasm_type: ChasmType,
    pub wall: TextureAsset,
    /// Multi-image file holding the animation frames.
    pub animation: String,
    #[serde(default = "default_chasm_frames")]
    pub frame_count: u32,
}

fn default_chasm_frames() -> u32 {
    5
}

impl ChasmStyle {
    fn new(chasm_type: ChasmType, wall: &str, animation: &str) -> Self {
        Self {
            chasm_type,
            wall: TextureAsset::new(wall),
            animation: animation.to_string(),
            frame_count: default_chasm_frames(),
        }
    }

    pub fn frames(&self) -> Vec<TextureAsset> {
        (0..self.frame_count)
            .map(|i| TextureAsset::with_index(self.animation.as_str(), i))
            .collect()
    }
}

/// Textures and voxel kinds the level generator places. Texture lists are in the
/// texture slot order of the matching shape.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub floor: Vec<TextureAsset>,
    /// Sides, bottom and top.
    pub wall: Vec<TextureAsset>,
    /// Sides, bottom and top.
    pub raised: Vec<TextureAsset>,
    pub raised_scale: VoxelShapeScaleType,
    pub diagonal: Vec<TextureAsset>,
    pub door: Vec<TextureAsset>,
    /// Door types handed out in turn across the door lattice.
    pub door_types: Vec<ArenaDoorType>,
    pub chasms: Vec<ChasmStyle>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let assets = |names: &[&str]| names.iter().map(|&n| TextureAsset::new(n)).collect();
        Self {
            floor: assets(&["FLOOR.IMG"]),
            wall: assets(&["WALL.IMG", "FLOOR.IMG", "CEILING.IMG"]),
            raised: assets(&["RAISED_SIDE.IMG", "RAISED_BOTTOM.IMG", "RAISED_TOP.IMG"]),
            raised_scale: VoxelShapeScaleType::UnscaledFromMin,
            diagonal: assets(&["WALL.IMG"]),
            door: assets(&["DOOR.IMG"]),
            door_types: vec![
                ArenaDoorType::Swinging,
                ArenaDoorType::Sliding,
                ArenaDoorType::Raising,
                ArenaDoorType::Splitting,
            ],
            chasms: vec![
                ChasmStyle::new(ChasmType::Dry, "DRYCHASM.IMG", "DRYCHASM.CFA"),
                ChasmStyle::new(ChasmType::Wet, "WETCHASM.IMG", "WATERANI.CFA"),
                ChasmStyle::new(ChasmType::Lava, "LAVACHASM.IMG", "LAVAANI.CFA"),
            ],
        }
    }
}

impl PaletteConfig {
    pub fn chasm(&self, chasm_type: ChasmType) -> Option<&ChasmStyle> {
        self.chasms.iter().find(|c| c.chasm_type == chasm_type)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let slots = [
            ("floor", &self.floor, 1),
            ("wall", &self.wall, 3),
            ("raised", &self.raised, 3),
            ("diagonal", &self.diagonal, 1),
            ("door", &self.door, 1),
        ];
        for (name, textures, expected) in slots {
            if textures.len() != expected {
                return Err(format!("palette {name} needs {expected} textures, got {}", textures.len()).into());
            }
        }
        if self.door_types.is_empty() {
            return Err("palette door_types must not be empty".into());
        }
        for chasm_type in [ChasmType::Dry, ChasmType::Wet, ChasmType::Lava] {
            let count = self.chasms.iter().filter(|c| c.chasm_type == chasm_type).count();
            if count != 1 {
                return Err(format!("palette needs exactly one {chasm_type:?} chasm, got {count}").into());
            }
        }
        if let Some(c) = self.chasms.iter().find(|c| c.frame_count == 0) {
            return Err(format!("palette {:?} chasm has no animation frames", c.chasm_type).into());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub ceiling_scale: f64,
    pub chunk_distance: i32,
    pub chunk_height: i32,
    pub seed: i32,
    pub camera: CameraConfig,
    /// Level population workers; 0 picks from the available parallelism.
    pub workers: usize,
    pub chasm_anim_period: f64,
    pub palette: PaletteConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ceiling_scale: 1.0,
            chunk_distance: 1,
            chunk_height: 3,
            seed: 1337,
            camera: CameraConfig::default(),
            workers: 0,
            chasm_anim_period: arena_render::CHASM_ANIM_SECONDS,
            palette: PaletteConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: SceneConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if !(self.ceiling_scale > 0.0) {
            return Err(format!("ceiling_scale must be positive, got {}", self.ceiling_scale).into());
        }
        if self.chunk_distance < 0 {
            return Err(format!("chunk_distance must not be negative, got {}", self.chunk_distance).into());
        }
        // Floor layer plus at least one main-floor layer.
        if self.chunk_height < 2 {
            return Err(format!("chunk_height must be at least 2, got {}", self.chunk_height).into());
        }
        if !(self.chasm_anim_period > 0.0) {
            return Err(format!("chasm_anim_period must be positive, got {}", self.chasm_anim_period).into());
        }
        if !(self.camera.fov_y > 0.0 && self.camera.fov_y < 180.0) || !(self.camera.aspect > 0.0) {
            return Err("camera fov_y must be in (0, 180) and aspect positive".into());
        }
        self.palette.validate()
    }

    /// Worker count with the automatic choice resolved.
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1).max(1))
            .unwrap_or(1)
    }

    /// Whether switching to `other` invalidates the populated chunks, as opposed to only
    /// moving the streaming radius or the camera.
    pub fn requires_repopulate(&self, other: &SceneConfig) -> bool {
        self.ceiling_scale != other.ceiling_scale
            || self.chunk_height != other.chunk_height
            || self.seed != other.seed
            || self.palette != other.palette
    }
}
