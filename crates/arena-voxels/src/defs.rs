//! Texture, door and chasm definitions attached to voxels.

use serde::Deserialize;

use crate::voxel_type::ChasmType;

/// Reference to an image in the asset set, optionally one frame of a multi-image file.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(from = "TextureAssetEntry")]
pub struct TextureAsset {
    pub filename: String,
    pub index: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextureAssetEntry {
    // asset = "WALL.IMG"
    Filename(String),
    // asset = { filename = "WATERANI.CFA", index = 2 }
    Detail { filename: String, index: Option<u32> },
}

impl From<TextureAssetEntry> for TextureAsset {
    fn from(entry: TextureAssetEntry) -> Self {
        match entry {
            TextureAssetEntry::Filename(filename) => Self { filename, index: None },
            TextureAssetEntry::Detail { filename, index } => Self { filename, index },
        }
    }
}

impl TextureAsset {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            index: None,
        }
    }

    pub fn with_index(filename: impl Into<String>, index: u32) -> Self {
        Self {
            filename: filename.into(),
            index: Some(index),
        }
    }
}

/// Textures of one voxel, addressed by the texture slot of each mesh index buffer.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct VoxelTextureDefinition {
    textures: Vec<TextureAsset>,
}

impl VoxelTextureDefinition {
    pub const MAX_TEXTURES: usize = 3;

    pub fn new(textures: Vec<TextureAsset>) -> Self {
        assert!(textures.len() <= Self::MAX_TEXTURES, "too many voxel textures: {}", textures.len());
        Self { textures }
    }

    #[inline]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn texture_asset(&self, slot: usize) -> Option<&TextureAsset> {
        self.textures.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureAsset> {
        self.textures.iter()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
pub enum ArenaDoorType {
    Swinging,
    Sliding,
    Raising,
    Splitting,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VoxelDoorDefinition {
    pub door_type: ArenaDoorType,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum VoxelChasmAnimation {
    SolidColor { palette_index: u8 },
    Animated { frames: Vec<TextureAsset> },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VoxelChasmDefinition {
    pub chasm_type: ChasmType,
    pub animation: VoxelChasmAnimation,
    pub wall_texture: TextureAsset,
    pub is_emissive: bool,
    pub allows_swimming: bool,
    pub is_damaging: bool,
}

impl VoxelChasmDefinition {
    /// Classic chasm presets: dry pits are solid black, water and lava animate.
    pub fn classic(chasm_type: ChasmType, wall_texture: TextureAsset, frames: Vec<TextureAsset>) -> Self {
        const DRY_CHASM_PALETTE_INDEX: u8 = 112;
        match chasm_type {
            ChasmType::Dry => Self {
                chasm_type,
                animation: VoxelChasmAnimation::SolidColor {
                    palette_index: DRY_CHASM_PALETTE_INDEX,
                },
                wall_texture,
                is_emissive: false,
                allows_swimming: false,
                is_damaging: false,
            },
            ChasmType::Wet => Self {
                chasm_type,
                animation: VoxelChasmAnimation::Animated { frames },
                wall_texture,
                is_emissive: false,
                allows_swimming: true,
                is_damaging: false,
            },
            ChasmType::Lava => Self {
                chasm_type,
                animation: VoxelChasmAnimation::Animated { frames },
                wall_texture,
                is_emissive: true,
                allows_swimming: true,
                is_damaging: true,
            },
        }
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        matches!(self.animation, VoxelChasmAnimation::Animated { .. })
    }
}
