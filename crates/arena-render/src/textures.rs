use arena_chunk::{ChasmDefId, ChunkInt2, VoxelChunk};
use arena_voxels::{TextureAsset, VoxelChasmAnimation, VoxelChasmDefinition};
use hashbrown::HashMap;

use crate::backend::RenderBackend;
use crate::ids::ObjectTextureId;

#[derive(Clone, Debug)]
struct LoadedTexture {
    asset: TextureAsset,
    id: ObjectTextureId,
}

#[derive(Clone, Debug)]
struct LoadedChasmFloorTexture {
    animation: VoxelChasmAnimation,
    id: ObjectTextureId,
}

#[derive(Clone, Copy, Debug)]
struct ChasmTextureKey {
    floor_index: usize,
    wall_index: usize,
}

/// Backend textures for every voxel texture asset and chasm animation seen so far.
///
/// Chasm definitions are chunk-local, so their lookups are keyed by chunk and id and
/// dropped with the chunk. Floor animations and wall textures themselves are shared.
#[derive(Debug, Default)]
pub struct VoxelTextureCache {
    textures: Vec<LoadedTexture>,
    chasm_floor_textures: Vec<LoadedChasmFloorTexture>,
    chasm_texture_keys: HashMap<(ChunkInt2, ChasmDefId), ChasmTextureKey>,
}

impl VoxelTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_texture(&self, asset: &TextureAsset) -> Option<usize> {
        self.textures.iter().position(|t| t.asset == *asset)
    }

    fn load_texture(&mut self, asset: &TextureAsset, backend: &mut dyn RenderBackend) -> Option<usize> {
        if let Some(i) = self.find_texture(asset) {
            return Some(i);
        }
        match backend.create_object_texture(asset) {
            Ok(id) => {
                self.textures.push(LoadedTexture {
                    asset: asset.clone(),
                    id,
                });
                Some(self.textures.len() - 1)
            }
            Err(err) => {
                log::warn!("couldn't create voxel texture \"{}\": {err}", asset.filename);
                None
            }
        }
    }

    fn load_chasm_floor(&mut self, def: &VoxelChasmDefinition, backend: &mut dyn RenderBackend) -> Option<usize> {
        if let Some(i) = self
            .chasm_floor_textures
            .iter()
            .position(|t| t.animation == def.animation)
        {
            return Some(i);
        }
        let created = match &def.animation {
            VoxelChasmAnimation::SolidColor { palette_index } => backend.create_solid_color_texture(*palette_index),
            VoxelChasmAnimation::Animated { frames } => backend.create_texture_sheet(frames),
        };
        match created {
            Ok(id) => {
                self.chasm_floor_textures.push(LoadedChasmFloorTexture {
                    animation: def.animation.clone(),
                    id,
                });
                Some(self.chasm_floor_textures.len() - 1)
            }
            Err(err) => {
                log::warn!("couldn't create {:?} chasm floor texture: {err}", def.chasm_type);
                None
            }
        }
    }

    /// Loads every texture referenced by `chunk`'s texture and chasm definitions.
    pub fn load_chunk_textures(&mut self, chunk: &VoxelChunk, backend: &mut dyn RenderBackend) {
        for i in 0..chunk.texture_def_count() {
            let def = chunk.texture_def(i as u16);
            for asset in def.iter() {
                self.load_texture(asset, backend);
            }
        }

        let position = chunk.position();
        for i in 0..chunk.chasm_def_count() {
            let chasm_def_id = i as ChasmDefId;
            if self.chasm_texture_keys.contains_key(&(position, chasm_def_id)) {
                continue;
            }
            let def = chunk.chasm_def(chasm_def_id);
            let Some(floor_index) = self.load_chasm_floor(def, backend) else {
                continue;
            };
            let Some(wall_index) = self.load_texture(&def.wall_texture, backend) else {
                continue;
            };
            self.chasm_texture_keys.insert(
                (position, chasm_def_id),
                ChasmTextureKey {
                    floor_index,
                    wall_index,
                },
            );
        }
    }

    pub fn texture_id(&self, asset: &TextureAsset) -> Option<ObjectTextureId> {
        self.find_texture(asset).map(|i| self.textures[i].id)
    }

    pub fn chasm_floor_texture_id(&self, chunk: ChunkInt2, chasm_def_id: ChasmDefId) -> Option<ObjectTextureId> {
        let key = self.chasm_texture_keys.get(&(chunk, chasm_def_id))?;
        Some(self.chasm_floor_textures[key.floor_index].id)
    }

    pub fn chasm_wall_texture_id(&self, chunk: ChunkInt2, chasm_def_id: ChasmDefId) -> Option<ObjectTextureId> {
        let key = self.chasm_texture_keys.get(&(chunk, chasm_def_id))?;
        Some(self.textures[key.wall_index].id)
    }

    /// Forgets the chunk's chasm mappings. Textures stay loaded for other chunks.
    pub fn unload_chunk(&mut self, chunk: ChunkInt2) {
        self.chasm_texture_keys.retain(|(pos, _), _| *pos != chunk);
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len() + self.chasm_floor_textures.len()
    }

    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        for t in self.textures.drain(..) {
            backend.free_object_texture(t.id);
        }
        for t in self.chasm_floor_textures.drain(..) {
            backend.free_object_texture(t.id);
        }
        self.chasm_texture_keys.clear();
    }
}
