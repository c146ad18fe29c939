use std::path::Path;

use crate::data_structures::texture::{Texture, TextureKind};
use crate::resources::texture::TextureCache;

/**
 * This module contains all logic for loading textures from external files and
 * for mapping model-format material slots onto texture kinds.
 */
pub mod texture;

pub fn load_binary(path: impl AsRef<Path>) -> anyhow::Result<Vec<u8>> {
    let data = std::fs::read(path.as_ref())?;
    Ok(data)
}

/// The `.mtl` material slot that corresponds to a logical texture kind.
///
/// This is the hand-off point between the model-import library's material
/// model and the engine's texture typing.
pub fn obj_texture(material: &tobj::Material, kind: TextureKind) -> Option<&str> {
    match kind {
        TextureKind::Diffuse => material.diffuse_texture.as_deref(),
        TextureKind::Specular => material.specular_texture.as_deref(),
    }
}

/// Load every typed texture an `.mtl` material references through the cache.
///
/// Texture paths in `.mtl` files are relative to the material file, so the
/// caller passes the directory to resolve them against. A material that
/// references no texture at all is logged and yields an empty list.
pub fn load_obj_textures(
    cache: &mut TextureCache,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    material: &tobj::Material,
    base_dir: &Path,
) -> Vec<Texture> {
    let mut textures = Vec::new();
    for kind in [TextureKind::Diffuse, TextureKind::Specular] {
        if let Some(file_name) = obj_texture(material, kind) {
            textures.push(cache.load(device, queue, base_dir.join(file_name), kind));
        }
    }
    if textures.is_empty() {
        log::error!(
            "This material's mtl ({}) references no texture.",
            material.name
        );
    }
    textures
}

/// Load the materials of an `.mtl` file.
pub fn load_mtl(path: impl AsRef<Path>) -> anyhow::Result<Vec<tobj::Material>> {
    let (materials, _) = tobj::load_mtl(path.as_ref())?;
    Ok(materials)
}
