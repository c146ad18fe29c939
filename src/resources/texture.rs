//! Texture loading, the path-keyed texture cache and the sampler-binding
//! convention shared by the textured pipeline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::data_structures::texture::{Texture, TextureKind};

/// Bind-group layout for a textured surface: a diffuse and a specular
/// texture, each with its own sampler, in binding-convention order.
pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("Shape texture_bind_group_layout"),
    })
}

/// The sampler-binding name for the `index`-th texture of a kind:
/// `texture_diffuse1`, `texture_specular2`, ...
///
/// `index` counts per kind and starts at 1.
pub fn sampler_uniform_name(kind: TextureKind, index: u32) -> String {
    format!("texture_{}{}", kind.label(), index)
}

/// Convention names for a texture list, with a separate running index per
/// kind: `[Diffuse, Specular, Diffuse]` becomes `texture_diffuse1`,
/// `texture_specular1`, `texture_diffuse2`.
pub fn sampler_uniform_names(kinds: &[TextureKind]) -> Vec<String> {
    let mut diffuse_nr = 0;
    let mut specular_nr = 0;
    kinds
        .iter()
        .map(|kind| {
            let counter = match kind {
                TextureKind::Diffuse => &mut diffuse_nr,
                TextureKind::Specular => &mut specular_nr,
            };
            *counter += 1;
            sampler_uniform_name(*kind, *counter)
        })
        .collect()
}

/// A path-keyed cache of uploaded textures.
///
/// Loading a path a second time returns a clone of the cached entry with only
/// the logical kind retagged; the clone shares the GPU texture of the first
/// upload. The cache is reached through `&mut` borrows of its owner, so
/// exclusive access is enforced by the compiler rather than by convention.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: HashMap<PathBuf, Texture>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Load the texture at `path` as `kind`.
    ///
    /// A cache hit only overrides the kind tag of the returned clone. On a
    /// miss the file is read, decoded and uploaded with mipmaps. A file that
    /// cannot be read or decoded is logged and replaced by a 1x1 white
    /// fallback; the failure is not cached, so a later call retries the file.
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        kind: TextureKind,
    ) -> Texture {
        let path = path.as_ref();
        if let Some(existing) = self.entries.get(path) {
            let mut texture = existing.clone();
            texture.kind = kind;
            return texture;
        }

        let label = path.display().to_string();
        let loaded = crate::resources::load_binary(path)
            .and_then(|bytes| Texture::from_bytes(device, queue, &bytes, &label, kind));
        match loaded {
            Ok(mut texture) => {
                texture.path = Some(path.to_path_buf());
                self.entries.insert(path.to_path_buf(), texture.clone());
                texture
            }
            Err(e) => {
                log::error!("Failed to load texture with path {}: {}", label, e);
                Texture::fallback(device, queue, kind)
            }
        }
    }
}
