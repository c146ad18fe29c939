//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU GPU texture
//! resources together with the logical kind and origin path used by the
//! texture cache, and helper methods for uploading decoded images with a full
//! mipmap chain.

use std::path::PathBuf;

use anyhow::*;
use image::GenericImageView;

/// The logical role of a texture when bound to a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
}

impl TextureKind {
    /// The name fragment used by the sampler-binding convention
    /// (`texture_diffuse1`, `texture_specular2`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            TextureKind::Diffuse => "diffuse",
            TextureKind::Specular => "specular",
        }
    }
}

/// A GPU texture with a view, a sampler and its logical identity.
///
/// Wraps WGPU texture objects along with the [`TextureKind`] tag and the
/// file path the pixels came from. The wgpu handles are internally
/// reference-counted, so cloning a `Texture` shares the GPU resource; the
/// texture cache relies on this to hand out retagged clones of one upload.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub kind: TextureKind,
    /// Origin file, used as the cache key. `None` for generated textures.
    pub path: Option<PathBuf>,
}

/// Pick the texel format for a decoded image by its channel count.
///
/// Single-channel images stay single-channel on the GPU. wgpu has no 24-bit
/// texel format, so three-channel images are expanded to RGBA on upload.
pub fn format_for_channels(channels: u8) -> wgpu::TextureFormat {
    match channels {
        1 => wgpu::TextureFormat::R8Unorm,
        _ => wgpu::TextureFormat::Rgba8UnormSrgb,
    }
}

/// Number of mip levels for a full chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

impl Texture {
    /// Load a texture from raw byte data (image file contents).
    ///
    /// The image is flipped vertically, uploaded with a full mipmap chain and
    /// sampled with repeat wrap and trilinear filtering.
    ///
    /// # Arguments
    ///
    /// * `bytes` represent raw image file data (PNG, JPEG, etc.)
    /// * `label` is used as a debug name for the GPU resource
    /// * `kind` is the logical role the texture is loaded as
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
        kind: TextureKind,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(device, queue, &img, Some(label), kind)
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
        kind: TextureKind,
    ) -> Result<Self> {
        // Vertical flip on load is always on; image files store rows
        // top-down while the shape texture coordinates start at the bottom.
        let img = img.flipv();
        let dimensions = img.dimensions();
        let format = format_for_channels(img.color().channel_count());
        let mip_count = mip_level_count(dimensions.0, dimensions.1);

        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: mip_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // wgpu has no equivalent of glGenerateMipmap, so every level of the
        // chain is downscaled on the CPU and uploaded separately.
        let mut level = img;
        for mip in 0..mip_count {
            let (width, height) = level.dimensions();
            let (bytes, bytes_per_pixel) = match format {
                wgpu::TextureFormat::R8Unorm => (level.to_luma8().into_raw(), 1),
                _ => (level.to_rgba8().into_raw(), 4),
            };
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: mip,
                    origin: wgpu::Origin3d::ZERO,
                },
                &bytes,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_pixel * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
            if mip + 1 < mip_count {
                level = level.resize_exact(
                    (width / 2).max(1),
                    (height / 2).max(1),
                    image::imageops::FilterType::Triangle,
                );
            }
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_default_sampler(device);

        Ok(Self {
            texture,
            view,
            sampler,
            kind,
            path: None,
        })
    }

    /// Create a 1x1 opaque white texture of the given kind.
    ///
    /// Returned when a texture file cannot be decoded and bound in place of a
    /// missing specular slot, so a shape never ends up with an unset handle.
    pub fn fallback(device: &wgpu::Device, queue: &wgpu::Queue, kind: TextureKind) -> Self {
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("fallback texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &[255, 255, 255, 255],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_default_sampler(device);
        Self {
            texture,
            view,
            sampler,
            kind,
            path: None,
        }
    }
}

pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}
