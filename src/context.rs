//! Central GPU context.
//!
//! [`Context`] owns the wgpu device and queue, the offscreen colour and
//! depth-stencil targets, the view-projection uniform bound at group 0 of
//! every pipeline, the texture cache and the lazily created shared shape
//! geometry. The context renders without a surface, so no windowing library
//! is involved.

use std::cell::OnceCell;

use wgpu::util::DeviceExt;

use crate::{
    data_structures::texture::{Texture, TextureKind},
    resources::texture::TextureCache,
    shapes::SharedGeometry,
};

/// Format of the offscreen colour target.
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Combined depth and stencil format; the stencil part carries the outline
/// silhouette mask.
pub const DEPTH_STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Conversion from the OpenGL clip-space conventions used by cgmath's
/// projection helpers (z in -1..1) to wgpu's (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Dimensions and format of the render targets.
#[derive(Clone, Copy, Debug)]
pub struct TargetConfig {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
}

impl GlobalsUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    /// Store a view-projection matrix built with cgmath's OpenGL-style
    /// projection helpers; the clip-space correction is applied here.
    pub fn update_view_proj(&mut self, view_proj: cgmath::Matrix4<f32>) {
        self.view_proj = (OPENGL_TO_WGPU_MATRIX * view_proj).into();
    }
}

impl Default for GlobalsUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// The GPU resources behind the group-0 globals binding.
#[derive(Debug)]
pub struct GlobalsResources {
    pub uniform: GlobalsUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

pub fn globals_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("globals_bind_group_layout"),
    })
}

#[derive(Debug)]
pub struct Context {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: TargetConfig,
    pub clear_colour: wgpu::Color,
    pub globals: GlobalsResources,
    pub textures: TextureCache,
    /// The offscreen texture every frame is rendered into.
    pub colour_target: wgpu::Texture,
    pub colour_view: wgpu::TextureView,
    pub(crate) depth_stencil_view: wgpu::TextureView,
    // Shared geometry is created by the first instance of each shape type
    // and lives for the rest of the process. The cells also make `Context`
    // !Sync, which matches the single-threaded contract of the whole crate.
    pub(crate) cuboid_geometry: OnceCell<SharedGeometry>,
    pub(crate) plane_geometry: OnceCell<SharedGeometry>,
    white_texture: OnceCell<Texture>,
}

impl Context {
    pub async fn new(width: u32, height: u32) -> anyhow::Result<Self> {
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: Default::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let config = TargetConfig {
            width,
            height,
            format: TARGET_FORMAT,
        };

        let (colour_target, colour_view) = create_colour_target(&device, &config);
        let depth_stencil_view = create_depth_stencil_target(&device, &config);

        let uniform = GlobalsUniform::new();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = globals_layout(&device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("globals_bind_group"),
        });
        let globals = GlobalsResources {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        };

        Ok(Self {
            device,
            queue,
            config,
            clear_colour: wgpu::Color::BLACK,
            globals,
            textures: TextureCache::new(),
            colour_target,
            colour_view,
            depth_stencil_view,
            cuboid_geometry: OnceCell::new(),
            plane_geometry: OnceCell::new(),
            white_texture: OnceCell::new(),
        })
    }

    /// Upload a new view-projection matrix for subsequent draws.
    pub fn set_view_proj(&mut self, view_proj: cgmath::Matrix4<f32>) {
        self.globals.uniform.update_view_proj(view_proj);
        self.queue.write_buffer(
            &self.globals.buffer,
            0,
            bytemuck::cast_slice(&[self.globals.uniform]),
        );
    }

    /// Recreate the render targets at a new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            let (colour_target, colour_view) = create_colour_target(&self.device, &self.config);
            self.colour_target = colour_target;
            self.colour_view = colour_view;
            self.depth_stencil_view = create_depth_stencil_target(&self.device, &self.config);
        }
    }

    /// Shared 1x1 white texture, bound wherever a specular slot is missing.
    pub fn white_texture(&self) -> &Texture {
        self.white_texture
            .get_or_init(|| Texture::fallback(&self.device, &self.queue, TextureKind::Specular))
    }

    /// Copy the colour target back to the CPU.
    ///
    /// Only compiled for integration tests; the copy pads every row to the
    /// 256-byte alignment wgpu requires and strips the padding again after
    /// the buffer is mapped.
    #[cfg(feature = "integration-tests")]
    pub async fn read_pixels(&self) -> anyhow::Result<image::RgbaImage> {
        use anyhow::Context as _;

        let width = self.config.width;
        let height = self.config.height;
        let unpadded_bytes_per_row = 4 * width;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Pixel Readback Buffer"),
            size: (padded_bytes_per_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.colour_target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).unwrap();
        });
        self.device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(std::time::Duration::from_secs(3)),
        })?;
        rx.receive().await.context("map_async callback dropped")??;

        let data = buffer_slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
        for row in data.chunks(padded_bytes_per_row as usize) {
            pixels.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
        }
        drop(data);
        output_buffer.unmap();

        image::RgbaImage::from_raw(width, height, pixels)
            .context("readback buffer did not match the target dimensions")
    }
}

fn create_colour_target(
    device: &wgpu::Device,
    config: &TargetConfig,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("colour_target"),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_depth_stencil_target(device: &wgpu::Device, config: &TargetConfig) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_stencil_target"),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_STENCIL_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[DEPTH_STENCIL_FORMAT],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
