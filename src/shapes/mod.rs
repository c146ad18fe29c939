//! Primitive shape drawables.
//!
//! - `cuboid` is an axis-aligned box drawn from a 36-vertex table; it is the
//!   only shape that supports the stencil outline
//! - `plane` is a ground quad drawn through an index buffer
//!
//! All instances of a shape type share one set of GPU buffers. The first
//! instance created against a [`Context`] triggers the upload; later
//! instances clone the buffer handles. There is no teardown, the buffers
//! live for the rest of the process.

use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{
        material::Surface,
        placement::Placement,
        texture::{Texture, TextureKind},
        vertex::ShapeVertex,
    },
    pipelines::{flat::material_layout, outline::OutlineUniform, outline::outline_layout},
    resources::texture::{sampler_uniform_names, texture_layout},
};

pub mod cuboid;
pub mod plane;

pub use cuboid::Cuboid;
pub use plane::Plane;

/// Scale factor of the second outline pass.
pub const OUTLINE_SCALE: f32 = 1.01;

/// Per-shape-type GPU geometry, shared by every instance of that type.
///
/// The wgpu buffers are internally reference-counted; cloning this struct
/// clones handles, not data.
#[derive(Clone, Debug)]
pub struct SharedGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    /// Vertices for a non-indexed draw, indices otherwise.
    pub element_count: u32,
}

impl SharedGeometry {
    pub(crate) fn new(
        device: &wgpu::Device,
        label: &str,
        vertices: &[ShapeVertex],
        indices: Option<&[u32]>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = indices.map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        let element_count = indices.map_or(vertices.len(), <[u32]>::len) as u32;
        Self {
            vertex_buffer,
            index_buffer,
            element_count,
        }
    }
}

/// The bound GPU side of a [`Surface`]: a material uniform or a texture set.
#[derive(Debug)]
pub(crate) enum SurfaceBinding {
    Flat {
        bind_group: wgpu::BindGroup,
        // Kept alive for the bind group; never rewritten, materials are
        // immutable once a shape is built.
        _buffer: wgpu::Buffer,
    },
    Textured {
        bind_group: wgpu::BindGroup,
    },
}

impl SurfaceBinding {
    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        match self {
            SurfaceBinding::Flat { bind_group, .. } => bind_group,
            SurfaceBinding::Textured { bind_group } => bind_group,
        }
    }
}

pub(crate) fn mk_surface_binding(ctx: &Context, surface: &Surface, label: &str) -> SurfaceBinding {
    match surface {
        Surface::Flat(material) => {
            let buffer = ctx
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} Material Buffer")),
                    contents: bytemuck::cast_slice(&[material.to_raw()]),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &material_layout(&ctx.device),
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some(&format!("{label} material_bind_group")),
            });
            SurfaceBinding::Flat {
                bind_group,
                _buffer: buffer,
            }
        }
        Surface::Textured(textures) => {
            let diffuse = first_of_kind(textures, TextureKind::Diffuse);
            let specular = first_of_kind(textures, TextureKind::Specular);
            let bound = diffuse.is_some() as usize + specular.is_some() as usize;
            if textures.len() > bound {
                let kinds: Vec<TextureKind> = textures.iter().map(|t| t.kind).collect();
                log::warn!(
                    "{label}: the fixed pipeline binds one texture per kind; ignoring {:?}",
                    &sampler_uniform_names(&kinds)[bound..]
                );
            }
            let white = ctx.white_texture();
            let diffuse = diffuse.unwrap_or_else(|| {
                log::warn!("{label}: no diffuse texture supplied, binding plain white");
                white
            });
            let specular = specular.unwrap_or(white);
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &texture_layout(&ctx.device),
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&diffuse.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&diffuse.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&specular.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(&specular.sampler),
                    },
                ],
                label: Some(&format!("{label} texture_bind_group")),
            });
            SurfaceBinding::Textured { bind_group }
        }
    }
}

fn first_of_kind(textures: &[Texture], kind: TextureKind) -> Option<&Texture> {
    textures.iter().find(|texture| texture.kind == kind)
}

/// Placement buffer of a shape: entry 0 is the base transform, entry 1 the
/// outline transform enlarged by [`OUTLINE_SCALE`].
pub(crate) fn mk_placement_buffer(device: &wgpu::Device, placement: &Placement) -> wgpu::Buffer {
    let data = [
        placement.to_raw(),
        placement.scaled(OUTLINE_SCALE).to_raw(),
    ];
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Placement Buffer"),
        contents: bytemuck::cast_slice(&data),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    })
}

pub(crate) fn write_placement(queue: &wgpu::Queue, buffer: &wgpu::Buffer, placement: &Placement) {
    let data = [
        placement.to_raw(),
        placement.scaled(OUTLINE_SCALE).to_raw(),
    ];
    queue.write_buffer(buffer, 0, bytemuck::cast_slice(&data));
}

pub(crate) fn mk_outline_binding(
    device: &wgpu::Device,
    label: &str,
    colour: [f32; 3],
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} Outline Buffer")),
        contents: bytemuck::cast_slice(&[OutlineUniform::new(colour)]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &outline_layout(device),
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(&format!("{label} outline_bind_group")),
    });
    (buffer, bind_group)
}
