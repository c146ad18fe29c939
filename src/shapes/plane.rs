//! A ground quad in the XZ plane, drawn through an index buffer.

use cgmath::Vector3;

use crate::{
    context::Context,
    data_structures::{
        material::{Material, Surface},
        placement::Placement,
        texture::Texture,
        vertex::ShapeVertex,
    },
    shapes::{
        mk_placement_buffer, mk_surface_binding, write_placement, SharedGeometry, SurfaceBinding,
    },
};

/// A flat quad centred on its position, facing up.
///
/// Texture coordinates run to 2.0 so a repeat-wrapped texture tiles twice
/// across the quad. Like the cuboid, all planes share one vertex and index
/// buffer upload triggered by the first instance.
#[derive(Debug)]
pub struct Plane {
    placement: Placement,
    surface: Surface,
    geometry: SharedGeometry,
    placement_buffer: wgpu::Buffer,
    surface_binding: SurfaceBinding,
}

impl Plane {
    pub fn with_material(ctx: &Context, position: Vector3<f32>, material: Material) -> Self {
        Self::new(ctx, position, Surface::Flat(material))
    }

    pub fn with_textures(ctx: &Context, position: Vector3<f32>, textures: Vec<Texture>) -> Self {
        Self::new(ctx, position, Surface::Textured(textures))
    }

    fn new(ctx: &Context, position: Vector3<f32>, surface: Surface) -> Self {
        let geometry = ctx
            .plane_geometry
            .get_or_init(|| {
                SharedGeometry::new(&ctx.device, "Plane", &PLANE_VERTICES, Some(&PLANE_INDICES))
            })
            .clone();
        let placement = Placement::new(position);
        let placement_buffer = mk_placement_buffer(&ctx.device, &placement);
        let surface_binding = mk_surface_binding(ctx, &surface, "Plane");

        Self {
            placement,
            surface,
            geometry,
            placement_buffer,
            surface_binding,
        }
    }

    pub fn set_size(&mut self, queue: &wgpu::Queue, size: Vector3<f32>) {
        self.placement.scale = size;
        write_placement(queue, &self.placement_buffer, &self.placement);
    }

    pub fn size(&self) -> Vector3<f32> {
        self.placement.scale
    }

    pub fn set_position(&mut self, queue: &wgpu::Queue, position: Vector3<f32>) {
        self.placement.position = position;
        write_placement(queue, &self.placement_buffer, &self.placement);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.placement.position
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub(crate) fn geometry(&self) -> &SharedGeometry {
        &self.geometry
    }

    pub(crate) fn placement_buffer(&self) -> &wgpu::Buffer {
        &self.placement_buffer
    }

    pub(crate) fn surface_binding(&self) -> &SurfaceBinding {
        &self.surface_binding
    }
}

#[rustfmt::skip]
pub const PLANE_VERTICES: [ShapeVertex; 4] = [
    ShapeVertex::new([ 0.5, 0.0, -0.5], [0.0, 1.0, 0.0], [2.0, 2.0]),
    ShapeVertex::new([ 0.5, 0.0,  0.5], [0.0, 1.0, 0.0], [2.0, 0.0]),
    ShapeVertex::new([-0.5, 0.0,  0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    ShapeVertex::new([-0.5, 0.0, -0.5], [0.0, 1.0, 0.0], [0.0, 2.0]),
];

pub const PLANE_INDICES: [u32; 6] = [0, 1, 2, 3, 0, 2];
