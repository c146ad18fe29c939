//! An axis-aligned unit cuboid, scalable per instance, with optional
//! stencil-outline highlighting.

use cgmath::Vector3;

use crate::{
    context::Context,
    data_structures::{
        material::{Material, Surface},
        placement::Placement,
        texture::Texture,
        vertex::ShapeVertex,
    },
    pipelines::outline::DEFAULT_OUTLINE_COLOUR,
    shapes::{
        mk_outline_binding, mk_placement_buffer, mk_surface_binding, write_placement,
        SharedGeometry, SurfaceBinding,
    },
};

/// A box centred on its position, drawn from a non-indexed 36-vertex table.
///
/// The vertex and placement buffers of all cuboids share one GPU upload; the
/// first constructed instance creates it. An outline colour can be attached,
/// the renderer then draws the shape a second time, slightly enlarged,
/// through the stencil mask left by the first pass.
#[derive(Debug)]
pub struct Cuboid {
    placement: Placement,
    surface: Surface,
    outline: Option<Vector3<f32>>,
    geometry: SharedGeometry,
    placement_buffer: wgpu::Buffer,
    surface_binding: SurfaceBinding,
    outline_buffer: wgpu::Buffer,
    outline_bind_group: wgpu::BindGroup,
}

impl Cuboid {
    pub fn with_material(ctx: &Context, position: Vector3<f32>, material: Material) -> Self {
        Self::new(ctx, position, Surface::Flat(material))
    }

    pub fn with_textures(ctx: &Context, position: Vector3<f32>, textures: Vec<Texture>) -> Self {
        Self::new(ctx, position, Surface::Textured(textures))
    }

    fn new(ctx: &Context, position: Vector3<f32>, surface: Surface) -> Self {
        let geometry = ctx
            .cuboid_geometry
            .get_or_init(|| SharedGeometry::new(&ctx.device, "Cuboid", &CUBOID_VERTICES, None))
            .clone();
        let placement = Placement::new(position);
        let placement_buffer = mk_placement_buffer(&ctx.device, &placement);
        let surface_binding = mk_surface_binding(ctx, &surface, "Cuboid");
        let (outline_buffer, outline_bind_group) =
            mk_outline_binding(&ctx.device, "Cuboid", DEFAULT_OUTLINE_COLOUR);

        Self {
            placement,
            surface,
            outline: None,
            geometry,
            placement_buffer,
            surface_binding,
            outline_buffer,
            outline_bind_group,
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

    /// Set or clear the outline colour. A cleared outline falls back to
    /// [`DEFAULT_OUTLINE_COLOUR`] when an outlined draw is requested anyway.
    pub fn set_outline(&mut self, queue: &wgpu::Queue, outline: Option<Vector3<f32>>) {
        self.outline = outline;
        let colour = outline.map_or(DEFAULT_OUTLINE_COLOUR, Into::into);
        queue.write_buffer(
            &self.outline_buffer,
            0,
            bytemuck::cast_slice(&[crate::pipelines::outline::OutlineUniform::new(colour)]),
        );
    }

    pub fn outline(&self) -> Option<Vector3<f32>> {
        self.outline
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

    pub(crate) fn outline_bind_group(&self) -> &wgpu::BindGroup {
        &self.outline_bind_group
    }
}

/// Six faces, two triangles each, wound consistently with outward normals.
#[rustfmt::skip]
pub const CUBOID_VERTICES: [ShapeVertex; 36] = [
    // back face
    ShapeVertex::new([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
    ShapeVertex::new([ 0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
    ShapeVertex::new([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
    ShapeVertex::new([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
    ShapeVertex::new([-0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
    ShapeVertex::new([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
    // front face
    ShapeVertex::new([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
    ShapeVertex::new([ 0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 0.0]),
    ShapeVertex::new([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
    ShapeVertex::new([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
    ShapeVertex::new([-0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 1.0]),
    ShapeVertex::new([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
    // left face
    ShapeVertex::new([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    ShapeVertex::new([-0.5,  0.5, -0.5], [-1.0,  0.0,  0.0], [1.0, 1.0]),
    ShapeVertex::new([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 1.0]),
    ShapeVertex::new([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 1.0]),
    ShapeVertex::new([-0.5, -0.5,  0.5], [-1.0,  0.0,  0.0], [0.0, 0.0]),
    ShapeVertex::new([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    // right face
    ShapeVertex::new([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
    ShapeVertex::new([ 0.5,  0.5, -0.5], [ 1.0,  0.0,  0.0], [1.0, 1.0]),
    ShapeVertex::new([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
    ShapeVertex::new([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
    ShapeVertex::new([ 0.5, -0.5,  0.5], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
    ShapeVertex::new([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
    // bottom face
    ShapeVertex::new([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
    ShapeVertex::new([ 0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
    ShapeVertex::new([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
    ShapeVertex::new([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
    ShapeVertex::new([-0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
    ShapeVertex::new([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
    // top face
    ShapeVertex::new([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
    ShapeVertex::new([ 0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
    ShapeVertex::new([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
    ShapeVertex::new([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
    ShapeVertex::new([-0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
    ShapeVertex::new([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
];
