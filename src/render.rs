//! Draw-call recording for shapes.
//!
//! This module defines [`Draw`], which callers use to specify what a frame
//! should contain, and [`ShapeRenderer`], which owns the three pipelines and
//! records one render pass per frame. Outlined cuboids are drawn with a
//! two-pass stencil trick inside that same pass.
//!
//! # Key types
//!
//! - [`Draw<'a>`] is the per-frame description of a renderable shape
//! - [`ShapeRenderer`] builds the pipelines once and replays draws
//! - [`DrawShape`] extends `wgpu::RenderPass` with shape draw calls

use crate::{
    context::Context,
    pipelines::{flat::mk_flat_pipeline, outline::mk_outline_pipeline, textured::mk_textured_pipeline},
    shapes::{Cuboid, Plane, SurfaceBinding},
};

/// Reference value written to the stencil buffer by the base pass of an
/// outlined draw and tested against by the outline pass.
const OUTLINE_STENCIL_REFERENCE: u32 = 1;

/// Specifies how a shape should be rendered this frame.
///
/// `CuboidOutlined` requests the stencil outline: the shape is drawn
/// normally, then once more slightly enlarged in its outline colour,
/// restricted to the pixels outside its own silhouette.
pub enum Draw<'a> {
    Cuboid(&'a Cuboid),
    CuboidOutlined(&'a Cuboid),
    Plane(&'a Plane),
}

/// Owns the flat, textured and outline pipelines for a context.
#[derive(Debug)]
pub struct ShapeRenderer {
    pub flat_pipeline: wgpu::RenderPipeline,
    pub textured_pipeline: wgpu::RenderPipeline,
    pub outline_pipeline: wgpu::RenderPipeline,
}

impl ShapeRenderer {
    pub fn new(ctx: &Context) -> Self {
        Self {
            flat_pipeline: mk_flat_pipeline(
                &ctx.device,
                &ctx.config,
                &ctx.globals.bind_group_layout,
            ),
            textured_pipeline: mk_textured_pipeline(
                &ctx.device,
                &ctx.config,
                &ctx.globals.bind_group_layout,
            ),
            outline_pipeline: mk_outline_pipeline(
                &ctx.device,
                &ctx.config,
                &ctx.globals.bind_group_layout,
            ),
        }
    }

    /// Record and submit one frame.
    ///
    /// Clears the colour, depth and stencil targets, then draws every entry
    /// of `draws` in program order.
    pub fn render(&self, ctx: &Context, draws: &[Draw]) {
        let mut encoder: wgpu::CommandEncoder =
            ctx.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &ctx.colour_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &ctx.depth_stencil_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(0),
                            store: wgpu::StoreOp::Store,
                        }),
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                    multiview_mask: None,
                });

            render_pass.set_bind_group(0, &ctx.globals.bind_group, &[]);

            for draw in draws {
                match draw {
                    Draw::Cuboid(cuboid) => render_pass.draw_cuboid(cuboid, self),
                    Draw::CuboidOutlined(cuboid) => {
                        render_pass.draw_cuboid_outlined(cuboid, self)
                    }
                    Draw::Plane(plane) => render_pass.draw_plane(plane, self),
                }
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
    }
}

/// Shape draw calls on a render pass.
///
/// The globals bind group (group 0) must already be set; these calls bind
/// the pipeline, the surface resources and the vertex/placement buffers.
pub trait DrawShape {
    fn draw_cuboid(&mut self, cuboid: &Cuboid, renderer: &ShapeRenderer);
    fn draw_cuboid_outlined(&mut self, cuboid: &Cuboid, renderer: &ShapeRenderer);
    fn draw_plane(&mut self, plane: &Plane, renderer: &ShapeRenderer);
}

impl DrawShape for wgpu::RenderPass<'_> {
    fn draw_cuboid(&mut self, cuboid: &Cuboid, renderer: &ShapeRenderer) {
        set_surface_pipeline(self, cuboid.surface_binding(), renderer);
        self.set_vertex_buffer(0, cuboid.geometry().vertex_buffer.slice(..));
        self.set_vertex_buffer(1, cuboid.placement_buffer().slice(..));
        self.draw(0..cuboid.geometry().element_count, 0..1);
    }

    fn draw_cuboid_outlined(&mut self, cuboid: &Cuboid, renderer: &ShapeRenderer) {
        // Pass 1: draw normally while marking every covered pixel in the
        // stencil buffer with the reference value.
        self.set_stencil_reference(OUTLINE_STENCIL_REFERENCE);
        self.draw_cuboid(cuboid, renderer);

        // Pass 2: draw the shape enlarged with the outline pipeline, which
        // only touches pixels whose stencil value differs from the
        // reference. Entry 1 of the placement buffer holds the enlarged
        // transform, so the buffer is bound starting there.
        let placement_stride =
            std::mem::size_of::<crate::data_structures::placement::PlacementRaw>()
                as wgpu::BufferAddress;
        self.set_pipeline(&renderer.outline_pipeline);
        self.set_bind_group(1, cuboid.outline_bind_group(), &[]);
        self.set_vertex_buffer(0, cuboid.geometry().vertex_buffer.slice(..));
        self.set_vertex_buffer(1, cuboid.placement_buffer().slice(placement_stride..));
        self.draw(0..cuboid.geometry().element_count, 0..1);

        self.set_stencil_reference(0);
    }

    fn draw_plane(&mut self, plane: &Plane, renderer: &ShapeRenderer) {
        set_surface_pipeline(self, plane.surface_binding(), renderer);
        let geometry = plane.geometry();
        self.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
        self.set_vertex_buffer(1, plane.placement_buffer().slice(..));
        // A plane always has an index buffer, its geometry table is indexed.
        let index_buffer = geometry
            .index_buffer
            .as_ref()
            .expect("plane geometry is indexed");
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..geometry.element_count, 0, 0..1);
    }
}

fn set_surface_pipeline(
    render_pass: &mut wgpu::RenderPass<'_>,
    binding: &SurfaceBinding,
    renderer: &ShapeRenderer,
) {
    match binding {
        SurfaceBinding::Flat { .. } => render_pass.set_pipeline(&renderer.flat_pipeline),
        SurfaceBinding::Textured { .. } => render_pass.set_pipeline(&renderer.textured_pipeline),
    }
    render_pass.set_bind_group(1, binding.bind_group(), &[]);
}
