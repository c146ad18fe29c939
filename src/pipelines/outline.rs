use crate::{
    context::TargetConfig,
    data_structures::{placement::PlacementRaw, vertex::ShapeVertex, vertex::Vertex},
    pipelines::{mk_render_pipeline, stencil_mask_state},
};

/// Colour drawn when a shape has no outline colour set.
pub const DEFAULT_OUTLINE_COLOUR: [f32; 3] = [1.0, 1.0, 1.0];

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OutlineUniform {
    colour: [f32; 3],
    // Uniforms require 16 byte (4 float) spacing, hence the padding field
    _padding: u32,
}

impl OutlineUniform {
    pub fn new(colour: [f32; 3]) -> Self {
        Self {
            colour,
            _padding: 0,
        }
    }
}

pub fn outline_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("outline_bind_group_layout"),
    })
}

/// Pipeline for the second pass of the outline trick: it draws the shape
/// scaled up in a single colour wherever the stencil buffer was not marked by
/// the base pass.
pub fn mk_outline_pipeline(
    device: &wgpu::Device,
    config: &TargetConfig,
    globals_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Outline Pipeline Layout"),
        bind_group_layouts: &[
            Some(globals_bind_group_layout),
            Some(&outline_layout(device)),
        ],
        immediate_size: 0,
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Outline Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shape_outline.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        config.format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        Some(stencil_mask_state()),
        &[ShapeVertex::desc(), PlacementRaw::desc()],
        shader,
    )
}
