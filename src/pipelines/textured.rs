use crate::{
    context::TargetConfig,
    data_structures::{placement::PlacementRaw, vertex::ShapeVertex, vertex::Vertex},
    pipelines::{mk_render_pipeline, stencil_write_state},
    resources::texture::texture_layout,
};

pub fn mk_textured_pipeline(
    device: &wgpu::Device,
    config: &TargetConfig,
    globals_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Textured Pipeline Layout"),
        bind_group_layouts: &[
            Some(globals_bind_group_layout),
            Some(&texture_layout(device)),
        ],
        immediate_size: 0,
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Textured Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shape_textured.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        config.format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        Some(stencil_write_state()),
        &[ShapeVertex::desc(), PlacementRaw::desc()],
        shader,
    )
}
