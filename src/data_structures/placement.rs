//! Placement transformation data for GPU rendering.
//!
//! Every shape carries a translate-then-scale transform. The transform is
//! stored as a GPU buffer at instance rate and consumed by the vertex shader,
//! so moving or resizing a shape only rewrites a small buffer instead of
//! touching vertex data.

use crate::data_structures::vertex::Vertex;

/// A shape transform: position and non-uniform scale.
///
/// Rendered shapes apply the translation first, then the scale, which keeps
/// the unit-sized geometry tables centred where the shape was placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: cgmath::Vector3<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Placement {
    /// Create a placement at `position` with unit scale.
    pub fn new(position: cgmath::Vector3<f32>) -> Self {
        Self {
            position,
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn to_raw(&self) -> PlacementRaw {
        PlacementRaw {
            model: self.to_matrix().into(),
        }
    }

    /// The same placement with its scale multiplied by `factor`.
    ///
    /// Used for the second entry of a shape's placement buffer, which the
    /// outline pass draws slightly enlarged.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            position: self.position,
            scale: self.scale * factor,
        }
    }
}

impl From<cgmath::Vector3<f32>> for Placement {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Placement::new(position)
    }
}

/**
 * The raw placement is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlacementRaw {
    model: [[f32; 4]; 4],
}

/**
 * As we store placement data directly in the GPU memory we need to tell what
 * the bytes refer to:
 *
 * offset: zero as we want to use the full space.
 * stride: length of a placement
 *
 * Stride layout here: the model matrix as 4x4 (hence the four 4d vectors)
 */
impl Vertex for PlacementRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<PlacementRaw>() as wgpu::BufferAddress,
            // We need to switch from using a step mode of Vertex to Instance
            // so the shader only advances to the next placement per drawn
            // instance rather than per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // A mat4 takes up 4 vertex slots as it is technically 4 vec4s.
                // We need to define a slot for each vec4.
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    // corresponds to the @location in the shader file.
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
