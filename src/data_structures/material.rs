//! Flat material properties and the surface choice of a shape.

use crate::data_structures::texture::Texture;

/// A flat material: diffuse and specular colour plus a shininess exponent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Material {
    pub fn new(diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
        }
    }

    pub fn to_raw(&self) -> MaterialUniform {
        MaterialUniform {
            diffuse: self.diffuse,
            shininess: self.shininess,
            specular: self.specular,
            _padding: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    diffuse: [f32; 3],
    // Uniforms require 16 byte (4 float) spacing, the shininess scalar fills
    // the slot after the diffuse vec3
    shininess: f32,
    specular: [f32; 3],
    _padding: u32,
}

/// What a shape's pixels are made of: a flat material or a list of textures.
///
/// The two variants correspond to the two shape constructors; the render pass
/// dispatches on the variant to pick the flat or the textured pipeline.
#[derive(Clone, Debug)]
pub enum Surface {
    Flat(Material),
    Textured(Vec<Texture>),
}
