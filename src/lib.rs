//! primshade
//!
//! A small rendering library for primitive shapes. It draws cuboids and
//! planes with either flat materials or file-loaded textures through a fixed
//! wgpu pipeline, and supports an outline-highlight effect via a two-pass
//! stencil-buffer trick. Rendering happens into an offscreen colour target
//! owned by the [`context::Context`], so the crate stays free of windowing
//! and input concerns.
//!
//! High-level modules
//! - `context`: central GPU context that owns device/queue, render targets,
//!   the view-projection uniform and the texture cache
//! - `data_structures`: engine data models (vertices, materials, textures,
//!   placements)
//! - `shapes`: cuboid and plane drawables with shared per-type GPU buffers
//! - `pipelines`: definitions for the flat, textured and outline pipelines
//! - `resources`: helpers to load textures and map model-format texture slots
//! - `render`: draw-call recording and the stencil outline pass
//!

pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod shapes;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::*;
