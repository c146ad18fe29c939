//! Engine data structures: vertices, materials, textures and placements.
//!
//! This module contains the core data types for shape representation:
//!
//! - `vertex` contains the upload-ready vertex type and its buffer layout
//! - `material` contains flat material properties and the surface choice
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `placement` holds per-shape transformation data uploaded at instance rate

pub mod material;
pub mod placement;
pub mod texture;
pub mod vertex;
