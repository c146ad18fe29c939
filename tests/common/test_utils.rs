#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Write a solid-colour RGBA png into `dir` and return its path.
pub fn solid_png(dir: &Path, name: &str, width: u32, height: u32, colour: [u8; 4]) -> PathBuf {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(colour));
    let path = dir.join(name);
    img.save(&path).expect("Failed to write test texture.");
    path
}

/// Write a single-channel png into `dir` and return its path.
pub fn grey_png(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    let img = image::GrayImage::from_pixel(width, height, image::Luma([value]));
    let path = dir.join(name);
    img.save(&path).expect("Failed to write test texture.");
    path
}

#[cfg(feature = "integration-tests")]
pub mod gpu {
    use cgmath::{EuclideanSpace, Matrix4, Point3, Vector3};
    use primshade::context::Context;

    pub fn test_context(width: u32, height: u32) -> Context {
        super::init_logger();
        pollster::block_on(Context::new(width, height))
            .expect("Failed to create a GPU context for integration tests.")
    }

    pub fn read_back(ctx: &Context) -> image::RgbaImage {
        pollster::block_on(ctx.read_pixels()).expect("Failed to read back the colour target.")
    }

    /// Orthographic camera on the +z axis looking at the origin; world x/y
    /// map directly onto normalised device x/y.
    pub fn front_view_proj() -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(
            Point3::new(0.0, 0.0, 3.0),
            Point3::origin(),
            Vector3::unit_y(),
        );
        cgmath::ortho(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0) * view
    }

    /// Orthographic camera above the origin looking straight down; world x/z
    /// map onto normalised device x/-y.
    pub fn top_view_proj() -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(
            Point3::new(0.0, 2.0, 0.0),
            Point3::origin(),
            -Vector3::unit_z(),
        );
        cgmath::ortho(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0) * view
    }
}
