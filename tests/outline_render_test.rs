#![cfg(feature = "integration-tests")]

mod common;

use cgmath::Vector3;
use common::test_utils::gpu;
use primshade::data_structures::material::Material;
use primshade::render::{Draw, ShapeRenderer};
use primshade::shapes::Cuboid;

const RED: Material = Material {
    diffuse: [1.0, 0.0, 0.0],
    specular: [0.5, 0.5, 0.5],
    shininess: 32.0,
};

const CLEAR: image::Rgba<u8> = image::Rgba([0, 0, 0, 255]);
const BASE: image::Rgba<u8> = image::Rgba([255, 0, 0, 255]);

/// A cuboid scaled to 1.9 covers normalised device coordinates up to 0.95 in
/// the front orthographic view; its outline pass reaches 0.9595. At 512x512
/// that puts column 496 inside the shape, column 500 on the outline ring and
/// column 505 in the background.
fn outlined_scene(ctx: &primshade::context::Context) -> Cuboid {
    let mut cuboid = Cuboid::with_material(ctx, Vector3::new(0.0, 0.0, 0.0), RED);
    cuboid.set_size(&ctx.queue, Vector3::new(1.9, 1.9, 1.9));
    cuboid
}

#[test]
fn should_draw_outline_ring_outside_silhouette() {
    let mut ctx = gpu::test_context(512, 512);
    ctx.clear_colour = wgpu::Color::BLACK;
    ctx.set_view_proj(gpu::front_view_proj());
    let renderer = ShapeRenderer::new(&ctx);

    let mut cuboid = outlined_scene(&ctx);
    cuboid.set_outline(&ctx.queue, Some(Vector3::new(0.0, 1.0, 0.0)));
    assert_eq!(cuboid.outline(), Some(Vector3::new(0.0, 1.0, 0.0)));

    renderer.render(&ctx, &[Draw::CuboidOutlined(&cuboid)]);
    let pixels = gpu::read_back(&ctx);

    let outline = image::Rgba([0, 255, 0, 255]);
    assert_eq!(*pixels.get_pixel(496, 256), BASE);
    assert_eq!(*pixels.get_pixel(500, 256), outline);
    assert_eq!(*pixels.get_pixel(505, 256), CLEAR);

    // The ring surrounds the shape on every side.
    assert_eq!(*pixels.get_pixel(11, 256), outline);
    assert_eq!(*pixels.get_pixel(256, 11), outline);
    assert_eq!(*pixels.get_pixel(256, 500), outline);

    // The stencil mask keeps the enlarged pass out of the silhouette.
    assert_eq!(*pixels.get_pixel(256, 256), BASE);
}

#[test]
fn should_outline_with_default_colour_when_unset() {
    let mut ctx = gpu::test_context(512, 512);
    ctx.clear_colour = wgpu::Color::BLACK;
    ctx.set_view_proj(gpu::front_view_proj());
    let renderer = ShapeRenderer::new(&ctx);

    let cuboid = outlined_scene(&ctx);
    renderer.render(&ctx, &[Draw::CuboidOutlined(&cuboid)]);
    let pixels = gpu::read_back(&ctx);

    assert_eq!(*pixels.get_pixel(500, 256), image::Rgba([255, 255, 255, 255]));
    assert_eq!(*pixels.get_pixel(256, 256), BASE);
}

#[test]
fn should_not_outline_a_plain_draw() {
    let mut ctx = gpu::test_context(512, 512);
    ctx.clear_colour = wgpu::Color::BLACK;
    ctx.set_view_proj(gpu::front_view_proj());
    let renderer = ShapeRenderer::new(&ctx);

    let mut cuboid = outlined_scene(&ctx);
    cuboid.set_outline(&ctx.queue, Some(Vector3::new(0.0, 1.0, 0.0)));

    renderer.render(&ctx, &[Draw::Cuboid(&cuboid)]);
    let pixels = gpu::read_back(&ctx);

    assert_eq!(*pixels.get_pixel(496, 256), BASE);
    assert_eq!(*pixels.get_pixel(500, 256), CLEAR);
}

#[test]
fn should_clear_outline_back_to_default() {
    let mut ctx = gpu::test_context(512, 512);
    ctx.clear_colour = wgpu::Color::BLACK;
    ctx.set_view_proj(gpu::front_view_proj());
    let renderer = ShapeRenderer::new(&ctx);

    let mut cuboid = outlined_scene(&ctx);
    cuboid.set_outline(&ctx.queue, Some(Vector3::new(0.0, 1.0, 0.0)));
    cuboid.set_outline(&ctx.queue, None);
    assert_eq!(cuboid.outline(), None);

    renderer.render(&ctx, &[Draw::CuboidOutlined(&cuboid)]);
    let pixels = gpu::read_back(&ctx);

    assert_eq!(*pixels.get_pixel(500, 256), image::Rgba([255, 255, 255, 255]));
}
