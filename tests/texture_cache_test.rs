#![cfg(feature = "integration-tests")]

mod common;

use common::test_utils::{self, gpu};
use primshade::data_structures::texture::TextureKind;
use primshade::resources::{load_mtl, load_obj_textures, obj_texture};

#[test]
fn should_retag_kind_on_cache_hit() {
    let ctx = gpu::test_context(16, 16);
    let dir = tempfile::tempdir().unwrap();
    let path = test_utils::solid_png(dir.path(), "red.png", 4, 4, [255, 0, 0, 255]);

    let mut cache = primshade::resources::texture::TextureCache::new();
    let first = cache.load(&ctx.device, &ctx.queue, &path, TextureKind::Diffuse);
    let second = cache.load(&ctx.device, &ctx.queue, &path, TextureKind::Specular);

    // One upload, two logical tags.
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&path));
    assert_eq!(first.kind, TextureKind::Diffuse);
    assert_eq!(second.kind, TextureKind::Specular);
    assert_eq!(first.path.as_deref(), Some(path.as_path()));
    assert_eq!(second.path.as_deref(), Some(path.as_path()));
    assert_eq!(first.texture.size(), second.texture.size());
}

#[test]
fn should_fall_back_on_missing_file() {
    let ctx = gpu::test_context(16, 16);
    let mut cache = primshade::resources::texture::TextureCache::new();

    let texture = cache.load(
        &ctx.device,
        &ctx.queue,
        "does/not/exist.png",
        TextureKind::Diffuse,
    );

    // The failure is logged and replaced by the 1x1 fallback; nothing is
    // cached so a fixed file can be picked up later.
    assert_eq!(texture.kind, TextureKind::Diffuse);
    assert_eq!(texture.path, None);
    assert_eq!(texture.texture.size().width, 1);
    assert_eq!(texture.texture.size().height, 1);
    assert!(cache.is_empty());
}

#[test]
fn should_pick_texel_format_by_decoded_channels() {
    let ctx = gpu::test_context(16, 16);
    let dir = tempfile::tempdir().unwrap();
    let grey = test_utils::grey_png(dir.path(), "grey.png", 4, 4, 128);
    let rgba = test_utils::solid_png(dir.path(), "rgba.png", 4, 4, [0, 255, 0, 255]);

    let mut cache = primshade::resources::texture::TextureCache::new();
    let grey = cache.load(&ctx.device, &ctx.queue, &grey, TextureKind::Diffuse);
    let rgba = cache.load(&ctx.device, &ctx.queue, &rgba, TextureKind::Diffuse);

    assert_eq!(grey.texture.format(), wgpu::TextureFormat::R8Unorm);
    assert_eq!(rgba.texture.format(), wgpu::TextureFormat::Rgba8UnormSrgb);
}

#[test]
fn should_generate_a_full_mip_chain() {
    let ctx = gpu::test_context(16, 16);
    let dir = tempfile::tempdir().unwrap();
    let path = test_utils::solid_png(dir.path(), "mips.png", 8, 8, [1, 2, 3, 255]);

    let mut cache = primshade::resources::texture::TextureCache::new();
    let texture = cache.load(&ctx.device, &ctx.queue, &path, TextureKind::Diffuse);

    // 8x8 -> 4x4 -> 2x2 -> 1x1
    assert_eq!(texture.texture.mip_level_count(), 4);
}

#[test]
fn should_load_typed_textures_from_an_mtl_material() {
    let ctx = gpu::test_context(16, 16);
    let dir = tempfile::tempdir().unwrap();
    test_utils::solid_png(dir.path(), "crate_diffuse.png", 4, 4, [255, 0, 0, 255]);
    test_utils::solid_png(dir.path(), "crate_specular.png", 4, 4, [64, 64, 64, 255]);
    let mtl_path = dir.path().join("crate.mtl");
    std::fs::write(
        &mtl_path,
        "newmtl crate\nmap_Kd crate_diffuse.png\nmap_Ks crate_specular.png\n",
    )
    .unwrap();

    let materials = load_mtl(&mtl_path).unwrap();
    assert_eq!(materials.len(), 1);
    assert_eq!(
        obj_texture(&materials[0], TextureKind::Diffuse),
        Some("crate_diffuse.png")
    );

    let mut cache = primshade::resources::texture::TextureCache::new();
    let textures = load_obj_textures(
        &mut cache,
        &ctx.device,
        &ctx.queue,
        &materials[0],
        dir.path(),
    );

    assert_eq!(textures.len(), 2);
    assert_eq!(textures[0].kind, TextureKind::Diffuse);
    assert_eq!(textures[1].kind, TextureKind::Specular);
    assert_eq!(cache.len(), 2);
}
