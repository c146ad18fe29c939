use primshade::data_structures::texture::{format_for_channels, mip_level_count, TextureKind};
use primshade::resources::texture::{sampler_uniform_name, sampler_uniform_names};
use primshade::resources::obj_texture;

#[test]
fn sampler_names_are_type_indexed() {
    assert_eq!(
        sampler_uniform_name(TextureKind::Diffuse, 1),
        "texture_diffuse1"
    );
    assert_eq!(
        sampler_uniform_name(TextureKind::Specular, 2),
        "texture_specular2"
    );
}

#[test]
fn sampler_names_count_per_kind() {
    use TextureKind::{Diffuse, Specular};
    let names = sampler_uniform_names(&[Diffuse, Specular, Diffuse, Specular, Specular]);
    assert_eq!(
        names,
        vec![
            "texture_diffuse1",
            "texture_specular1",
            "texture_diffuse2",
            "texture_specular2",
            "texture_specular3",
        ]
    );
}

#[test]
fn texel_format_follows_channel_count() {
    assert_eq!(format_for_channels(1), wgpu::TextureFormat::R8Unorm);
    // wgpu has no 24-bit format, three channels are expanded to RGBA.
    assert_eq!(format_for_channels(3), wgpu::TextureFormat::Rgba8UnormSrgb);
    assert_eq!(format_for_channels(4), wgpu::TextureFormat::Rgba8UnormSrgb);
}

#[test]
fn mip_chain_reaches_one_by_one() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(2, 2), 2);
    assert_eq!(mip_level_count(256, 256), 9);
    assert_eq!(mip_level_count(300, 200), 9);
    assert_eq!(mip_level_count(640, 480), 10);
}

#[test]
fn obj_material_slots_map_to_texture_kinds() {
    let material = tobj::Material {
        name: "crate".to_string(),
        diffuse_texture: Some("crate_diffuse.png".to_string()),
        specular_texture: Some("crate_specular.png".to_string()),
        ..Default::default()
    };
    assert_eq!(
        obj_texture(&material, TextureKind::Diffuse),
        Some("crate_diffuse.png")
    );
    assert_eq!(
        obj_texture(&material, TextureKind::Specular),
        Some("crate_specular.png")
    );

    let bare = tobj::Material {
        name: "untextured".to_string(),
        ..Default::default()
    };
    assert_eq!(obj_texture(&bare, TextureKind::Diffuse), None);
}
