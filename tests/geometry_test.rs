use cgmath::{InnerSpace, Vector3, Vector4};
use primshade::data_structures::placement::{Placement, PlacementRaw};
use primshade::data_structures::vertex::{ShapeVertex, Vertex};
use primshade::shapes::cuboid::CUBOID_VERTICES;
use primshade::shapes::plane::{PLANE_INDICES, PLANE_VERTICES};
use primshade::shapes::OUTLINE_SCALE;

#[test]
fn cuboid_table_has_six_faces_of_two_triangles() {
    assert_eq!(CUBOID_VERTICES.len(), 36);

    // Every face is one chunk of 6 vertices sharing a single outward normal.
    let face_normals: Vec<[f32; 3]> = CUBOID_VERTICES
        .chunks(6)
        .map(|face| {
            let normal = face[0].normal;
            for vertex in face {
                assert_eq!(vertex.normal, normal);
            }
            normal
        })
        .collect();
    assert_eq!(face_normals.len(), 6);

    // The six normals are the distinct unit axis directions.
    for normal in &face_normals {
        let normal = Vector3::from(*normal);
        assert!((normal.magnitude() - 1.0).abs() < 1e-6);
    }
    for axis in 0..3 {
        for sign in [-1.0, 1.0] {
            let mut expected = [0.0; 3];
            expected[axis] = sign;
            assert!(face_normals.contains(&expected));
        }
    }
}

#[test]
fn cuboid_is_a_unit_box_around_the_origin() {
    for vertex in &CUBOID_VERTICES {
        for coordinate in vertex.position {
            assert_eq!(coordinate.abs(), 0.5);
        }
        for uv in vertex.tex_coords {
            assert!((0.0..=1.0).contains(&uv));
        }
    }
}

#[test]
fn plane_indices_cover_the_quad_in_two_triangles() {
    assert_eq!(PLANE_VERTICES.len(), 4);
    assert_eq!(PLANE_INDICES, [0, 1, 2, 3, 0, 2]);
    assert!(PLANE_INDICES.iter().all(|i| (*i as usize) < PLANE_VERTICES.len()));
}

#[test]
fn plane_points_up_and_tiles_twice() {
    let mut max_uv: f32 = 0.0;
    for vertex in &PLANE_VERTICES {
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertex.position[1], 0.0);
        max_uv = max_uv.max(vertex.tex_coords[0]).max(vertex.tex_coords[1]);
    }
    // Repeat-wrapped textures tile twice across the quad.
    assert_eq!(max_uv, 2.0);
}

#[test]
fn placement_translates_then_scales() {
    let mut placement = Placement::new(Vector3::new(1.0, 2.0, 3.0));
    placement.scale = Vector3::new(2.0, 3.0, 4.0);

    let matrix = placement.to_matrix();
    let origin = matrix * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert_eq!(origin, Vector4::new(1.0, 2.0, 3.0, 1.0));

    // A unit corner ends up at position + scale, so the scale is applied in
    // the shape's local space before the translation.
    let corner = matrix * Vector4::new(1.0, 1.0, 1.0, 1.0);
    assert_eq!(corner, Vector4::new(3.0, 5.0, 7.0, 1.0));
}

#[test]
fn outline_placement_is_one_percent_larger() {
    let mut placement = Placement::new(Vector3::new(0.0, 1.0, 0.0));
    placement.scale = Vector3::new(2.0, 2.0, 2.0);

    let outline = placement.scaled(OUTLINE_SCALE);
    assert_eq!(outline.position, placement.position);
    assert_eq!(outline.scale, Vector3::new(2.02, 2.02, 2.02));
}

#[test]
fn vertex_layouts_match_their_pod_types() {
    let vertex_layout = ShapeVertex::desc();
    assert_eq!(
        vertex_layout.array_stride,
        std::mem::size_of::<ShapeVertex>() as u64
    );
    assert_eq!(vertex_layout.attributes.len(), 3);
    assert_eq!(vertex_layout.step_mode, wgpu::VertexStepMode::Vertex);

    let placement_layout = PlacementRaw::desc();
    assert_eq!(
        placement_layout.array_stride,
        std::mem::size_of::<PlacementRaw>() as u64
    );
    assert_eq!(placement_layout.attributes.len(), 4);
    assert_eq!(placement_layout.step_mode, wgpu::VertexStepMode::Instance);
}
