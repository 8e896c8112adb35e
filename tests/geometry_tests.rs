//! Geometry, Camera, and OBJ Loading Tests
//!
//! Tests for:
//! - Primitive generation (cube, indexed cube, plane, sphere)
//! - Tangent-frame construction for normal-mapped boxes
//! - Camera view/projection composition
//! - OBJ loading and axis conversion

use glam::{Mat4, Vec3, Vec4};

use prism::camera::{Camera, CameraKind};
use prism::geometry::{self, ColorVertex};
use prism::obj;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

// ============================================================================
// Cube Generation
// ============================================================================

#[test]
fn cube_has_36_vertices() {
    let cube = geometry::cube();
    assert_eq!(cube.len(), 36);
    assert_eq!(ColorVertex::STRIDE, 40);
}

#[test]
fn cube_corners_stay_on_unit_extent() {
    for vertex in geometry::cube() {
        for axis in 0..3 {
            assert!(approx(vertex.position[axis].abs(), 1.0));
        }
        assert!(approx(vertex.position[3], 1.0));
    }
}

#[test]
fn cube_color_encodes_position() {
    for vertex in geometry::cube() {
        for axis in 0..3 {
            let expected = vertex.position[axis] * 0.5 + 0.5;
            assert!(approx(vertex.color[axis], expected));
        }
    }
}

#[test]
fn cube_indexed_shares_face_corners() {
    let (vertices, indices) = geometry::cube_indexed();
    assert_eq!(vertices.len(), 24);
    assert_eq!(indices.len(), 36);
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
}

#[test]
fn cube_winding_is_counter_clockwise() {
    // Every triangle's face normal must point away from the cube center.
    let (vertices, indices) = geometry::cube_indexed();
    for tri in indices.chunks_exact(3) {
        let p: Vec<Vec3> = tri
            .iter()
            .map(|&i| {
                let v = vertices[i as usize].position;
                Vec3::new(v[0], v[1], v[2])
            })
            .collect();
        let normal = (p[1] - p[0]).cross(p[2] - p[0]);
        let center = (p[0] + p[1] + p[2]) / 3.0;
        assert!(normal.dot(center) > 0.0);
    }
}

// ============================================================================
// Plane and Sphere Generation
// ============================================================================

#[test]
fn plane_grid_counts() {
    let (vertices, indices) = geometry::plane(10.0, 6.0, 4, 5);
    assert_eq!(vertices.len(), 5 * 6);
    assert_eq!(indices.len(), 4 * 5 * 6);
}

#[test]
fn plane_is_flat_with_up_normals() {
    let (vertices, _) = geometry::plane(8.0, 8.0, 2, 2);
    for v in &vertices {
        assert!(approx(v.position[1], 0.0));
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        assert!(v.position[0].abs() <= 4.0 + EPSILON);
        assert!(v.position[2].abs() <= 4.0 + EPSILON);
    }
}

#[test]
fn sphere_vertices_sit_on_radius() {
    let radius = 2.5;
    let (vertices, indices) = geometry::sphere(radius, 16, 8);
    assert_eq!(vertices.len(), 17 * 9);
    assert_eq!(indices.len(), 16 * 8 * 6);
    for v in &vertices {
        let p = Vec3::from_array(v.position);
        let n = Vec3::from_array(v.normal);
        assert!(approx(p.length(), radius));
        assert!(approx(n.length(), 1.0));
        assert!(vec3_approx(p / radius, n));
    }
}

#[test]
fn sphere_clamps_degenerate_tessellation() {
    // Below-minimum slice/stack counts are raised to a valid mesh.
    let (vertices, indices) = geometry::sphere(1.0, 0, 0);
    assert_eq!(vertices.len(), 4 * 3);
    assert_eq!(indices.len(), 3 * 2 * 6);
}

// ============================================================================
// Tangent Frames
// ============================================================================

#[test]
fn box_tangent_frames_are_orthonormal() {
    for v in geometry::box_with_tangents(2.0, 4.0, 1.0) {
        let n = Vec3::from_array(v.normal);
        let t = Vec3::from_array(v.tangent);
        let b = Vec3::from_array(v.bitangent);

        assert!(approx(n.length(), 1.0));
        assert!(approx(t.length(), 1.0));
        assert!(approx(b.length(), 1.0));
        assert!(approx(t.dot(n), 0.0));
        assert!(approx(b.dot(n), 0.0));
        assert!(vec3_approx(t.cross(b), n));
    }
}

#[test]
fn box_extents_follow_dimensions() {
    let mut max = Vec3::ZERO;
    for v in geometry::box_with_tangents(2.0, 4.0, 6.0) {
        max = max.max(Vec3::from_array(v.position));
    }
    assert!(vec3_approx(max, Vec3::new(1.0, 2.0, 3.0)));
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn camera_look_at_translates_after_rotation() {
    let mut camera = Camera::new(CameraKind::LookAt);
    camera.set_rotation(Vec3::new(0.0, 90.0, 0.0));
    camera.set_position(Vec3::new(0.0, 0.0, -5.0));

    // The translation lands in view space regardless of the rotation.
    let origin = camera.view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(approx(origin.z, -5.0));
}

#[test]
fn camera_first_person_rotates_after_translation() {
    let mut camera = Camera::new(CameraKind::FirstPerson);
    camera.set_rotation(Vec3::new(0.0, 90.0, 0.0));
    camera.set_position(Vec3::new(0.0, 0.0, -5.0));

    // The translation itself gets rotated: -5 on Z swings onto X.
    let origin = camera.view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(approx(origin.x, -5.0));
    assert!(approx(origin.z, 0.0));
}

#[test]
fn camera_view_proj_is_projection_times_view() {
    let mut camera = Camera::new(CameraKind::LookAt);
    camera.set_position(Vec3::new(1.0, 2.0, -3.0));
    camera.set_perspective(45.0, 1.5, 0.1, 50.0);

    let expected = camera.projection() * camera.view();
    assert_eq!(camera.view_proj(), expected);
}

#[test]
fn camera_projection_depth_range() {
    let mut camera = Camera::new(CameraKind::LookAt);
    camera.set_perspective(60.0, 1.0, 1.0, 100.0);

    // wgpu clip space: znear maps to depth 0.
    let near = camera.projection() * Vec4::new(0.0, 0.0, -1.0, 1.0);
    assert!(approx(near.z / near.w, 0.0));

    let far = camera.projection() * Vec4::new(0.0, 0.0, -100.0, 1.0);
    assert!(approx(far.z / far.w, 1.0));
}

#[test]
fn camera_default_matrices_are_identity() {
    let camera = Camera::new(CameraKind::LookAt);
    assert_eq!(camera.view(), Mat4::IDENTITY);
    assert_eq!(camera.projection(), Mat4::IDENTITY);
}

// ============================================================================
// OBJ Loading
// ============================================================================

#[test]
fn obj_load_converts_axes_to_y_up() {
    let path = std::env::temp_dir().join("prism_obj_axes_test.obj");
    // One triangle in the source's Z-up convention.
    std::fs::write(
        &path,
        "v 1.0 0.0 0.0\n\
         v 0.0 1.0 0.0\n\
         v 0.0 0.0 1.0\n\
         vn 0.0 0.0 1.0\n\
         f 1//1 2//1 3//1\n",
    )
    .unwrap();

    let vertices = obj::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(vertices.len(), 3);
    // (x, y, z) -> (x, -z, y), normals included
    assert_eq!(vertices[0].position, [1.0, 0.0, 0.0]);
    assert_eq!(vertices[1].position, [0.0, 0.0, 1.0]);
    assert_eq!(vertices[2].position, [0.0, -1.0, 0.0]);
    for v in &vertices {
        assert_eq!(v.normal, [0.0, -1.0, 0.0]);
        assert_eq!(v.color, [1.0, 1.0, 1.0]);
    }
}

#[test]
fn obj_load_missing_normals_default_up() {
    let path = std::env::temp_dir().join("prism_obj_no_normals_test.obj");
    std::fs::write(
        &path,
        "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n",
    )
    .unwrap();

    let vertices = obj::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(vertices.len(), 3);
    for v in &vertices {
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
    }
}

#[test]
fn obj_load_missing_file_is_an_error() {
    assert!(obj::load("no/such/model.obj").is_err());
}

#[test]
fn gem_asset_loads_as_triangles() -> anyhow::Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/assets/gem.obj");
    let vertices = obj::load(path)?;

    // Eight triangular faces, non-indexed.
    assert_eq!(vertices.len(), 24);
    for v in &vertices {
        let n = Vec3::from_array(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-2);
    }
    Ok(())
}
