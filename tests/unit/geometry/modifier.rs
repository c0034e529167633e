use super::*;
use crate::foundation::core::ObjectId;
use crate::mesh::grid::{GridMesh, MeshData};
use crate::scene::object::Part;

fn sample_points() -> Vec<Vec3> {
    vec![
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.5),
        Vec3::new(-2.0, 2.5, 1.0),
        Vec3::new(0.3, -1.5, -0.7),
    ]
}

fn plane() -> SceneObject {
    SceneObject::generated(
        ObjectId(1),
        "p",
        GridMesh::flat(4.0, 4.0, 4, 4).unwrap(),
        "img",
    )
}

#[test]
fn twist_rotates_about_y_by_height() {
    let mut pts = vec![Vec3::new(1.0, std::f32::consts::PI, 0.0)];
    twist(&mut pts);
    // angle = pi/2: (1, 0) -> (0, 1)
    assert!(pts[0].x.abs() < 1e-6);
    assert!((pts[0].z - 1.0).abs() < 1e-6);
    assert_eq!(pts[0].y, std::f32::consts::PI);
}

#[test]
fn twist_is_not_idempotent_but_invertible() {
    let original = sample_points();

    let mut once = original.clone();
    twist(&mut once);
    let mut twice = once.clone();
    twist(&mut twice);
    assert!(
        once.iter()
            .zip(&twice)
            .any(|(a, b)| (*a - *b).length() > 1e-3)
    );

    let mut restored = once.clone();
    twist_inverse(&mut restored);
    for (a, b) in restored.iter().zip(&original) {
        assert!((a.x - b.x).abs() < 1e-5);
        assert!((a.z - b.z).abs() < 1e-5);
        assert_eq!(a.y, b.y);
    }
}

#[test]
fn taper_only_touches_x() {
    let original = sample_points();
    let mut pts = original.clone();
    taper(&mut pts);
    for (a, b) in pts.iter().zip(&original) {
        assert_eq!(a.y, b.y);
        assert_eq!(a.z, b.z);
        assert!((a.x - b.x * (1.0 - b.y * TAPER_RATE)).abs() < 1e-6);
    }
    // factor is exactly 1 at y = 0
    assert_eq!(pts[0].x, original[0].x);
}

#[test]
fn apply_twist_updates_geometry_and_normals() {
    let mut obj = plane();
    let before = obj.geometry().unwrap().clone();
    apply_modifier(ModifierKind::Twist, &mut obj).unwrap();
    let after = obj.geometry().unwrap();
    assert_ne!(after.positions, before.positions);
    assert_ne!(after.normals, before.normals);
    // Snapshot is never touched by modifiers.
    assert_eq!(obj.original_positions().unwrap(), before.positions.as_slice());
}

#[test]
fn apply_modifier_targets_first_child_mesh() {
    let mesh = MeshData::new(
        vec![Vec3::new(1.0, 2.0, 0.0), Vec3::new(2.0, 2.0, 0.0), Vec3::new(1.0, 3.0, 0.0)],
        None,
    )
    .unwrap();
    let mut obj = SceneObject::external(
        ObjectId(2),
        "asset",
        vec![Part::group("empty"), Part::with_mesh("body", mesh.clone())],
        "asset.glb",
    );
    apply_modifier(ModifierKind::Taper, &mut obj).unwrap();
    let edited = obj.children[1].mesh.as_ref().unwrap();
    assert!((edited.positions[0].x - 1.0 * 0.8).abs() < 1e-6);
}

#[test]
fn apply_modifier_without_geometry_is_unsupported_and_harmless() {
    let mut obj = SceneObject::external(ObjectId(3), "group", vec![Part::group("g")], "g.glb");
    let before = obj.clone();
    let err = apply_modifier(ModifierKind::Twist, &mut obj).unwrap_err();
    assert!(matches!(err, StudioError::UnsupportedGeometry(_)));
    assert_eq!(obj, before);
}

#[test]
fn apply_modifier_rejects_dangling_indices_without_editing() {
    let mesh = MeshData {
        positions: vec![
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(1.0, 3.0, 0.0),
        ],
        normals: Vec::new(),
        indices: Some(vec![0, 1, 7]),
    };
    let mut obj = SceneObject::external(
        ObjectId(5),
        "broken",
        vec![Part::with_mesh("body", mesh)],
        "broken.glb",
    );
    let before = obj.clone();
    for kind in [ModifierKind::Twist, ModifierKind::Taper] {
        let err = apply_modifier(kind, &mut obj).unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)), "{err}");
    }
    assert_eq!(obj, before);
}

#[test]
fn flip_normals_mirrors_and_toggles_back() {
    let mut obj = SceneObject::external(ObjectId(4), "group", vec![], "g.glb");
    apply_modifier(ModifierKind::FlipNormals, &mut obj).unwrap();
    assert_eq!(obj.pose.scale.z, -1.0);
    apply_modifier(ModifierKind::FlipNormals, &mut obj).unwrap();
    assert_eq!(obj.pose.scale.z, 1.0);
}
