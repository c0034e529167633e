use super::*;
use crate::foundation::core::{PLANE_REST_ROT_X, Vec3};
use crate::foundation::math::ScriptedRandom;
use crate::mesh::grid::MeshData;

fn small_config() -> StudioConfig {
    let mut cfg = StudioConfig::default();
    cfg.synth.standard_segments = 8;
    cfg.synth.human_segments = 12;
    cfg
}

fn studio() -> Studio {
    Studio::new(small_config()).unwrap()
}

fn gray() -> PixelBuffer {
    PixelBuffer::filled(4, 2, [128, 128, 128, 255]).unwrap()
}

fn cube_part() -> Part {
    let positions = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 3.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, 3.0, 1.0),
        Vec3::new(-1.0, 3.0, 1.0),
    ];
    Part::with_mesh("body", MeshData::new(positions, None).unwrap())
}

#[test]
fn add_generated_names_selects_and_rests_plane() {
    let mut s = studio();
    let a = s.add_generated(&gray(), GenMode::Standard, "img-a").unwrap();
    let b = s.add_generated(&gray(), GenMode::Human, "img-b").unwrap();
    assert!(b > a);
    assert_eq!(s.scene().selected(), Some(b));

    let obj = s.object(a).unwrap();
    assert_eq!(obj.name, "Gen Model 1");
    assert_eq!(obj.pose.rotation.x, PLANE_REST_ROT_X);
    assert_eq!(obj.geometry().unwrap().vertex_count(), 9 * 5);
    assert_eq!(s.object(b).unwrap().name, "Gen Model 2");
    assert_eq!(s.object(b).unwrap().geometry().unwrap().vertex_count(), 13 * 7);
}

#[test]
fn add_external_fits_to_floor() {
    let mut s = studio();
    let id = s.add_external("robot", vec![cube_part()], "robot.glb").unwrap();
    let pose = s.object(id).unwrap().pose;
    // Largest extent is 4 (y), so the factor is 5/4.
    assert!((pose.scale.x - 1.25).abs() < 1e-6);
    // Bottom at -1 lands on y = 0.
    assert!((pose.position.y - 1.25).abs() < 1e-6);
    assert!(pose.position.x.abs() < 1e-6);
}

#[test]
fn add_external_without_fit_keeps_identity() {
    let mut cfg = small_config();
    cfg.fit_external = false;
    let mut s = Studio::new(cfg).unwrap();
    let id = s.add_external("robot", vec![cube_part()], "robot.glb").unwrap();
    assert_eq!(s.object(id).unwrap().pose, crate::foundation::core::Pose::default());
}

#[test]
fn duplicate_and_remove() {
    let mut s = studio();
    let a = s.add_generated(&gray(), GenMode::Standard, "img").unwrap();
    let b = s.duplicate(a).unwrap();
    assert_ne!(a, b);
    assert_eq!(s.scene().len(), 2);
    assert_eq!(s.scene().selected(), Some(b));
    assert_eq!(s.object(b).unwrap().name, "Gen Model 1 (Copy)");

    s.apply_modifier(b, ModifierKind::Twist).unwrap();
    assert_ne!(
        s.object(a).unwrap().geometry(),
        s.object(b).unwrap().geometry()
    );

    s.remove(b).unwrap();
    assert_eq!(s.scene().selected(), None);
    assert!(matches!(s.remove(b), Err(StudioError::NotFound(_))));
    assert!(matches!(s.duplicate(b), Err(StudioError::NotFound(_))));
}

#[test]
fn modifiers_and_reset_geometry() {
    let mut s = studio();
    let id = s.add_generated(&gray(), GenMode::Standard, "img").unwrap();
    let before = s.object(id).unwrap().geometry().unwrap().clone();
    s.apply_modifier(id, ModifierKind::Taper).unwrap();
    s.apply_modifier(id, ModifierKind::Twist).unwrap();
    assert_ne!(s.object(id).unwrap().geometry().unwrap(), &before);
    s.reset_geometry(id).unwrap();
    assert_eq!(s.object(id).unwrap().geometry().unwrap(), &before);

    let group = s
        .add_external("empty", vec![Part::group("g")], "e.glb")
        .unwrap();
    assert!(matches!(
        s.apply_modifier(group, ModifierKind::Twist),
        Err(StudioError::UnsupportedGeometry(_))
    ));
}

#[test]
fn deserialized_mesh_with_bad_indices_is_rejected_by_modifiers() {
    let mesh: MeshData = serde_json::from_str(
        r#"{ "positions": [[0,0,0],[1,0,0],[0,1,0]], "normals": [], "indices": [0,1,7] }"#,
    )
    .unwrap();
    let mut s = studio();
    let id = s
        .add_external("loaded", vec![Part::with_mesh("body", mesh)], "l.glb")
        .unwrap();
    let before = s.object(id).unwrap().clone();
    assert!(matches!(
        s.apply_modifier(id, ModifierKind::Twist),
        Err(StudioError::Validation(_))
    ));
    assert!(matches!(
        s.reset_geometry(id),
        Err(StudioError::Validation(_))
    ));
    assert_eq!(s.object(id).unwrap(), &before);
    // Whole-object edits still work.
    s.apply_modifier(id, ModifierKind::FlipNormals).unwrap();
}

#[test]
fn height_scale_keeps_flip() {
    let mut s = studio();
    let id = s.add_generated(&gray(), GenMode::Standard, "img").unwrap();
    s.set_height_scale(id, 2.0).unwrap();
    assert_eq!(s.object(id).unwrap().pose.scale.z, 2.0);
    s.apply_modifier(id, ModifierKind::FlipNormals).unwrap();
    s.set_height_scale(id, 0.5).unwrap();
    assert_eq!(s.object(id).unwrap().pose.scale.z, -0.5);
    assert!(s.set_height_scale(id, 0.0).is_err());

    s.reset_pose(id).unwrap();
    assert_eq!(s.object(id).unwrap().pose.scale, Vec3::ONE);
}

#[test]
fn set_material_touches_every_renderable_part() {
    let mut s = studio();
    let id = s
        .add_external(
            "asset",
            vec![Part::group("g"), cube_part(), cube_part()],
            "a.glb",
        )
        .unwrap();
    let patch = MaterialPatch {
        color: Some(Rgb8::from_hex(0x336699)),
        roughness: Some(0.9),
        wireframe: Some(true),
        ..MaterialPatch::default()
    };
    s.set_material(id, &patch).unwrap();
    let obj = s.object(id).unwrap();
    for p in obj.renderable_parts() {
        assert_eq!(p.material.color, Rgb8::from_hex(0x336699));
        assert_eq!(p.material.roughness, 0.9);
        assert_eq!(p.material.metalness, 0.1);
        assert!(p.material.wireframe);
    }
    assert_eq!(obj.children[0].material.color, Rgb8::WHITE);

    let bad = MaterialPatch {
        metalness: Some(1.5),
        ..MaterialPatch::default()
    };
    assert!(matches!(
        s.set_material(id, &bad),
        Err(StudioError::Validation(_))
    ));
}

#[test]
fn set_action_resets_plane_tilt() {
    let mut s = studio();
    let id = s.add_generated(&gray(), GenMode::Standard, "img").unwrap();
    s.set_action(Action::Run);
    s.step();
    assert!((s.object(id).unwrap().pose.rotation.x - (PLANE_REST_ROT_X - 0.3)).abs() < 1e-6);
    s.set_action(Action::Idle);
    assert_eq!(s.object(id).unwrap().pose.rotation.x, PLANE_REST_ROT_X);
}

#[test]
fn pause_freezes_poses() {
    let mut s = studio();
    s.add_generated(&gray(), GenMode::Standard, "img").unwrap();
    s.set_action(Action::Walk);
    let a = s.step();
    assert!(!s.toggle_playing());
    let b = s.step();
    assert_eq!(a.object_poses, b.object_poses);
    assert_eq!(a.camera, b.camera);
    assert!(!b.advanced);
    assert!(s.toggle_playing());
    assert_eq!(s.frame(), FrameIndex(2));
}

#[test]
fn speed_and_camera_mode() {
    let mut s = studio();
    assert!(s.set_speed(-1.0).is_err());
    s.set_speed(2.5).unwrap();
    assert_eq!(s.state().speed(), 2.5);
    s.set_camera_mode(CameraMode::Cinematic);
    s.add_generated(&gray(), GenMode::Standard, "img").unwrap();
    let out = s.step();
    assert_eq!(out.camera.look_at, Some(Vec3::ZERO));
}

#[test]
fn angry_mood_shakes_then_neutral_clears() {
    let rng = ScriptedRandom::new(vec![0.5]);
    let mut s = Studio::with_random(small_config(), Box::new(rng)).unwrap();
    let id = s.add_generated(&gray(), GenMode::Standard, "img").unwrap();
    s.set_mood(Mood::Angry);
    assert_eq!(s.state().camera_shake, crate::mood::ANGRY_SHAKE);
    assert_eq!(s.light().intensity, crate::mood::MOOD_LIGHT_INTENSITY);
    assert_eq!(
        s.object(id).unwrap().root.material.emissive,
        Rgb8::from_hex(0x330000)
    );
    s.set_mood(Mood::Neutral);
    assert_eq!(s.light().intensity, 0.0);
    assert_eq!(s.object(id).unwrap().root.material.emissive, Rgb8::BLACK);
}

#[test]
fn background_jobs_add_planes_on_collect() {
    let mut s = studio();
    let j1 = s.spawn_synthesis(gray(), GenMode::Standard, "a");
    let j2 = s.spawn_synthesis(gray(), GenMode::Human, "b");
    assert_ne!(j1, j2);
    assert_eq!(s.pending_jobs(), 2);
    assert!(s.scene().is_empty());

    let outcomes = s.wait_jobs();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));
    assert_eq!(s.scene().len(), 2);
    assert_eq!(s.pending_jobs(), 0);
}

#[test]
fn cancelled_job_never_adds_a_plane() {
    let mut s = studio();
    let job = s.spawn_synthesis(gray(), GenMode::Standard, "a");
    s.cancel_job(job).unwrap();
    let outcomes = s.wait_jobs();
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0].result, Err(StudioError::Cancelled(_))));
    assert!(s.scene().is_empty());
    assert!(matches!(
        s.cancel_job(job),
        Err(StudioError::NotFound(_))
    ));
}

#[test]
fn poll_jobs_eventually_collects() {
    let mut s = studio();
    s.spawn_synthesis(gray(), GenMode::Standard, "a");
    let mut collected = Vec::new();
    for _ in 0..2000 {
        collected.extend(s.poll_jobs());
        if s.pending_jobs() == 0 {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    assert_eq!(collected.len(), 1);
    assert!(collected[0].result.is_ok());
    assert_eq!(s.scene().len(), 1);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = StudioConfig::default();
    cfg.fps_num = 0;
    assert!(Studio::new(cfg).is_err());
}
