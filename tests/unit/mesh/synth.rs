use super::*;

fn gray(w: u32, h: u32, level: u8) -> PixelBuffer {
    PixelBuffer::filled(w, h, [level, level, level, 255]).unwrap()
}

fn small_config() -> SynthConfig {
    SynthConfig {
        world_width: 10.0,
        standard_segments: 8,
        human_segments: 12,
        ..SynthConfig::default()
    }
}

#[test]
fn default_resolution_vertex_counts() {
    let px = gray(4, 2, 0);
    let cfg = SynthConfig::default();

    let standard = synthesize(&px, GenMode::Standard, &cfg).unwrap();
    assert_eq!(standard.segs_x, 250);
    assert_eq!(standard.segs_y, 125);
    assert_eq!(standard.mesh.vertex_count(), 251 * 126);

    let human = synthesize(&px, GenMode::Human, &cfg).unwrap();
    assert_eq!(human.segs_x, 350);
    assert_eq!(human.segs_y, 175);
    assert_eq!(human.mesh.vertex_count(), 351 * 176);
}

#[test]
fn row_segments_floor_aspect() {
    // aspect 2/3 -> 8 * 0.666.. = 5.33 -> 5 rows of segments.
    let px = gray(3, 2, 0);
    let g = synthesize(&px, GenMode::Standard, &small_config()).unwrap();
    assert_eq!(g.segs_y, 5);
    assert_eq!(g.mesh.vertex_count(), 9 * 6);
    assert!((g.height - 10.0 * 2.0 / 3.0).abs() < 1e-5);
}

#[test]
fn uniform_gray_displaces_every_vertex() {
    let px = gray(16, 16, 128);
    for (mode, expected) in [
        (GenMode::Standard, 128.0 / 255.0 * 3.5),
        (GenMode::Human, (128.0f32 / 255.0).powf(1.2) * 2.0),
    ] {
        let g = synthesize(&px, mode, &small_config()).unwrap();
        for iy in 0..g.rows() {
            for ix in 0..g.columns() {
                let z = g.mesh.positions[g.vertex_index(ix, iy)].z;
                assert!(
                    (z - expected).abs() < 1e-5,
                    "({ix}, {iy}) z={z} expected={expected}"
                );
            }
        }
    }
}

#[test]
fn bright_top_row_lifts_upper_vertices() {
    // 1x2 image: top texel white, bottom texel black.
    let px = PixelBuffer::new(1, 2, vec![255, 255, 255, 255, 0, 0, 0, 255]).unwrap();
    let cfg = SynthConfig {
        world_width: 1.0,
        standard_segments: 2,
        human_segments: 2,
        ..SynthConfig::default()
    };
    let g = synthesize(&px, GenMode::Standard, &cfg).unwrap();
    // 2 * aspect(2) = 4 row segments; v = iy / 4.
    assert_eq!(g.segs_y, 4);
    let z_at = |iy| g.mesh.positions[g.vertex_index(0, iy)].z;
    // iy=1 -> v=0.25 -> row floor(1.5)=1 (black); iy=3 -> v=0.75 -> row 0 (white).
    assert_eq!(z_at(1), 0.0);
    assert!((z_at(3) - 3.5).abs() < 1e-6);
}

#[test]
fn tall_narrow_image_over_vertex_limit_is_invalid() {
    // 1x70000 at 250 segments would need ~4.4 billion vertices.
    let px = gray(1, 70_000, 128);
    let err = synthesize(&px, GenMode::Standard, &SynthConfig::default()).unwrap_err();
    assert!(matches!(err, StudioError::InvalidImage(_)), "{err}");

    let cfg = SynthConfig {
        max_vertices: 9 * 9 - 1,
        ..small_config()
    };
    assert!(matches!(
        synthesize(&gray(4, 4, 0), GenMode::Standard, &cfg),
        Err(StudioError::InvalidImage(_))
    ));
    let cfg = SynthConfig {
        max_vertices: 9 * 9,
        ..small_config()
    };
    assert!(synthesize(&gray(4, 4, 0), GenMode::Standard, &cfg).is_ok());
}

#[test]
fn normals_are_unit_length() {
    let px = gray(8, 8, 200);
    let g = synthesize(&px, GenMode::Human, &small_config()).unwrap();
    assert_eq!(g.mesh.normals.len(), g.mesh.positions.len());
    for n in &g.mesh.normals {
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn cancelled_token_aborts_without_mesh() {
    let px = gray(8, 8, 100);
    let token = CancelToken::new();
    token.cancel();
    let err = synthesize_with_cancel(&px, GenMode::Standard, &small_config(), &token).unwrap_err();
    assert!(matches!(err, StudioError::Cancelled(_)));
}

#[test]
fn invalid_config_is_rejected() {
    let px = gray(2, 2, 0);
    let cfg = SynthConfig {
        world_width: 0.0,
        ..SynthConfig::default()
    };
    assert!(matches!(
        synthesize(&px, GenMode::Standard, &cfg),
        Err(StudioError::Validation(_))
    ));
    let cfg = SynthConfig {
        max_vertices: 0,
        ..SynthConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(StudioError::Validation(_))));
}
