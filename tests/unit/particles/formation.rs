use super::*;

#[test]
fn targets_are_deterministic_per_seed() {
    let f = Formation::Sphere { radius: 2.5 };
    let a = f.targets(64, &mut Rng64::new(7));
    let b = f.targets(64, &mut Rng64::new(7));
    let c = f.targets(64, &mut Rng64::new(8));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn sphere_points_lie_on_the_surface() {
    let pts = Formation::Sphere { radius: 2.5 }.targets(200, &mut Rng64::new(1));
    assert_eq!(pts.len(), 200);
    for p in pts {
        assert!((p.length() - 2.5).abs() < 1e-9, "{p:?}");
    }
}

#[test]
fn scatter_stays_inside_its_box() {
    let pts = Formation::Scatter {
        extent: 20.0,
        depth: 10.0,
    }
    .targets(500, &mut Rng64::new(3));
    for p in pts {
        assert!(p.x.abs() <= 10.0 && p.y.abs() <= 10.0 && p.z.abs() <= 5.0, "{p:?}");
    }
}

#[test]
fn torus_points_sit_on_the_tube() {
    let (major, minor) = (3.5, 0.8);
    let pts = Formation::Torus { major, minor }.targets(200, &mut Rng64::new(5));
    for p in pts {
        let ring = (p.x * p.x + p.z * p.z).sqrt();
        let tube = ((ring - major).powi(2) + p.y * p.y).sqrt();
        assert!((tube - minor).abs() < 1e-9, "{p:?}");
    }
}

#[test]
fn helix_alternates_strands_and_spans_its_height() {
    let pts = Formation::Helix {
        radius: 2.0,
        height: 8.0,
        turns: 3.0,
    }
    .targets(10, &mut Rng64::new(0));
    // Index 0: angle 0, strand +1.
    assert!((pts[0].x - 2.0).abs() < 1e-12);
    assert!((pts[0].y + 4.0).abs() < 1e-12);
    for p in &pts {
        assert!(((p.x * p.x + p.z * p.z).sqrt() - 2.0).abs() < 1e-9);
        assert!(p.y >= -4.0 && p.y < 4.0);
    }
}

#[test]
fn helix_ignores_the_rng() {
    let f = Formation::Helix {
        radius: 1.0,
        height: 2.0,
        turns: 1.0,
    };
    assert_eq!(f.targets(12, &mut Rng64::new(1)), f.targets(12, &mut Rng64::new(99)));
}

#[test]
fn point_collapses_to_origin() {
    let pts = Formation::Point.targets(3, &mut Rng64::new(0));
    assert_eq!(pts, vec![Vec3::ZERO; 3]);
}

#[test]
fn validation_rejects_bad_dimensions() {
    assert!(Formation::Sphere { radius: -1.0 }.validate().is_err());
    assert!(
        Formation::Torus {
            major: f64::NAN,
            minor: 1.0
        }
        .validate()
        .is_err()
    );
    assert!(Formation::Point.validate().is_ok());
}

#[test]
fn serializes_with_kind_tag() {
    let json = serde_json::to_string(&Formation::Sphere { radius: 2.5 }).unwrap();
    assert_eq!(json, r#"{"kind":"sphere","radius":2.5}"#);
    let back: Formation = serde_json::from_str(r#"{"kind":"point"}"#).unwrap();
    assert_eq!(back, Formation::Point);
}
