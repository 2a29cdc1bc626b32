use super::*;

const J: Jitter = Jitter {
    ox: 0.0,
    oy: 0.0,
    speed: 0.5,
};

fn close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-12, "{a:?} != {b:?}");
}

#[test]
fn still_motion_is_identity() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    assert!(IdleMotion::STILL.is_still());
    assert_eq!(IdleMotion::default(), IdleMotion::STILL);
    assert_eq!(IdleMotion::STILL.apply(p, 7, &J, 12.5), p);
}

#[test]
fn spin_rotates_about_y() {
    let p = Vec3::new(1.0, 2.0, 0.0);
    let quarter = std::f64::consts::FRAC_PI_2;

    close(IdleMotion::spin(quarter).apply(p, 0, &J, 1.0), Vec3::new(0.0, 2.0, 1.0));
    // Speed 0.5 halves the angle.
    close(
        IdleMotion::spin(quarter).per_particle().apply(p, 0, &J, 2.0),
        Vec3::new(0.0, 2.0, 1.0),
    );
    assert_eq!(IdleMotion::spin(1.0).apply(p, 0, &J, 0.0), p);
}

#[test]
fn pulse_scales_the_xz_radius() {
    let p = Vec3::new(2.0, 1.0, -2.0);
    let m = IdleMotion::STILL.with_pulse(0.15, 2.0);
    for (i, time) in [(0, 0.3), (5, 1.7), (40, 9.0)] {
        let q = m.apply(p, i, &J, time);
        let k = 1.0 + (time * 2.0 + i as f64 * 0.1).sin() * 0.15;
        close(q, Vec3::new(2.0 * k, 1.0, -2.0 * k));
    }
}

#[test]
fn sway_moves_only_y_within_amplitude() {
    let p = Vec3::new(1.0, 0.0, 1.0);
    let m = IdleMotion::STILL.with_sway(0.3, 0.8);
    for i in 0..50 {
        let q = m.apply(p, 0, &J, f64::from(i) * 0.37);
        assert_eq!((q.x, q.z), (1.0, 1.0));
        assert!(q.y.abs() <= 0.3 + 1e-12);
    }
}

#[test]
fn idle_motion_rejects_non_finite() {
    assert!(IdleMotion::spin(f64::NAN).validate().is_err());
    assert!(IdleMotion::STILL.with_pulse(0.1, f64::INFINITY).validate().is_err());
    assert!(IdleMotion::spin(0.2).with_sway(0.3, 0.8).validate().is_ok());
}

fn rain() -> Dispersal {
    Dispersal {
        depth: 5.0,
        spread_x: 3.0,
        spread_z: 2.0,
        drift_rate: 0.2,
        sway: 0.0,
        sway_rate: 0.0,
        release: 0.2,
    }
}

#[test]
fn dispersal_leaves_formation_untouched_at_rest() {
    let p = Vec3::new(0.4, 0.5, 0.6);
    assert_eq!(rain().apply(p, 0.0, &J, 3.0), p);
    // Upward settle is ignored.
    assert_eq!(rain().apply(p, 2.0, &J, 3.0), p);
}

#[test]
fn dispersal_sinks_and_spreads() {
    let d = rain();
    assert_eq!(d.amount(-2.5), 0.5);
    assert_eq!(d.amount(-50.0), 1.0);

    // ox = oy = 0 at time 0: x = 0, z = spread_z.
    close(d.apply(Vec3::ZERO, -2.5, &J, 0.0), Vec3::new(0.0, -2.5, 2.0));
    close(d.apply(Vec3::ZERO, -5.0, &J, 0.0), Vec3::new(0.0, -5.0, 2.0));

    let j = Jitter {
        ox: std::f64::consts::FRAC_PI_2,
        ..J
    };
    // Full depth narrows the X band to half.
    close(d.apply(Vec3::ZERO, -5.0, &j, 0.0), Vec3::new(1.5, -5.0, 2.0));
}

#[test]
fn dispersal_releases_gradually() {
    let d = rain();
    // t = 0.1 is halfway through the 0.2 release.
    let formed = Vec3::new(0.0, 4.0, 0.0);
    let q = d.apply(formed, -0.5, &J, 0.0);
    close(q, Vec3::new(0.0, (4.0 + -0.5) / 2.0, 1.0));
}

#[test]
fn dispersal_validation() {
    assert!(rain().validate().is_ok());
    assert!(Dispersal { depth: 0.0, ..rain() }.validate().is_err());
    assert!(Dispersal { release: 1.5, ..rain() }.validate().is_err());
    assert!(Dispersal { sway: f64::NAN, ..rain() }.validate().is_err());
}
