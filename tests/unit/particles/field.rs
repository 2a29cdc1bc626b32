use super::*;

fn field() -> ParticleField {
    ParticleField::generate(
        32,
        42,
        &[
            Formation::Sphere { radius: 1.0 },
            Formation::Point,
        ],
    )
    .unwrap()
}

#[test]
fn generation_validates_inputs() {
    assert!(ParticleField::generate(0, 1, &[Formation::Point]).is_err());
    assert!(ParticleField::generate(10, 1, &[]).is_err());
    assert!(ParticleField::generate(10, 1, &[Formation::Sphere { radius: -2.0 }]).is_err());
}

#[test]
fn generation_is_seeded() {
    let a = field();
    let b = field();
    assert_eq!(a.targets(0), b.targets(0));
    assert_eq!(a.speed(3), b.speed(3));
    assert_eq!(a.len(), 32);
    assert!(!a.is_empty());
    assert_eq!(a.max_cursor(), 1.0);
    assert!(a.targets(2).is_none());
    for i in 0..a.len() {
        let s = a.speed(i).unwrap();
        assert!((0.5..1.0).contains(&s));
    }
}

#[test]
fn sample_blends_between_formations() {
    let f = field().with_float_amp(0.0);
    let sphere = f.targets(0).unwrap().to_vec();
    let mut out = Vec::new();

    f.sample(0.0, 0.0, &mut out);
    assert_eq!(out, sphere);

    f.sample(0.5, 0.0, &mut out);
    for (p, s) in out.iter().zip(&sphere) {
        assert!((p.length() - 0.5 * s.length()).abs() < 1e-9);
    }

    f.sample(1.0, 0.0, &mut out);
    assert!(out.iter().all(|p| *p == Vec3::ZERO));
}

#[test]
fn sample_clamps_the_cursor() {
    let f = field().with_float_amp(0.0);
    let mut high = Vec::new();
    let mut end = Vec::new();
    f.sample(9.0, 0.0, &mut high);
    f.sample(1.0, 0.0, &mut end);
    assert_eq!(high, end);

    let mut low = Vec::new();
    let mut nan = Vec::new();
    f.sample(-3.0, 0.0, &mut low);
    f.sample(f64::NAN, 0.0, &mut nan);
    assert_eq!(low, nan);
}

#[test]
fn micro_float_stays_within_amplitude() {
    let f = field();
    let mut still = Vec::new();
    let mut floating = Vec::new();
    f.clone().with_float_amp(0.0).sample(1.0, 3.7, &mut still);
    f.sample(1.0, 3.7, &mut floating);
    for (a, b) in still.iter().zip(&floating) {
        let d = *b - *a;
        assert!(d.x.abs() <= DEFAULT_FLOAT_AMP + 1e-12);
        assert!(d.y.abs() <= DEFAULT_FLOAT_AMP + 1e-12);
        assert_eq!(d.z, 0.0);
    }
}

#[test]
fn swarm_eases_toward_targets() {
    let f = field().with_float_amp(0.0);
    let mut swarm = ParticleSwarm::new(f, Damping::new(0.5).unwrap());
    let start: Vec<Vec3> = swarm.positions().to_vec();
    assert_eq!(Some(start.as_slice()), swarm.field().targets(0));

    let after = swarm.update(1.0, 0.0).to_vec();
    for (a, s) in after.iter().zip(&start) {
        assert!((a.length() - 0.5 * s.length()).abs() < 1e-9);
    }

    swarm.reset();
    assert_eq!(swarm.positions(), start.as_slice());
}

#[test]
fn formation_motion_is_validated_per_slot() {
    assert!(field().with_motion(2, IdleMotion::spin(0.1)).is_err());
    assert!(field().with_motion(0, IdleMotion::spin(f64::NAN)).is_err());
    let f = field().with_motion(0, IdleMotion::spin(0.1)).unwrap();
    assert_eq!(f.motion(0), Some(&IdleMotion::spin(0.1)));
    assert_eq!(f.motion(1), Some(&IdleMotion::STILL));
    assert!(f.motion(2).is_none());
}

#[test]
fn spinning_formation_turns_with_particle_speed() {
    let f = field()
        .with_float_amp(0.0)
        .with_motion(0, IdleMotion::spin(0.5).per_particle())
        .unwrap();
    let sphere = f.targets(0).unwrap().to_vec();
    let mut out = Vec::new();
    f.sample(0.0, 4.0, &mut out);
    for (i, (p, s)) in out.iter().zip(&sphere).enumerate() {
        let expect = s.rotate_y(4.0 * 0.5 * f.speed(i).unwrap());
        assert!((*p - expect).length() < 1e-9);
    }
}

#[test]
fn motion_fades_with_the_cursor_blend() {
    let f = field()
        .with_float_amp(0.0)
        .with_motion(0, IdleMotion::spin(1.0))
        .unwrap();
    let sphere = f.targets(0).unwrap().to_vec();
    let mut out = Vec::new();
    f.sample(0.5, 2.0, &mut out);
    for (p, s) in out.iter().zip(&sphere) {
        let expect = s.rotate_y(2.0) * 0.5;
        assert!((*p - expect).length() < 1e-9);
    }
}

#[test]
fn settle_without_dispersal_shifts_down() {
    let f = field().with_float_amp(0.0);
    let sphere = f.targets(0).unwrap().to_vec();
    let mut out = Vec::new();
    f.sample_settled(0.0, -2.0, 0.0, &mut out);
    for (p, s) in out.iter().zip(&sphere) {
        assert!((*p - (*s + Vec3::new(0.0, -2.0, 0.0))).length() < 1e-12);
    }

    let mut nan = Vec::new();
    let mut rest = Vec::new();
    f.sample_settled(0.0, f64::NAN, 0.0, &mut nan);
    f.sample(0.0, 0.0, &mut rest);
    assert_eq!(nan, rest);
}

#[test]
fn dispersal_lifts_particles_off_a_collapsed_point() {
    let rain = Dispersal {
        depth: 5.0,
        spread_x: 3.0,
        spread_z: 2.0,
        drift_rate: 0.2,
        sway: 0.0,
        sway_rate: 0.0,
        release: 0.2,
    };
    assert!(field().with_dispersal(Dispersal { depth: -1.0, ..rain }).is_err());

    let f = field().with_float_amp(0.0).with_dispersal(rain).unwrap();
    assert_eq!(f.dispersal(), Some(&rain));
    let mut out = Vec::new();

    f.sample_settled(1.0, 0.0, 0.0, &mut out);
    assert!(out.iter().all(|p| *p == Vec3::ZERO));

    f.sample_settled(1.0, -5.0, 0.0, &mut out);
    for p in &out {
        assert!((p.y + 5.0).abs() < 1e-12);
        assert!(p.x.abs() <= 1.5 + 1e-12);
        assert!(p.z.abs() <= 2.0 + 1e-12);
    }
    assert!(out.iter().any(|p| p.x.abs() > 0.5));
}

#[test]
fn swarm_follows_the_settle_offset() {
    let f = field().with_float_amp(0.0);
    let mut swarm = ParticleSwarm::new(f, Damping::new(1.0).unwrap());
    swarm.update_settled(1.0, -3.0, 0.0);
    for p in swarm.positions() {
        assert!((*p - Vec3::new(0.0, -3.0, 0.0)).length() < 1e-12);
    }
}
