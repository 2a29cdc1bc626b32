use super::*;

fn formation(p: f64) -> f64 {
    story_canvas().unwrap().evaluate(p).scalar("formation").unwrap()
}

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn formation_cursor_walks_every_shape() {
    approx(formation(0.0), 0.0);
    approx(formation(0.15), 1.0);
    approx(formation(0.2), 1.0);
    approx(formation(0.5), 2.0);
    approx(formation(0.65), 3.0);
    approx(formation(0.9), 4.0);
    approx(formation(1.0), 4.0);

    let mid = formation(0.4);
    assert!(mid > 1.0 && mid < 2.0);
}

#[test]
fn cursor_never_runs_backwards() {
    let tl = story_canvas().unwrap();
    let mut prev = f64::NEG_INFINITY;
    for i in 0..=200 {
        let c = tl.evaluate(i as f64 / 200.0).scalar("formation").unwrap();
        assert!(c >= prev - 1e-12, "cursor fell at step {i}");
        prev = c;
    }
}

#[test]
fn gaps_hold_the_next_phase() {
    let tl = story_canvas().unwrap();
    // Lines only run over 0.78..0.92; the rest of the page holds its edge value.
    approx(tl.evaluate(0.5).scalar("lines.opacity").unwrap(), 0.0);
    approx(tl.evaluate(0.85).scalar("lines.opacity").unwrap(), 0.4);
    // Settle holds its start until the footer.
    approx(tl.evaluate(0.5).scalar("settle").unwrap(), 0.0);
    approx(tl.evaluate(1.0).scalar("settle").unwrap(), -5.0);
}

#[test]
fn orb_grows_toward_the_end() {
    let tl = story_canvas().unwrap();
    approx(tl.evaluate(0.5).scalar("orb.scale").unwrap(), 0.1);
    approx(tl.evaluate(0.92).scalar("orb.scale").unwrap(), 1.6);
    approx(tl.evaluate(1.0).scalar("orb.opacity").unwrap(), 0.55);
}

#[test]
fn particles_match_the_formation_list() {
    let field = story_particles(7).unwrap();
    assert_eq!(field.len(), STORY_PARTICLE_COUNT);
    assert_eq!(field.formations(), story_formations().as_slice());
    assert_eq!(field.max_cursor(), 4.0);

    let mut swarm = story_swarm(7).unwrap();
    let before = swarm.positions().to_vec();
    swarm.update(4.0, 0.0);
    assert_ne!(swarm.positions(), before.as_slice());
}

#[test]
fn footer_rains_the_cloud_down() {
    let tl = story_canvas().unwrap();
    let field = story_particles(7).unwrap();
    let mut out = Vec::new();

    let state = tl.evaluate(0.95);
    let cursor = state.scalar(FORMATION_TRACK).unwrap();
    let settle = state.scalar(SETTLE_TRACK).unwrap();
    approx(cursor, 4.0);
    approx(settle, -2.5);

    field.sample_settled(cursor, settle, 0.0, &mut out);
    assert!(out.iter().all(|p| p.y < -1.9 && p.y > -3.1));
    let max_x = out.iter().map(|p| p.x.abs()).fold(0.0, f64::max);
    assert!(max_x > 1.5, "cloud still collapsed: {max_x}");
    assert!(out.iter().any(|p| p.length() > 2.0));

    let state = tl.evaluate(1.0);
    field.sample_settled(4.0, state.scalar(SETTLE_TRACK).unwrap(), 0.0, &mut out);
    assert!(out.iter().all(|p| (p.y + 5.0).abs() < 0.6));
}

#[test]
fn sphere_section_spins_over_time() {
    let field = story_particles(7).unwrap().with_float_amp(0.0);
    approx(story_canvas().unwrap().evaluate(0.2).scalar(FORMATION_TRACK).unwrap(), 1.0);

    let mut t0 = Vec::new();
    let mut t20 = Vec::new();
    field.sample(1.0, 0.0, &mut t0);
    field.sample(1.0, 20.0, &mut t20);

    let mut max_moved: f64 = 0.0;
    for (a, b) in t0.iter().zip(&t20) {
        let ra = (a.x * a.x + a.z * a.z).sqrt();
        let rb = (b.x * b.x + b.z * b.z).sqrt();
        assert!((ra - rb).abs() < 1e-9);
        max_moved = max_moved.max((*b - *a).length());
    }
    assert!(max_moved > 1.0, "{max_moved}");
}

#[test]
fn formations_carry_their_motion() {
    let field = story_particles(3).unwrap();
    assert_eq!(story_motions().len(), story_formations().len());
    assert!(field.motion(0).unwrap().is_still());
    assert!(field.motion(1).unwrap().per_particle);
    assert!(field.motion(3).unwrap().pulse > 0.0);
    assert!(field.motion(4).unwrap().is_still());
    assert_eq!(field.dispersal(), Some(&STORY_DISPERSAL));
}

#[test]
fn swarm_steps_from_story_state() {
    let tl = story_canvas().unwrap();
    let mut swarm = story_swarm(5).unwrap();
    let end = tl.evaluate(1.0);
    for frame in 0..2000 {
        step_story_swarm(&mut swarm, &end, f64::from(frame) / 60.0).unwrap();
    }
    assert!(swarm.positions().iter().all(|p| p.y < -4.0));

    let other = crate::presets::intertwining_drops(crate::LayoutMode::Expanded)
        .unwrap()
        .evaluate(0.5);
    assert!(step_story_swarm(&mut swarm, &other, 0.0).is_err());
}
