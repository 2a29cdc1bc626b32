use std::collections::BTreeMap;

use super::*;
use crate::eval::frame::FrameCtx;
use crate::foundation::core::{Rect, Viewport};

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn both_layouts_compile() {
    assert!(intertwining_drops(LayoutMode::Expanded).is_ok());
    assert!(intertwining_drops(LayoutMode::Compact).is_ok());
}

#[test]
fn path_visits_every_waypoint() {
    let tl = intertwining_drops(LayoutMode::Expanded).unwrap();
    assert_eq!(tl.evaluate(0.0).vec2("position"), Some(Vec2::new(3.5, 2.5)));
    assert_eq!(tl.evaluate(0.6).vec2("position"), Some(Vec2::new(-4.5, 0.0)));
    assert_eq!(tl.evaluate(0.85).vec2("position"), Some(Vec2::new(0.0, -1.0)));
    // No contact button: the fallback below center.
    assert_eq!(tl.evaluate(1.0).vec2("position"), Some(Vec2::new(0.0, -2.5)));
}

#[test]
fn opacity_fades_in_and_out() {
    let tl = intertwining_drops(LayoutMode::Expanded).unwrap();
    approx(tl.evaluate(0.01).scalar("opacity").unwrap(), 0.0);
    approx(tl.evaluate(0.5).scalar("opacity").unwrap(), 0.9);
    approx(tl.evaluate(0.95).scalar("opacity").unwrap(), 0.0);
}

#[test]
fn orbit_and_scale_swell_mid_scroll() {
    let tl = intertwining_drops(LayoutMode::Expanded).unwrap();
    let o = tl.evaluate(0.5).orbit("orbit").unwrap();
    approx(o.angle, 3.0 * std::f64::consts::PI);
    approx(o.radius, 1.2);
    approx(tl.evaluate(0.5).scalar("scale").unwrap(), 1.0);
    approx(tl.evaluate(0.0).scalar("scale").unwrap(), 0.8);

    let compact = intertwining_drops(LayoutMode::Compact).unwrap();
    approx(compact.evaluate(0.5).orbit("orbit").unwrap().radius, 0.9);
}

#[test]
fn contact_button_pulls_the_drops_in() {
    let tl = intertwining_drops(LayoutMode::Expanded).unwrap();
    let viewport = Viewport::new(1280.0, 800.0);
    let mut anchors = BTreeMap::new();
    // Centered button: projects onto the camera axis.
    anchors.insert(CONTACT_ANCHOR.to_owned(), Rect::new(590.0, 380.0, 690.0, 420.0));
    let ctx = FrameCtx::at(1.0).with_viewport(viewport).with_anchors(&anchors);
    let p = tl.evaluate_frame(&ctx).vec2("position").unwrap();
    approx(p.x, 0.0);
    approx(p.y, 0.0);
}

#[test]
fn color_turns_once_parallax_has_passed() {
    let tl = intertwining_drops(LayoutMode::Expanded).unwrap();
    assert_eq!(tl.evaluate(0.5).color("color"), Some(DROP_DARK));

    let viewport = Viewport::new(1280.0, 800.0);
    let mut anchors = BTreeMap::new();
    anchors.insert(PARALLAX_ANCHOR.to_owned(), Rect::new(0.0, -1200.0, 1280.0, 200.0));
    let ctx = FrameCtx::at(0.5).with_viewport(viewport).with_anchors(&anchors);
    assert_eq!(tl.evaluate_frame(&ctx).color("color"), Some(DROP_ACCENT));
}

#[test]
fn responsive_pair_switches_on_width() {
    let r = intertwining_drops_responsive().unwrap();
    let narrow = r.for_viewport(Viewport::new(390.0, 844.0));
    assert_eq!(narrow.evaluate(0.0).vec2("position"), Some(Vec2::new(1.5, 2.5)));
    let wide = r.for_viewport(Viewport::new(1440.0, 900.0));
    assert_eq!(wide.evaluate(0.0).vec2("position"), Some(Vec2::new(3.5, 2.5)));
}
