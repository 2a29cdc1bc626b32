use super::*;

#[test]
fn progress_clamps_and_sanitizes() {
    assert_eq!(Progress::new(-0.5), Progress::START);
    assert_eq!(Progress::new(1.5), Progress::END);
    assert_eq!(Progress::new(f64::NAN), Progress::START);
    assert_eq!(Progress::new(f64::INFINITY), Progress::END);
    assert_eq!(Progress::new(0.25).get(), 0.25);
}

#[test]
fn progress_from_scroll_guards_empty_range() {
    assert_eq!(Progress::from_scroll(300.0, 1200.0).get(), 0.25);
    assert_eq!(Progress::from_scroll(300.0, 0.0), Progress::START);
    assert_eq!(Progress::from_scroll(300.0, -10.0), Progress::START);
    assert_eq!(Progress::from_scroll(5000.0, 1200.0), Progress::END);
}

#[test]
fn progress_deserializes_clamped() {
    let p: Progress = serde_json::from_str("2.0").unwrap();
    assert_eq!(p, Progress::END);
}

#[test]
fn layout_mode_breakpoint() {
    assert_eq!(LayoutMode::from_viewport_width(375.0), LayoutMode::Compact);
    assert_eq!(LayoutMode::from_viewport_width(767.9), LayoutMode::Compact);
    assert_eq!(LayoutMode::from_viewport_width(768.0), LayoutMode::Expanded);
}

#[test]
fn viewport_never_degenerates() {
    let v = Viewport::new(0.0, f64::NAN);
    assert_eq!(v.width, 1.0);
    assert_eq!(v.height, 1.0);
}

#[test]
fn rgba8_hex_roundtrip_and_errors() {
    let c = Rgba8::from_hex("#F9452D").unwrap();
    assert_eq!(c, Rgba8::rgb(0xf9, 0x45, 0x2d));
    assert_eq!(c.to_string(), "#f9452dff");

    let c: Rgba8 = serde_json::from_str("\"#0000ff80\"").unwrap();
    assert_eq!(c.a, 0x80);

    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zzzzzz").is_err());
    assert!(Rgba8::from_hex("#+1+2+3").is_err());
    assert!(Rgba8::from_hex("+1+2+3+4").is_err());
    assert!(Rgba8::from_hex("#12 456").is_err());
    assert!(serde_json::from_str::<Rgba8>("\"nope\"").is_err());
}

#[test]
fn vec3_rotate_y_quarter_turn() {
    let v = Vec3::new(1.0, 2.0, 0.0).rotate_y(std::f64::consts::FRAC_PI_2);
    assert!(v.x.abs() < 1e-12);
    assert_eq!(v.y, 2.0);
    assert!((v.z - 1.0).abs() < 1e-12);
}
