use super::*;

fn sample() -> VisualState {
    let mut s = VisualState::default();
    s.insert("opacity", Value::Scalar(0.5));
    s.insert("position", Value::Vec2(Vec2::new(1.0, 2.0)));
    s.insert("color", Value::Color(Rgba8::rgb(1, 2, 3)));
    s
}

#[test]
fn typed_accessors_match_kinds() {
    let s = sample();
    assert_eq!(s.scalar("opacity"), Some(0.5));
    assert_eq!(s.vec2("position"), Some(Vec2::new(1.0, 2.0)));
    assert_eq!(s.color("color"), Some(Rgba8::rgb(1, 2, 3)));
    assert_eq!(s.scalar("position"), None);
    assert_eq!(s.orbit("opacity"), None);
    assert_eq!(s.len(), 3);
    assert!(!s.is_empty());
}

#[test]
fn require_reports_track_and_kind() {
    let s = sample();
    assert_eq!(s.require_scalar("opacity").unwrap(), 0.5);
    let err = s.require_vec2("opacity").unwrap_err();
    assert_eq!(
        err.to_string(),
        "evaluation error: track 'opacity' has no vec2 value"
    );
    assert!(s.require_orbit("missing").is_err());
    assert!(s.require_color("color").is_ok());
}

#[test]
fn iterates_in_name_order() {
    let names: Vec<_> = sample().iter().map(|(k, _)| k.to_owned()).collect();
    assert_eq!(names, ["color", "opacity", "position"]);
}

#[test]
fn serializes_as_a_flat_map() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["opacity"], serde_json::json!(0.5));
    assert_eq!(json["color"], serde_json::json!("#010203ff"));
    assert_eq!(json["position"]["x"], serde_json::json!(1.0));
}

#[test]
fn finiteness_covers_every_value() {
    let mut s = sample();
    assert!(s.is_finite());
    s.insert("bad", Value::Scalar(f64::INFINITY));
    assert!(!s.is_finite());
}
