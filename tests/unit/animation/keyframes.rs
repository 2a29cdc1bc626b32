use super::*;

fn ramp(mode: InterpMode) -> Keyframes<f64> {
    Keyframes {
        keys: vec![
            Keyframe::new(0.2, 0.0, Ease::Linear),
            Keyframe::new(0.6, 10.0, Ease::Linear),
        ],
        mode,
    }
}

#[test]
fn holds_outside_key_range() {
    let kf = ramp(InterpMode::Linear);
    assert_eq!(kf.sample(0.0), Some(0.0));
    assert_eq!(kf.sample(1.0), Some(10.0));
}

#[test]
fn linear_interpolates_between_keys() {
    let kf = ramp(InterpMode::Linear);
    let v = kf.sample(0.4).unwrap();
    assert!((v - 5.0).abs() < 1e-9);
}

#[test]
fn hold_is_constant_between_keys() {
    let kf = ramp(InterpMode::Hold);
    assert_eq!(kf.sample(0.4), Some(0.0));
    assert_eq!(kf.sample(0.6), Some(10.0));
}

#[test]
fn coincident_keys_step_to_the_later_value() {
    let kf = Keyframes::linear(vec![
        Keyframe::new(0.0, 0.0, Ease::Linear),
        Keyframe::new(0.5, 1.0, Ease::Linear),
        Keyframe::new(0.5, 5.0, Ease::Linear),
        Keyframe::new(1.0, 5.0, Ease::Linear),
    ]);
    assert!(kf.sample(0.499_999).unwrap() < 1.0);
    assert_eq!(kf.sample(0.5), Some(5.0));
}

#[test]
fn ease_applies_toward_next_key() {
    let kf = Keyframes::linear(vec![
        Keyframe::new(0.0, 0.0, Ease::InCubic),
        Keyframe::new(1.0, 1.0, Ease::Linear),
    ]);
    assert!((kf.sample(0.5).unwrap() - 0.125).abs() < 1e-12);
}

#[test]
fn empty_keys_sample_to_none_and_fail_validation() {
    let kf: Keyframes<f64> = Keyframes::linear(vec![]);
    assert_eq!(kf.sample(0.5), None);
    assert!(kf.validate().is_err());
}

#[test]
fn validation_rejects_unsorted_and_out_of_range() {
    let unsorted = Keyframes::linear(vec![
        Keyframe::new(0.6, 0.0, Ease::Linear),
        Keyframe::new(0.2, 1.0, Ease::Linear),
    ]);
    assert!(unsorted.validate().is_err());

    let outside = Keyframes::linear(vec![Keyframe::new(1.5, 0.0, Ease::Linear)]);
    assert!(outside.validate().is_err());

    assert!(ramp(InterpMode::Linear).validate().is_ok());
}

#[test]
fn color_lerp_rounds_channels() {
    let a = Rgba8::rgb(0, 0, 0);
    let b = Rgba8::rgb(255, 100, 1);
    let mid = Rgba8::lerp(&a, &b, 0.5);
    assert_eq!(mid, Rgba8::rgb(128, 50, 1));
}

#[test]
fn small_color_steps_still_move() {
    let a = Rgba8::rgb(240, 10, 0);
    let b = Rgba8::rgb(249, 5, 0);
    assert_eq!(Rgba8::lerp(&a, &b, 0.01), Rgba8::rgb(241, 9, 0));
    assert_eq!(Rgba8::lerp(&a, &b, 0.0), a);
}

#[test]
fn keyframes_deserialize_with_defaults() {
    let kf: Keyframes<f64> =
        serde_json::from_str(r#"{"keys":[{"at":0.0,"value":1.0},{"at":1.0,"value":2.0}]}"#)
            .unwrap();
    assert_eq!(kf.mode, InterpMode::Linear);
    assert_eq!(kf.keys[0].ease, Ease::Linear);
}

#[test]
fn vector_lerp_is_componentwise() {
    assert_eq!(f64::lerp(&2.0, &6.0, 0.25), 3.0);
    let v = <Vec2 as Lerp>::lerp(&Vec2::new(0.0, 10.0), &Vec2::new(4.0, 0.0), 0.5);
    assert_eq!(v, Vec2::new(2.0, 5.0));
    let p = Vec3::lerp(&Vec3::ZERO, &Vec3::new(2.0, -4.0, 8.0), 0.75);
    assert_eq!(p, Vec3::new(1.5, -3.0, 6.0));
}
