use super::*;
use crate::foundation::core::Vec2;

#[test]
fn builder_produces_the_equivalent_definition() {
    let def = TimelineBuilder::new()
        .track("x", ValueKind::Scalar)
        .phase(PhaseBuilder::named("intro", 0.0, 1.0).tween("x", 0.0, 2.0, Ease::InOutCubic))
        .build_def()
        .unwrap();

    let mut expected = TimelineDef::new(Projection::Viewport);
    expected.tracks.insert("x".to_owned(), ValueKind::Scalar);
    let mut phase = PhaseDef::new(0.0, 1.0);
    phase.name = Some("intro".to_owned());
    phase.rules.insert(
        "x".to_owned(),
        RuleDef::Tween {
            from: Value::Scalar(0.0),
            to: TargetDef::Static(Value::Scalar(2.0)),
            ease: Ease::InOutCubic,
        },
    );
    expected.phases.push(phase);

    assert_eq!(def, expected);
}

#[test]
fn duplicate_track_is_reported() {
    let err = TimelineBuilder::new()
        .track("x", ValueKind::Scalar)
        .track("x", ValueKind::Vec2)
        .phase(PhaseBuilder::new(0.0, 1.0).hold("x", 0.0))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("duplicate track 'x'"));
}

#[test]
fn duplicate_rule_is_reported_with_phase_label() {
    let err = TimelineBuilder::new()
        .track("x", ValueKind::Scalar)
        .phase(
            PhaseBuilder::named("twice", 0.0, 1.0)
                .hold("x", 0.0)
                .hold("x", 1.0),
        )
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation error: phase[0] 'twice': duplicate rule for track 'x'"
    );

    assert!(
        PhaseBuilder::new(0.0, 1.0)
            .hold("x", 0.0)
            .hold("x", 1.0)
            .build()
            .is_err()
    );
}

#[test]
fn builder_runs_full_validation() {
    let err = TimelineBuilder::new()
        .track("x", ValueKind::Scalar)
        .phase(PhaseBuilder::new(0.0, 0.5).hold("x", 0.0))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("no gap policy"));
}

#[test]
fn seek_builds_an_anchor_target() {
    let def = TimelineBuilder::new()
        .track("p", ValueKind::Vec2)
        .phase(PhaseBuilder::new(0.0, 1.0).seek(
            "p",
            Vec2::ZERO,
            "button",
            AnchorField::Center,
            (1.0, 2.0),
            Ease::Linear,
        ))
        .build_def()
        .unwrap();
    let rules = rules_by_track(&def);
    let RuleDef::Tween { to, .. } = rules["p"][0] else {
        panic!("expected a tween");
    };
    assert_eq!(
        to,
        &TargetDef::Anchor {
            anchor: "button".to_owned(),
            field: AnchorField::Center,
            fallback: Value::Vec2(Vec2::new(1.0, 2.0)),
        }
    );
}

#[test]
fn steps_hold_between_keys() {
    let tl = TimelineBuilder::new()
        .track("n", ValueKind::Scalar)
        .phase(PhaseBuilder::new(0.0, 1.0).steps("n", scalar_keys(&[(0.0, 1.0), (0.5, 2.0)])))
        .build()
        .unwrap();
    assert_eq!(tl.evaluate(0.49).scalar("n"), Some(1.0));
    assert_eq!(tl.evaluate(0.5).scalar("n"), Some(2.0));
}

#[test]
fn eased_keys_carry_their_curve() {
    let keys = vec![key_eased(0.0, 0.0, Ease::InCubic), key(1.0, 1.0)];
    assert_eq!(keys[0].ease, Ease::InCubic);
    assert_eq!(keys[1].ease, Ease::Linear);

    let tl = TimelineBuilder::new()
        .track("n", ValueKind::Scalar)
        .phase(PhaseBuilder::new(0.0, 1.0).keys("n", keys))
        .build()
        .unwrap();
    let mid = tl.evaluate(0.5).scalar("n").unwrap();
    assert!((mid - 0.125).abs() < 1e-9);
}

#[test]
fn rules_are_grouped_by_track_in_phase_order() {
    let def = TimelineBuilder::new()
        .track("a", ValueKind::Scalar)
        .track("b", ValueKind::Scalar)
        .phase(PhaseBuilder::new(0.0, 0.5).hold("a", 0.0).arch("b", 0.0, 1.0))
        .phase(PhaseBuilder::new(0.5, 1.0).hold("a", 1.0).hold("b", 2.0))
        .build_def()
        .unwrap();
    let rules = rules_by_track(&def);
    assert_eq!(rules.len(), 2);
    assert_eq!(rules["a"].len(), 2);
    assert_eq!(rules["b"][0].kind_name(), "arch");
    assert_eq!(rules["b"][1].kind_name(), "hold");
}
