use crate::{
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    timeline::model::{PhaseDef, RuleDef, TargetDef, TimelineDef},
    timeline::value::{Value, ValueKind},
};

/// Reject every configuration error a timeline can carry.
///
/// After this passes, evaluation has a defined value for every track at every progress.
pub(crate) fn validate(def: &TimelineDef) -> ScrollweaveResult<()> {
    if def.phases.is_empty() {
        return Err(ScrollweaveError::validation(
            "timeline must have at least one phase",
        ));
    }
    if def.tracks.is_empty() {
        return Err(ScrollweaveError::validation(
            "timeline must declare at least one track",
        ));
    }
    for name in def.tracks.keys() {
        if name.trim().is_empty() {
            return Err(ScrollweaveError::validation("track names must be non-empty"));
        }
    }
    def.projection.validate()?;

    let mut prev_start = 0.0;
    for (i, phase) in def.phases.iter().enumerate() {
        validate_bounds(phase, i)?;
        if i > 0 && phase.start < prev_start {
            return Err(ScrollweaveError::validation(format!(
                "{}: phases must be ordered by start ({} < {})",
                phase.label(i),
                phase.start,
                prev_start
            )));
        }
        prev_start = phase.start;

        if let Some(ease) = phase.crossfade {
            ease.validate()
                .map_err(|e| ScrollweaveError::validation(format!("{}: crossfade {e}", phase.label(i))))?;
        }
        for (track, rule) in &phase.rules {
            let Some(&kind) = def.tracks.get(track) else {
                return Err(ScrollweaveError::validation(format!(
                    "{}: rule targets undeclared track '{track}'",
                    phase.label(i)
                )));
            };
            validate_rule(rule, kind).map_err(|msg| {
                ScrollweaveError::validation(format!(
                    "{} track '{track}' ({}): {msg}",
                    phase.label(i),
                    rule.kind_name()
                ))
            })?;
        }
    }

    for track in def.tracks.keys() {
        validate_coverage(def, track)?;
    }
    Ok(())
}

fn validate_bounds(phase: &PhaseDef, i: usize) -> ScrollweaveResult<()> {
    let label = phase.label(i);
    if !phase.start.is_finite() || !phase.end.is_finite() {
        return Err(ScrollweaveError::validation(format!(
            "{label}: boundaries must be finite"
        )));
    }
    if !(0.0..=1.0).contains(&phase.start) || !(0.0..=1.0).contains(&phase.end) {
        return Err(ScrollweaveError::validation(format!(
            "{label}: boundaries must be within [0, 1]"
        )));
    }
    if phase.start >= phase.end {
        return Err(ScrollweaveError::validation(format!(
            "{label}: start must be < end"
        )));
    }
    Ok(())
}

fn expect_kind(v: &Value, kind: ValueKind, what: &str) -> Result<(), String> {
    if v.kind() != kind {
        return Err(format!("{what} is {} but the track is {kind}", v.kind()));
    }
    if !v.is_finite() {
        return Err(format!("{what} must be finite"));
    }
    Ok(())
}

fn validate_rule(rule: &RuleDef, kind: ValueKind) -> Result<(), String> {
    match rule {
        RuleDef::Hold(v) => expect_kind(v, kind, "value"),
        RuleDef::Tween { from, to, ease } => {
            expect_kind(from, kind, "from")?;
            ease.validate().map_err(|e| e.to_string())?;
            match to {
                TargetDef::Static(v) => expect_kind(v, kind, "to"),
                TargetDef::Anchor {
                    anchor,
                    field,
                    fallback,
                } => {
                    if anchor.trim().is_empty() {
                        return Err("anchor id must be non-empty".to_owned());
                    }
                    if field.kind() != kind {
                        return Err(format!(
                            "anchor field resolves to {} but the track is {kind}",
                            field.kind()
                        ));
                    }
                    expect_kind(fallback, kind, "fallback")
                }
            }
        }
        RuleDef::Keys(keys) => {
            keys.validate().map_err(|e| e.to_string())?;
            for (j, key) in keys.keys.iter().enumerate() {
                expect_kind(&key.value, kind, &format!("key[{j}] value"))?;
            }
            Ok(())
        }
        RuleDef::Arch { base, peak } => {
            if kind != ValueKind::Scalar {
                return Err(format!("arch produces scalar but the track is {kind}"));
            }
            if !base.is_finite() || !peak.is_finite() {
                return Err("base and peak must be finite".to_owned());
            }
            Ok(())
        }
        RuleDef::Orbit(spec) => {
            if kind != ValueKind::Orbit {
                return Err(format!("orbit produces orbit but the track is {kind}"));
            }
            spec.validate().map_err(|e| e.to_string())
        }
        RuleDef::Switch {
            anchor,
            edge,
            viewport_fraction,
            before,
            after,
        } => {
            if anchor.trim().is_empty() {
                return Err("anchor id must be non-empty".to_owned());
            }
            if edge.kind() != ValueKind::Scalar {
                return Err("switch edge must be a scalar field".to_owned());
            }
            if !viewport_fraction.is_finite() {
                return Err("viewport_fraction must be finite".to_owned());
            }
            expect_kind(before, kind, "before")?;
            expect_kind(after, kind, "after")
        }
    }
}

/// Overlap and gap checks for one track.
fn validate_coverage(def: &TimelineDef, track: &str) -> ScrollweaveResult<()> {
    let segs: Vec<(usize, &PhaseDef)> = def
        .phases
        .iter()
        .enumerate()
        .filter(|(_, p)| p.rules.contains_key(track))
        .collect();

    if segs.is_empty() {
        return Err(ScrollweaveError::validation(format!(
            "track '{track}' is not driven by any phase"
        )));
    }

    let mut covered_to = 0.0_f64;
    let mut gap: Option<(f64, f64)> = None;
    for (n, &(i, phase)) in segs.iter().enumerate() {
        let open: Vec<&(usize, &PhaseDef)> = segs[..n]
            .iter()
            .filter(|(_, earlier)| earlier.end > phase.start)
            .collect();

        match open.as_slice() {
            [] => {}
            [(j, earlier)] => {
                if phase.crossfade.is_none() {
                    return Err(ScrollweaveError::validation(format!(
                        "{} overlaps {} on track '{track}' but has no crossfade",
                        phase.label(i),
                        earlier.label(*j)
                    )));
                }
                if phase.end < earlier.end {
                    return Err(ScrollweaveError::validation(format!(
                        "{} lies inside {} on track '{track}'",
                        phase.label(i),
                        earlier.label(*j)
                    )));
                }
            }
            _ => {
                return Err(ScrollweaveError::validation(format!(
                    "{}: more than two phases overlap on track '{track}' at {}",
                    phase.label(i),
                    phase.start
                )));
            }
        }

        if gap.is_none() && phase.start > covered_to {
            gap = Some((covered_to, phase.start));
        }
        covered_to = covered_to.max(phase.end);
    }
    if gap.is_none() && covered_to < 1.0 {
        gap = Some((covered_to, 1.0));
    }

    if let Some((a, b)) = gap
        && def.gap.is_none()
    {
        return Err(ScrollweaveError::validation(format!(
            "track '{track}' is uncovered in [{a}, {b}] and the timeline has no gap policy"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/validate.rs"]
mod tests;
