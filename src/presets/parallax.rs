//! Parallax card showcase: a header that slides out while a stack of cards rises into place.
//!
//! Progress here is the section's own progress (section top entering the viewport bottom
//! → section bottom leaving the viewport top).
//!
//! Tracks: `header.opacity`, `header.x`, `header.blur`, `cards.scale`, `cards.x`,
//! `cards.opacity`, then `card{i}.y`, `card{i}.opacity` and `card{i}.scale` per card.

use crate::{
    foundation::core::LayoutMode,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    timeline::compile::Timeline,
    timeline::dsl::{PhaseBuilder, TimelineBuilder, scalar_keys},
    timeline::value::ValueKind,
};

/// Most cards whose staggered fade-in still completes before the shared fade-out.
pub const MAX_CARDS: usize = 8;

/// Delay between consecutive cards.
pub const CARD_STAGGER: f64 = 0.05;

fn card_spacing(mode: LayoutMode) -> f64 {
    match mode {
        LayoutMode::Expanded => 220.0,
        LayoutMode::Compact => 160.0,
    }
}

fn x_travel(mode: LayoutMode) -> f64 {
    match mode {
        LayoutMode::Expanded => 1.0,
        LayoutMode::Compact => 0.5,
    }
}

/// Builder for a showcase of `card_count` cards in `mode`.
pub fn parallax_showcase_builder(
    card_count: usize,
    mode: LayoutMode,
) -> ScrollweaveResult<TimelineBuilder> {
    if card_count == 0 || card_count > MAX_CARDS {
        return Err(ScrollweaveError::validation(format!(
            "parallax showcase supports 1..={MAX_CARDS} cards, got {card_count}"
        )));
    }
    let travel = x_travel(mode);
    let spacing = card_spacing(mode);
    let middle = (card_count as f64 - 1.0) / 2.0;

    let mut tb = TimelineBuilder::new();
    let mut phase = PhaseBuilder::named("showcase", 0.0, 1.0)
        .keys(
            "header.opacity",
            scalar_keys(&[(0.15, 0.0), (0.20, 1.0), (0.30, 1.0), (0.40, 0.0)]),
        )
        .keys(
            "header.x",
            scalar_keys(&[
                (0.15, 50.0 * travel),
                (0.20, 0.0),
                (0.35, 0.0),
                (0.45, -100.0 * travel),
            ]),
        )
        .keys("header.blur", scalar_keys(&[(0.30, 0.0), (0.40, 10.0)]))
        .keys("cards.scale", scalar_keys(&[(0.25, 0.95), (0.55, 1.0)]))
        .keys("cards.x", scalar_keys(&[(0.20, 100.0 * travel), (0.30, 0.0)]))
        .keys("cards.opacity", scalar_keys(&[(0.20, 0.0), (0.30, 1.0)]));

    for name in [
        "header.opacity",
        "header.x",
        "header.blur",
        "cards.scale",
        "cards.x",
        "cards.opacity",
    ] {
        tb = tb.track(name, ValueKind::Scalar);
    }

    for i in 0..card_count {
        let start = 0.25 + i as f64 * CARD_STAGGER;
        let end = 0.45 + i as f64 * CARD_STAGGER;
        let from_y = 400.0 + i as f64 * 80.0;
        let to_y = (i as f64 - middle) * spacing;

        for field in ["y", "opacity", "scale"] {
            tb = tb.track(format!("card{i}.{field}"), ValueKind::Scalar);
        }
        phase = phase
            .keys(format!("card{i}.y"), scalar_keys(&[(start, from_y), (end, to_y)]))
            .keys(
                format!("card{i}.opacity"),
                scalar_keys(&[(start, 0.0), (start + 0.08, 1.0), (0.75, 1.0), (0.85, 0.0)]),
            )
            .keys(format!("card{i}.scale"), scalar_keys(&[(start, 0.85), (end, 1.0)]));
    }

    Ok(tb.phase(phase))
}

/// Showcase of `card_count` cards in `mode`.
pub fn parallax_showcase(card_count: usize, mode: LayoutMode) -> ScrollweaveResult<Timeline> {
    parallax_showcase_builder(card_count, mode)?.build()
}

#[cfg(test)]
#[path = "../../tests/unit/presets/parallax.rs"]
mod tests;
