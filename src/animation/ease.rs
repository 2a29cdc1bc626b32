use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// Easing functions used to map normalized local progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Hermite smoothstep, `t * t * (3 - 2t)`.
    Smoothstep,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; `x1` and `x2` must lie in `[0, 1]`.
    CubicBezier([f64; 4]),
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::CubicBezier([x1, y1, x2, y2]) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// Check curve parameters; only [`Ease::CubicBezier`] can be malformed.
    pub fn validate(self) -> ScrollweaveResult<()> {
        let Self::CubicBezier(p) = self else {
            return Ok(());
        };
        if p.iter().any(|v| !v.is_finite()) {
            return Err(ScrollweaveError::animation(
                "cubic_bezier control points must be finite",
            ));
        }
        if !(0.0..=1.0).contains(&p[0]) || !(0.0..=1.0).contains(&p[2]) {
            return Err(ScrollweaveError::animation(
                "cubic_bezier x1 and x2 must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Polynomial coefficients of one axis, P0 = 0 and P3 = 1.
    fn coeffs(p1: f64, p2: f64) -> (f64, f64, f64) {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    }
    let (ax, bx, cx) = coeffs(x1, x2);
    let (ay, by, cy) = coeffs(y1, y2);
    let curve_x = |t: f64| ((ax * t + bx) * t + cx) * t;
    let slope_x = |t: f64| (3.0 * ax * t + 2.0 * bx) * t + cx;
    let curve_y = |t: f64| ((ay * t + by) * t + cy) * t;

    let mut t = x;
    for _ in 0..8 {
        let err = curve_x(t) - x;
        if err.abs() < 1e-7 {
            return curve_y(t);
        }
        let d = slope_x(t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    // Newton stalled; x(t) is monotonic for x1, x2 in [0, 1] so bisection converges.
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..64 {
        let v = curve_x(t);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    curve_y(t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
