//! Anchor lookup and viewport-to-scene projection.
//!
//! Anchors are named on-screen elements (a call-to-action button, a section) whose bounding
//! boxes the host re-measures every frame. The timeline never measures anything itself.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::{
    foundation::core::{Point, Rect, Vec2, Viewport},
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    timeline::value::{Value, ValueKind},
};

/// Source of anchor bounding boxes in viewport pixels.
pub trait AnchorSource {
    /// Current bounding box of `id`, or `None` when the element is not on the page.
    fn bounds(&self, id: &str) -> Option<Rect>;
}

/// Anchor source that knows no anchors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnchors;

impl AnchorSource for NoAnchors {
    fn bounds(&self, _id: &str) -> Option<Rect> {
        None
    }
}

impl AnchorSource for BTreeMap<String, Rect> {
    fn bounds(&self, id: &str) -> Option<Rect> {
        self.get(id).copied()
    }
}

impl<S: BuildHasher> AnchorSource for HashMap<String, Rect, S> {
    fn bounds(&self, id: &str) -> Option<Rect> {
        self.get(id).copied()
    }
}

impl<T: AnchorSource + ?Sized> AnchorSource for &T {
    fn bounds(&self, id: &str) -> Option<Rect> {
        (**self).bounds(id)
    }
}

/// Bounding box as reported by layout engines: origin plus size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnchorBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl AnchorBox {
    /// Convert into a [`Rect`].
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Which part of an anchor's box a target reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorField {
    /// Box center (vec2).
    #[default]
    Center,
    /// Horizontal center (scalar).
    CenterX,
    /// Vertical center (scalar).
    CenterY,
    /// Left edge (scalar).
    Left,
    /// Right edge (scalar).
    Right,
    /// Top edge (scalar).
    Top,
    /// Bottom edge (scalar).
    Bottom,
    /// Projected width (scalar).
    Width,
    /// Projected height (scalar).
    Height,
}

impl AnchorField {
    /// Kind of value this field resolves to.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Center => ValueKind::Vec2,
            _ => ValueKind::Scalar,
        }
    }

    /// `true` for fields measured along the horizontal axis.
    pub(crate) fn is_horizontal(self) -> bool {
        matches!(
            self,
            Self::CenterX | Self::Left | Self::Right | Self::Width
        )
    }

    /// Raw viewport-pixel reading of a scalar field.
    pub(crate) fn pixels(self, r: Rect) -> f64 {
        let c = r.center();
        match self {
            Self::Center | Self::CenterX => c.x,
            Self::CenterY => c.y,
            Self::Left => r.x0,
            Self::Right => r.x1,
            Self::Top => r.y0,
            Self::Bottom => r.y1,
            Self::Width => r.width(),
            Self::Height => r.height(),
        }
    }

    /// Resolve this field of `r` through `projection`.
    pub(crate) fn resolve(self, r: Rect, projection: &Projection, viewport: Viewport) -> Value {
        let c = r.center();
        let project = |x: f64, y: f64| projection.project(Point::new(x, y), viewport);
        match self {
            Self::Center => Value::Vec2(project(c.x, c.y)),
            Self::CenterX => Value::Scalar(project(c.x, c.y).x),
            Self::CenterY => Value::Scalar(project(c.x, c.y).y),
            Self::Left => Value::Scalar(project(r.x0, c.y).x),
            Self::Right => Value::Scalar(project(r.x1, c.y).x),
            Self::Top => Value::Scalar(project(c.x, r.y0).y),
            Self::Bottom => Value::Scalar(project(c.x, r.y1).y),
            Self::Width => Value::Scalar((project(r.x1, c.y).x - project(r.x0, c.y).x).abs()),
            Self::Height => Value::Scalar((project(c.x, r.y1).y - project(c.x, r.y0).y).abs()),
        }
    }
}

/// Mapping from viewport pixels into the timeline's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Viewport pixels, y down.
    #[default]
    Viewport,
    /// `x / width`, `y / height`, y down.
    Normalized,
    /// Normalized device coordinates in `[-1, 1]`, y up.
    Ndc,
    /// Unproject through a camera at `(0, 0, camera_z)` looking down -z onto `z = plane_z`.
    Perspective {
        /// Camera distance along +z.
        camera_z: f64,
        /// Vertical field of view in degrees.
        fov_y_deg: f64,
        /// Depth of the target plane.
        #[serde(default)]
        plane_z: f64,
    },
}

impl Projection {
    /// Map a viewport point.
    pub fn project(&self, p: Point, viewport: Viewport) -> Vec2 {
        let ndc = || {
            Vec2::new(
                (p.x / viewport.width) * 2.0 - 1.0,
                -(p.y / viewport.height) * 2.0 + 1.0,
            )
        };
        match *self {
            Self::Viewport => p.to_vec2(),
            Self::Normalized => Vec2::new(p.x / viewport.width, p.y / viewport.height),
            Self::Ndc => ndc(),
            Self::Perspective {
                camera_z,
                fov_y_deg,
                plane_z,
            } => {
                let n = ndc();
                let half_h = (camera_z - plane_z) * (fov_y_deg.to_radians() * 0.5).tan();
                let half_w = half_h * viewport.aspect();
                Vec2::new(n.x * half_w, n.y * half_h)
            }
        }
    }

    /// Reject degenerate cameras.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        let Self::Perspective {
            camera_z,
            fov_y_deg,
            plane_z,
        } = *self
        else {
            return Ok(());
        };
        if ![camera_z, fov_y_deg, plane_z].iter().all(|v| v.is_finite()) {
            return Err(ScrollweaveError::validation(
                "perspective projection parameters must be finite",
            ));
        }
        if fov_y_deg <= 0.0 || fov_y_deg >= 180.0 {
            return Err(ScrollweaveError::validation(
                "perspective fov_y_deg must be within (0, 180)",
            ));
        }
        if camera_z <= plane_z {
            return Err(ScrollweaveError::validation(
                "perspective camera must sit in front of the target plane (camera_z > plane_z)",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/anchor.rs"]
mod tests;
