use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::{
    animation::ease::Ease,
    animation::keyframes::Keyframes,
    animation::orbit::OrbitSpec,
    eval::anchor::{AnchorField, Projection},
    foundation::core::{LayoutMode, Rgba8, Vec2},
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    timeline::value::{Value, ValueKind},
};

/// Serializable timeline definition: declared tracks plus an ordered phase table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineDef {
    /// Track name to value kind. Every rule must target one of these.
    pub tracks: BTreeMap<String, ValueKind>,
    /// Phases ordered by `start`.
    pub phases: Vec<PhaseDef>,
    /// What a track shows where no phase covers it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<GapPolicy>,
    /// How anchor pixels map into track coordinates.
    #[serde(default)]
    pub projection: Projection,
}

/// One sub-interval of progress with its per-track rules.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseDef {
    /// Optional label used in error messages and CLI output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Inclusive start in `[0, 1]`.
    pub start: f64,
    /// Inclusive end in `[0, 1]`.
    pub end: f64,
    /// Blend curve used when this phase overlaps the previous one on a shared track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crossfade: Option<Ease>,
    /// Track name to rule.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleDef>,
}

impl PhaseDef {
    /// Unnamed phase over `[start, end]` with no rules.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            name: None,
            start,
            end,
            crossfade: None,
            rules: BTreeMap::new(),
        }
    }

    pub(crate) fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("phase[{index}] '{name}'"),
            None => format!("phase[{index}]"),
        }
    }
}

/// How a phase drives one track over its local progress `t ∈ [0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleDef {
    /// Constant value.
    Hold(Value),
    /// Ease from `from` toward `to`.
    Tween {
        /// Value at `t = 0`.
        from: Value,
        /// Value at `t = 1`.
        to: TargetDef,
        /// Easing curve.
        #[serde(default)]
        ease: Ease,
    },
    /// Keyframes in phase-local progress.
    Keys(Keyframes<Value>),
    /// Scalar `base + (peak - base) * sin(π t)`.
    Arch {
        /// Value at both ends.
        base: f64,
        /// Value mid-phase.
        peak: f64,
    },
    /// Orbital motion.
    Orbit(OrbitSpec),
    /// Two-state value chosen by where an anchor's edge sits in the viewport.
    ///
    /// `after` once the edge (viewport pixels) is above `viewport_fraction` of the viewport
    /// extent along the edge's axis, `before` otherwise or when the anchor is missing.
    Switch {
        /// Anchor id.
        anchor: String,
        /// Edge to read. Must be a scalar field.
        edge: AnchorField,
        /// Threshold as a fraction of the viewport height (or width for horizontal edges).
        viewport_fraction: f64,
        /// Value while the edge is below the threshold.
        before: Value,
        /// Value once the edge has passed the threshold.
        after: Value,
    },
}

impl RuleDef {
    /// Short rule name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Hold(_) => "hold",
            Self::Tween { .. } => "tween",
            Self::Keys(_) => "keys",
            Self::Arch { .. } => "arch",
            Self::Orbit(_) => "orbit",
            Self::Switch { .. } => "switch",
        }
    }
}

/// End value of a tween.
///
/// Deserialized untagged: an object with an `anchor` key is an anchor target, anything else
/// is a static value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TargetDef {
    /// Live anchor geometry, re-read every evaluation.
    Anchor {
        /// Anchor id looked up through the frame's anchor source.
        anchor: String,
        /// Which part of the anchor box to read.
        #[serde(default)]
        field: AnchorField,
        /// Used when the anchor is missing or projects to a non-finite value.
        fallback: Value,
    },
    /// Fixed value.
    Static(Value),
}

impl TargetDef {
    /// Anchor target reading `field` of `anchor`.
    pub fn anchor(anchor: impl Into<String>, field: AnchorField, fallback: impl Into<Value>) -> Self {
        Self::Anchor {
            anchor: anchor.into(),
            field,
            fallback: fallback.into(),
        }
    }
}

impl From<Value> for TargetDef {
    fn from(v: Value) -> Self {
        Self::Static(v)
    }
}

impl From<f64> for TargetDef {
    fn from(v: f64) -> Self {
        Self::Static(Value::Scalar(v))
    }
}

impl From<Vec2> for TargetDef {
    fn from(v: Vec2) -> Self {
        Self::Static(Value::Vec2(v))
    }
}

impl From<(f64, f64)> for TargetDef {
    fn from(v: (f64, f64)) -> Self {
        Self::Static(v.into())
    }
}

impl From<Rgba8> for TargetDef {
    fn from(c: Rgba8) -> Self {
        Self::Static(Value::Color(c))
    }
}

/// Value shown for a track where no phase covers the current progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// End value of the closest earlier phase (start value of the next one before any phase).
    HoldPrevious,
    /// Start value of the closest later phase (end value of the previous one after all phases).
    HoldNext,
}

impl TimelineDef {
    /// Empty definition with the given projection.
    pub fn new(projection: Projection) -> Self {
        Self {
            tracks: BTreeMap::new(),
            phases: Vec::new(),
            gap: None,
            projection,
        }
    }

    /// Check the definition without compiling it.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        crate::timeline::validate::validate(self)
    }

    /// Parse a JSON definition.
    pub fn from_reader(reader: impl Read) -> ScrollweaveResult<Self> {
        serde_json::from_reader(reader).map_err(|e| ScrollweaveError::serde(e.to_string()))
    }

    /// Parse a JSON definition from a file.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollweaveResult<Self> {
        Self::from_reader(open(path.as_ref())?)
    }
}

/// Expanded and compact phase tables for one scene.
///
/// Deserializes either from `{ "expanded": ..., "compact": ... }` or from a bare
/// [`TimelineDef`] used for both modes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "ResponsiveRepr")]
pub struct ResponsiveDef {
    /// Table used at or above the breakpoint.
    pub expanded: TimelineDef,
    /// Table used below the breakpoint; the expanded table when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact: Option<TimelineDef>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ResponsiveRepr {
    Split {
        expanded: TimelineDef,
        #[serde(default)]
        compact: Option<TimelineDef>,
    },
    Single(TimelineDef),
}

impl From<ResponsiveRepr> for ResponsiveDef {
    fn from(repr: ResponsiveRepr) -> Self {
        match repr {
            ResponsiveRepr::Split { expanded, compact } => Self { expanded, compact },
            ResponsiveRepr::Single(expanded) => Self {
                expanded,
                compact: None,
            },
        }
    }
}

impl ResponsiveDef {
    /// Definition for `mode`.
    pub fn select(&self, mode: LayoutMode) -> &TimelineDef {
        match (mode, &self.compact) {
            (LayoutMode::Compact, Some(compact)) => compact,
            _ => &self.expanded,
        }
    }

    /// Parse a JSON definition.
    pub fn from_reader(reader: impl Read) -> ScrollweaveResult<Self> {
        serde_json::from_reader(reader).map_err(|e| ScrollweaveError::serde(e.to_string()))
    }

    /// Parse a JSON definition from a file.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollweaveResult<Self> {
        Self::from_reader(open(path.as_ref())?)
    }
}

fn open(path: &Path) -> ScrollweaveResult<std::io::BufReader<std::fs::File>> {
    let file = std::fs::File::open(path).map_err(|e| {
        anyhow::Error::new(e).context(format!("open timeline definition '{}'", path.display()))
    })?;
    Ok(std::io::BufReader::new(file))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
