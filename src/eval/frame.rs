use std::fmt;

use crate::{
    eval::anchor::{AnchorSource, NoAnchors},
    foundation::core::{Progress, Viewport},
};

/// Inputs for one evaluation.
///
/// Progress is the only required input. Time feeds idle motion (orbit drift, oscillators) and
/// anchors feed target seeking; both default to "nothing" so a bare progress sweep is always
/// reproducible.
#[derive(Clone, Copy)]
pub struct FrameCtx<'a> {
    /// Scroll progress.
    pub progress: Progress,
    /// Wall-clock seconds since the scene started.
    pub time_secs: f64,
    /// Current viewport size.
    pub viewport: Viewport,
    /// Live anchor bounding boxes.
    pub anchors: &'a dyn AnchorSource,
}

impl FrameCtx<'static> {
    /// Context at `progress` with time 0, the default viewport and no anchors.
    pub fn at(progress: impl Into<Progress>) -> Self {
        Self {
            progress: progress.into(),
            time_secs: 0.0,
            viewport: Viewport::default(),
            anchors: &NoAnchors,
        }
    }
}

impl<'a> FrameCtx<'a> {
    /// Replace the progress.
    pub fn with_progress(mut self, progress: impl Into<Progress>) -> Self {
        self.progress = progress.into();
        self
    }

    /// Replace the clock.
    pub fn with_time(mut self, time_secs: f64) -> Self {
        self.time_secs = time_secs;
        self
    }

    /// Replace the viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Replace the anchor source.
    pub fn with_anchors<'b>(self, anchors: &'b dyn AnchorSource) -> FrameCtx<'b> {
        FrameCtx {
            progress: self.progress,
            time_secs: self.time_secs,
            viewport: self.viewport,
            anchors,
        }
    }
}

impl fmt::Debug for FrameCtx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameCtx")
            .field("progress", &self.progress)
            .field("time_secs", &self.time_secs)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}
