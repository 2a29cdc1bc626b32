/// Convenience result type used across scrollweave.
pub type ScrollweaveResult<T> = Result<T, ScrollweaveError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Evaluation itself never returns these: every error is raised while building a timeline,
/// a particle field or a damping constant, before the first frame is evaluated.
#[derive(thiserror::Error, Debug)]
pub enum ScrollweaveError {
    /// Invalid timeline or phase configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation primitive (ease, keyframes, oscillator, damping constant).
    #[error("animation error: {0}")]
    Animation(String),

    /// A consumer asked the evaluated state for something it does not hold.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing definitions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollweaveError {
    /// Build a [`ScrollweaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollweaveError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollweaveError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ScrollweaveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
