/// Result alias used across the crate.
pub type ArcmapResult<T> = Result<T, ArcmapError>;

/// Error type for option validation, animation sampling, rendering, and encoding.
#[derive(thiserror::Error, Debug)]
pub enum ArcmapError {
    /// Invalid options, scene settings, or render arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation data (unsorted keyframes, bad durations).
    #[error("animation error: {0}")]
    Animation(String),

    /// Failure while evaluating or rasterizing a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Failure inside a frame sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArcmapError {
    /// Build an [`ArcmapError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`ArcmapError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build an [`ArcmapError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build an [`ArcmapError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build an [`ArcmapError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ArcmapError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
