/// Convenience result type used across the stagefx public API.
pub type FxResult<T> = Result<T, FxError>;

/// Error type for the ambient layers (config, key scripts, rendering and encoding).
///
/// The effect core itself never fails: playing a key, advancing time and routing
/// completions are infallible.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// Invalid user input (config values, key scripts, frame geometry).
    #[error("validation error: {0}")]
    Validation(String),

    /// The raster backend could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// A frame sink failed to consume frames.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    /// Build a [`FxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FxError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FxError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
