/// Convenience result type used across pathglide.
pub type PathglideResult<T> = Result<T, PathglideError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Interpolation never produces an error: mismatched or unparsable values degrade to the
/// source or destination value instead.
#[derive(thiserror::Error, Debug)]
pub enum PathglideError {
    /// Invalid user-provided configuration (timing, options, step sizes).
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing, unparsable, or degenerate path geometry.
    #[error("path error: {0}")]
    Path(String),

    /// A native animation's completion signal failed.
    #[error("playback error: {0}")]
    Playback(String),

    /// Keyframe JSON that could not be decoded.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl PathglideError {
    /// Build a [`PathglideError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PathglideError::Path`] value.
    pub fn path(msg: impl Into<String>) -> Self {
        Self::Path(msg.into())
    }

    /// Build a [`PathglideError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }
}

impl From<serde_json::Error> for PathglideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
