/// Convenience result type used across jokeframe.
pub type JokeframeResult<T> = Result<T, JokeframeError>;

/// Top-level error taxonomy used by the compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum JokeframeError {
    /// Image bytes could not be decoded. The caller keeps its prior state.
    #[error("decode error: {0}")]
    Decode(String),

    /// Zero-area source image or frame. Raised before any drawing happens.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The finished frame could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JokeframeError {
    /// Build a [`JokeframeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`JokeframeError::DegenerateGeometry`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`JokeframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`JokeframeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// True for errors that abort a render without touching session state.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
