/// Result alias used throughout the crate.
pub type StoryResult<T> = Result<T, StoryError>;

/// Error type for scene loading, validation and playback plumbing.
///
/// Playback itself degrades softly: the engine logs and skips most failures instead of
/// returning them. These variants surface at the edges (loading, validation, explicit lookups).
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// Authored data violates a structural invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A condition expression failed to lex, parse or evaluate.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// An audio source failed to load or a track lookup failed.
    #[error("audio error: {0}")]
    Audio(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`StoryError::Audio`].
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`StoryError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
