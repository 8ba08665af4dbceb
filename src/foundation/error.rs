/// Convenience result type used across unveil.
pub type UnveilResult<T> = Result<T, UnveilError>;

/// Top-level error taxonomy used by observation and reveal APIs.
#[derive(thiserror::Error, Debug)]
pub enum UnveilError {
    /// Invalid user-provided scene or layout data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A preset name outside the fixed preset table was requested.
    #[error("unknown preset kind: '{0}'")]
    UnknownPresetKind(String),

    /// Reveal timing is out of range (non-positive duration, negative stagger or delay).
    #[error("invalid reveal config: {0}")]
    InvalidRevealConfig(String),

    /// Threshold or root margin could not be accepted.
    #[error("invalid observation config: {0}")]
    InvalidObservationConfig(String),

    /// The host cannot provide intersection data.
    ///
    /// Observers recover from this locally by failing open; it is only ever returned by
    /// [`IntersectionBackend`](crate::IntersectionBackend) implementations.
    #[error("observation unavailable: {0}")]
    ObservationUnavailable(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UnveilError {
    /// Build a [`UnveilError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`UnveilError::UnknownPresetKind`] value.
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPresetKind(name.into())
    }

    /// Build a [`UnveilError::InvalidRevealConfig`] value.
    pub fn reveal_config(msg: impl Into<String>) -> Self {
        Self::InvalidRevealConfig(msg.into())
    }

    /// Build a [`UnveilError::InvalidObservationConfig`] value.
    pub fn observation_config(msg: impl Into<String>) -> Self {
        Self::InvalidObservationConfig(msg.into())
    }

    /// Build a [`UnveilError::ObservationUnavailable`] value.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ObservationUnavailable(msg.into())
    }

    /// Build a [`UnveilError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors caused by caller-supplied configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::UnknownPresetKind(_)
                | Self::InvalidRevealConfig(_)
                | Self::InvalidObservationConfig(_)
        )
    }
}

impl From<serde_json::Error> for UnveilError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
