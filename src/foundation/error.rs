/// Convenience result type used across unfurl.
pub type RevealResult<T> = Result<T, RevealError>;

/// Error taxonomy for the configuration and trace boundary.
///
/// Runtime event handling never returns errors: missing elements and duplicate
/// triggers degrade to skipped effects instead.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Invalid controller configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid input data outside the config (viewport sizes, policies).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or out-of-order event trace.
    #[error("trace error: {0}")]
    Trace(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::Trace`] value.
    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace(msg.into())
    }

    /// Build a [`RevealError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
