use std::path::PathBuf;

/// Convenience result type used across framesmith.
pub type FramesmithResult<T> = Result<T, FramesmithError>;

/// Top-level error taxonomy used by store, timing and encoding APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramesmithError {
    /// Missing or invalid base directory, stem, extension or config file.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A rename, copy, read or write on the file system failed.
    #[error("io error: failed to {op} '{}': {source}", .path.display())]
    Io {
        /// Short verb describing the failed operation.
        op: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Resampling or encoding was invoked on a sequence without frames.
    #[error("empty sequence: {0}")]
    SequenceEmpty(String),

    /// Duration-based resampling was requested without a usable easing curve.
    #[error("invalid easing: {0}")]
    InvalidEasing(String),

    /// Invalid caller-provided arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from codecs and other dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramesmithError {
    /// Build a [`FramesmithError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`FramesmithError::Io`] value.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Build a [`FramesmithError::SequenceEmpty`] value.
    pub fn sequence_empty(msg: impl Into<String>) -> Self {
        Self::SequenceEmpty(msg.into())
    }

    /// Build a [`FramesmithError::InvalidEasing`] value.
    pub fn invalid_easing(msg: impl Into<String>) -> Self {
        Self::InvalidEasing(msg.into())
    }

    /// Build a [`FramesmithError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
