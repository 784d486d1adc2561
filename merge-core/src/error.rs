//! Error types for the merge engine.

use thiserror::Error;

use crate::spec::SpecError;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can occur while running the merge engine.
#[derive(Error, Debug)]
pub enum MergeError {
    /// The merge spec strings failed to parse.
    #[error("spec error: {0}")]
    Spec(#[from] SpecError),

    /// MongoDB driver error.
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// BSON serialization error.
    #[error("bson error: {0}")]
    Bson(#[from] bson::ser::Error),

    /// BSON deserialization error.
    #[error("bson deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),

    /// Configuration error — e.g. a `MONGODB_URI` with no database component.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// A bulk write or cursor iteration failed mid-phase.
    #[error("transport error during {phase}: {message}")]
    Transport {
        /// Which phase of the state machine was running.
        phase: &'static str,
        /// Driver-reported failure detail.
        message: String,
    },

    /// Internal invariant violation (should not happen for a well-formed spec).
    #[error("internal error: {0}")]
    Internal(String),
}

impl MergeError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a transport error tagged with the phase that produced it.
    pub fn transport(phase: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            phase,
            message: message.into(),
        }
    }

    /// Whether this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = MergeError::config("missing database component");
        assert!(err.is_config_error());

        let err = MergeError::connection("refused");
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_transport_error_display() {
        let err = MergeError::transport("ONE_FANIN", "bulk insert rejected");
        assert_eq!(
            err.to_string(),
            "transport error during ONE_FANIN: bulk insert rejected"
        );
    }

    #[test]
    fn test_spec_error_converts() {
        let spec_err = SpecError::EmptyParentKey {
            index: 0,
            raw: ":foo".to_string(),
        };
        let merge_err: MergeError = spec_err.into();
        assert!(matches!(merge_err, MergeError::Spec(_)));
    }
}
