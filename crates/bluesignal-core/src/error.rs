//! Error types for BlueSignal

/// Result type alias using BlueSignal's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for BlueSignal operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classification backend errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Generative backend errors
    #[error("backend error: {0}")]
    Backend(String),

    /// Persistence collaborator errors
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Authentication/authorization errors
    #[error("auth error: {0}")]
    Auth(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a new persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a new auth error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
