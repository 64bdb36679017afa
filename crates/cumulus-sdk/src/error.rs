use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("config error: {0}")]
    Config(String),

    #[error("missing required configuration variable '{0}'")]
    MissingConfig(String),

    #[error("invalid urn: {0}")]
    InvalidUrn(String),

    #[error("duplicate resource: {0}")]
    DuplicateResource(String),

    #[error("{0}")]
    Engine(String),

    #[error("output '{field}' of {urn} could not be decoded: {message}")]
    OutputDecode {
        urn: String,
        field: String,
        message: String,
    },

    #[error("registration task failed: {0}")]
    Task(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An error raised once and observed through several outputs.
    #[error("{0}")]
    Shared(Arc<SdkError>),
}

impl SdkError {
    /// Take back ownership of a shared error when this was its last holder.
    pub fn from_shared(err: Arc<SdkError>) -> Self {
        Arc::try_unwrap(err).unwrap_or_else(Self::Shared)
    }
}
