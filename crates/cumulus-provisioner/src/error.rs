use cumulus_sdk::SdkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionerError {
    #[error("{urn}: invalid {field}: {message}")]
    Validation {
        urn: String,
        field: String,
        message: String,
    },

    #[error("{urn}: depends on {dependency}, which has not been registered")]
    UnknownDependency { urn: String, dependency: String },

    #[error("{urn}: registered more than once")]
    Duplicate { urn: String },

    #[error("unsupported resource type: {0}")]
    UnsupportedType(String),

    #[error("cyclic dependency detected in resource graph")]
    Cycle,

    #[error("state error: {0}")]
    State(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProvisionerError {
    pub fn validation(urn: impl ToString, field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            urn: urn.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<ProvisionerError> for SdkError {
    fn from(err: ProvisionerError) -> Self {
        SdkError::Engine(err.to_string())
    }
}
