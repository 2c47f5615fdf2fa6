use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during line item operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineItemError {
    #[error("Line item not found: {0}")]
    NotFound(String),
    #[error("Line item validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for LineItemError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => Self::NotFound(id),
            FrameworkError::Rejected(reason) => Self::ValidationError(reason),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}
