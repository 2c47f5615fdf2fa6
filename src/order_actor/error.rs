use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::line_item_actor::LineItemError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Product with ID {0} not found.")]
    ProductNotFound(String),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Insufficient stock for product ID {product_id}. Available stock: {available}, Requested: {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: u32,
    },
    #[error("Order internal error: {0}")]
    Internal(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => Self::NotFound(id),
            FrameworkError::Rejected(reason) => Self::Internal(reason),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => Self::ProductNotFound(id),
            ProductError::InsufficientStock {
                product_id,
                requested,
                available,
            } => Self::InsufficientStock {
                product_id,
                available,
                requested,
            },
            ProductError::ActorCommunicationError(msg) => Self::ActorCommunicationError(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<LineItemError> for OrderError {
    fn from(err: LineItemError) -> Self {
        match err {
            LineItemError::ActorCommunicationError(msg) => Self::ActorCommunicationError(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<UserError> for OrderError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::ActorCommunicationError(msg) => Self::ActorCommunicationError(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}
