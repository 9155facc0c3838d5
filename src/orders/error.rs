use thiserror::Error;

/// Order engine errors
///
/// Every failure carries a stable kind plus a human-readable message. The API
/// layer maps these onto the HTTP error envelope.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authorized: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid item index {index} (order has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl OrderError {
    pub fn order_not_found(id: &str) -> Self {
        OrderError::NotFound(format!("Order {} not found", id))
    }
}

/// Result type for order engine operations
pub type OrderResult<T> = Result<T, OrderError>;
