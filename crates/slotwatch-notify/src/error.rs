//! Errors for outbound delivery.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("webhook request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },
}
