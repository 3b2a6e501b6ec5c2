use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order already finalized: {0}")]
    AlreadyFinal(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
