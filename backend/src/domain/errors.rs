//! Error taxonomy of the allocation engine.
//!
//! `NotFound`, `InvalidState` and `Validation` are logical failures: the
//! caller should surface them as-is and never retry. `UpstreamIo` wraps a
//! failed record store call and may be retried at the caller's discretion.

use super::models::payment::PaymentValidationError;
use super::models::product::ProductValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Record store failure: {0}")]
    UpstreamIo(#[from] anyhow::Error),
}

pub type AllocationResult<T> = std::result::Result<T, AllocationError>;

impl AllocationError {
    pub fn product_not_found(id: &str) -> Self {
        AllocationError::NotFound { entity: "Product", id: id.to_string() }
    }

    pub fn allocation_not_found(id: &str) -> Self {
        AllocationError::NotFound { entity: "Allocation", id: id.to_string() }
    }

    pub fn user_not_found(id: &str) -> Self {
        AllocationError::NotFound { entity: "User", id: id.to_string() }
    }

    /// Stable identifier used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AllocationError::NotFound { .. } => "not_found",
            AllocationError::InvalidState(_) => "invalid_state",
            AllocationError::Validation(_) => "validation_error",
            AllocationError::UpstreamIo(_) => "upstream_io",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AllocationError::UpstreamIo(_))
    }
}

impl From<PaymentValidationError> for AllocationError {
    fn from(err: PaymentValidationError) -> Self {
        AllocationError::Validation(err.to_string())
    }
}

impl From<ProductValidationError> for AllocationError {
    fn from(err: ProductValidationError) -> Self {
        AllocationError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_upstream_failures_are_retryable() {
        assert!(!AllocationError::product_not_found("x").is_retryable());
        assert!(!AllocationError::InvalidState("already withdrawn".into()).is_retryable());
        assert!(!AllocationError::Validation("bad".into()).is_retryable());
        assert!(AllocationError::from(anyhow::anyhow!("disk full")).is_retryable());
    }

    #[test]
    fn test_kinds_and_messages() {
        let err = AllocationError::allocation_not_found("allocation::1");
        assert_eq!(err.kind(), "not_found");
        assert_eq!(err.to_string(), "Allocation not found: allocation::1");

        let err: AllocationError = PaymentValidationError::InvalidEmail.into();
        assert_eq!(err.kind(), "validation_error");
        assert!(err.to_string().contains("Valid email is required"));
    }
}
