use thiserror::Error;

use crate::{
    helpers::SignatureError,
    report::ReportError,
    traits::{GatewayError, PaymentRecordStoreError},
};

/// Everything that can go wrong in a reconciliation call. The variants map one-to-one onto the response classes the
/// server reports: bad input, upstream failure, unknown entity, storage failure and misconfiguration.
#[derive(Debug, Clone, Error)]
pub enum ReconciliationError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    GatewayError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    StorageError(String),
    #[error("{0}")]
    ConfigurationError(String),
}

impl From<PaymentRecordStoreError> for ReconciliationError {
    fn from(e: PaymentRecordStoreError) -> Self {
        match e {
            PaymentRecordStoreError::RecordNotFound(order_id) => {
                Self::NotFoundError(format!("No payment record exists for order {order_id}"))
            },
            e => Self::StorageError(e.to_string()),
        }
    }
}

impl From<GatewayError> for ReconciliationError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotFound { id, message } => {
                Self::NotFoundError(format!("{id} was not found at the payment gateway. {message}"))
            },
            GatewayError::Upstream(msg) => Self::GatewayError(msg),
        }
    }
}

impl From<SignatureError> for ReconciliationError {
    fn from(e: SignatureError) -> Self {
        Self::ConfigurationError(e.to_string())
    }
}

impl From<ReportError> for ReconciliationError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::NotGenerated(_) => Self::NotFoundError("No report has been generated yet".to_string()),
            e => Self::StorageError(e.to_string()),
        }
    }
}
