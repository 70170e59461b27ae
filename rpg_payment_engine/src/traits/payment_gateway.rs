use thiserror::Error;

use crate::gateway_types::{GatewayOrder, GatewayPayment, NewGatewayOrder};

/// A remote payment processor.
///
/// Implementations must not retry failed calls. Errors are reported once, with the provider's message.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    /// The public key identifier that clients need to open the provider's checkout. This is never the secret.
    fn key_id(&self) -> String;

    /// Creates an order at the gateway. Payments are captured automatically.
    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, GatewayError>;

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError>;
}

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("The gateway does not know about {id}. {message}")]
    NotFound { id: String, message: String },
    #[error("{0}")]
    Upstream(String),
}
