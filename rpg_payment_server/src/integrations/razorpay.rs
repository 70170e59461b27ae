//! Adapts the Razorpay REST client to the engine's [`PaymentGateway`] trait.
use log::*;
use razorpay_tools::{NewOrderRequest, RazorpayApi, RazorpayApiError, RazorpayOrder, RazorpayPayment};
use rpg_payment_engine::{
    db_types::OrderId,
    gateway_types::{GatewayOrder, GatewayPayment, NewGatewayOrder},
    traits::{GatewayError, PaymentGateway},
};

#[derive(Clone)]
pub struct RazorpayGateway {
    api: RazorpayApi,
}

impl RazorpayGateway {
    pub fn new(api: RazorpayApi) -> Self {
        Self { api }
    }
}

impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> String {
        self.api.key_id().to_string()
    }

    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, GatewayError> {
        let request = NewOrderRequest::new(order.amount, order.currency, order.receipt);
        let order = self.api.create_order(request).await.map_err(upstream_error)?;
        Ok(gateway_order(order))
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        let payment = self.api.fetch_payment(payment_id).await.map_err(|e| lookup_error(e, payment_id))?;
        Ok(gateway_payment(payment))
    }
}

/// Every failure is an upstream failure, carrying Razorpay's own message.
fn upstream_error(e: RazorpayApiError) -> GatewayError {
    warn!("💳️ Razorpay call failed. {e}");
    match e {
        RazorpayApiError::QueryError { message, .. } => GatewayError::Upstream(message),
        e => GatewayError::Upstream(e.to_string()),
    }
}

/// As [`upstream_error`], except that an unknown `id` is reported as such.
fn lookup_error(e: RazorpayApiError, id: &str) -> GatewayError {
    if !e.is_not_found() {
        return upstream_error(e);
    }
    debug!("💳️ Razorpay does not know about {id}. {e}");
    let message = match e {
        RazorpayApiError::QueryError { message, .. } => message,
        e => e.to_string(),
    };
    GatewayError::NotFound { id: id.to_string(), message }
}

pub fn gateway_order(order: RazorpayOrder) -> GatewayOrder {
    GatewayOrder {
        id: OrderId::from(order.id),
        amount: order.amount,
        currency: order.currency,
        receipt: order.receipt,
        status: order.status,
        extra: order.extra,
    }
}

pub fn gateway_payment(payment: RazorpayPayment) -> GatewayPayment {
    GatewayPayment {
        id: payment.id,
        order_id: payment.order_id.map(OrderId::from),
        amount: payment.amount,
        currency: payment.currency,
        status: payment.status,
        extra: payment.extra,
    }
}
