use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
    Mutex,
};

use serde_json::{json, Map};

use crate::{
    db_types::OrderId,
    gateway_types::{GatewayOrder, GatewayPayment, NewGatewayOrder},
    traits::{GatewayError, PaymentGateway},
};

pub const FAKE_KEY_ID: &str = "rzp_test_fake";
pub const FAKE_KEY_SECRET: &str = "fake_secret";

/// An in-process gateway. Orders get sequential ids (`order_fake_1`, `order_fake_2`, ...). Payments must be added
/// with [`FakeGateway::add_payment`] before they can be fetched.
#[derive(Clone, Default)]
pub struct FakeGateway {
    next_id: Arc<AtomicU64>,
    payments: Arc<Mutex<Vec<GatewayPayment>>>,
    failure: Arc<Mutex<Option<String>>>,
    fixed_order_id: Arc<Mutex<Option<String>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent call fails with an upstream error carrying `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Every subsequent order is given the same id, as a gateway replaying a response would.
    pub fn always_return_order_id(&self, order_id: &str) {
        *self.fixed_order_id.lock().unwrap() = Some(order_id.to_string());
    }

    pub fn add_payment(&self, payment_id: &str, order_id: &str, amount: i64) {
        let payment = GatewayPayment {
            id: payment_id.to_string(),
            order_id: Some(OrderId::from(order_id)),
            amount: amount.into(),
            currency: "INR".to_string(),
            status: "captured".to_string(),
            extra: json!({"method": "upi", "captured": true}).as_object().cloned().unwrap_or_default(),
        };
        self.payments.lock().unwrap().push(payment);
    }

    pub fn orders_created(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), GatewayError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(msg) => Err(GatewayError::Upstream(msg.clone())),
            None => Ok(()),
        }
    }
}

impl PaymentGateway for FakeGateway {
    fn key_id(&self) -> String {
        FAKE_KEY_ID.to_string()
    }

    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, GatewayError> {
        self.check_failure()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = self.fixed_order_id.lock().unwrap().clone().unwrap_or_else(|| format!("order_fake_{n}"));
        let mut extra = Map::new();
        extra.insert("amount_paid".into(), json!(0));
        extra.insert("attempts".into(), json!(0));
        Ok(GatewayOrder {
            id: OrderId::from(id),
            amount: order.amount,
            currency: order.currency,
            receipt: Some(order.receipt),
            status: "created".to_string(),
            extra,
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        self.check_failure()?;
        self.payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == payment_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                id: payment_id.to_string(),
                message: format!("The id provided does not exist: {payment_id}"),
            })
    }
}
