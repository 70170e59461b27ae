use rpg_common::MinorUnits;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The body of a `POST /v1/orders` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub amount: MinorUnits,
    pub currency: String,
    pub receipt: String,
    /// 1 = capture the payment automatically once it is authorized.
    pub payment_capture: u8,
}

impl NewOrderRequest {
    pub fn new(amount: MinorUnits, currency: String, receipt: String) -> Self {
        Self { amount, currency, receipt, payment_capture: 1 }
    }
}

/// A Razorpay order entity. Only the fields the gateway relies on are typed; everything else Razorpay sends is kept
/// in `extra` so that it survives a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: MinorUnits,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A Razorpay payment entity, as returned by `GET /v1/payments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RazorpayPayment {
    pub id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    pub amount: MinorUnits,
    pub currency: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
