use rpg_common::MinorUnits;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    db_types::{CustomerDetails, OrderId, VerifiedPayment},
    gateway_types::GatewayOrder,
    rpg_api::errors::ReconciliationError,
};

/// A request to open a new order. `amount` is in major units (e.g. rupees) and may be a JSON number or a numeric
/// string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_contact: Option<String>,
}

impl CreateOrderRequest {
    pub fn new<V: Into<Value>>(amount: V) -> Self {
        Self { amount: Some(amount.into()), ..Default::default() }
    }

    pub fn customer(&self) -> CustomerDetails {
        CustomerDetails {
            name: self.customer_name.clone(),
            email: self.customer_email.clone(),
            contact: self.customer_contact.clone(),
        }
    }

    /// The requested amount in minor units. Only strictly positive, finite amounts are accepted.
    pub fn minor_amount(&self) -> Result<MinorUnits, ReconciliationError> {
        let major = match &self.amount {
            None | Some(Value::Null) => return Err(validation("Amount is required")),
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| validation("Amount must be a number"))?,
            Some(Value::String(s)) => {
                s.trim().parse::<f64>().map_err(|_| validation(format!("Amount must be a number, not '{s}'")))?
            },
            Some(_) => return Err(validation("Amount must be a number")),
        };
        if !major.is_finite() || major <= 0.0 {
            return Err(validation("Amount must be a positive number"));
        }
        let minor = MinorUnits::from_major(major).map_err(|e| validation(e.to_string()))?;
        if minor.value() <= 0 {
            return Err(validation("Amount is too small"));
        }
        Ok(minor)
    }
}

fn validation<S: Into<String>>(msg: S) -> ReconciliationError {
    ReconciliationError::ValidationError(msg.into())
}

/// The client's claim that an order has been paid, as relayed from the gateway's checkout. The gateway's own field
/// names are accepted too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(default, alias = "razorpay_order_id")]
    pub order_id: Option<String>,
    #[serde(default, alias = "razorpay_payment_id")]
    pub payment_id: Option<String>,
    #[serde(default, alias = "razorpay_signature")]
    pub signature: Option<String>,
}

impl VerifyPaymentRequest {
    pub fn new(order_id: &str, payment_id: &str, signature: &str) -> Self {
        Self {
            order_id: Some(order_id.to_string()),
            payment_id: Some(payment_id.to_string()),
            signature: Some(signature.to_string()),
        }
    }

    /// Returns `(order_id, payment_id, signature)` if all three are present and non-blank.
    pub fn fields(&self) -> Result<(OrderId, &str, &str), ReconciliationError> {
        match (required(&self.order_id), required(&self.payment_id), required(&self.signature)) {
            (Some(o), Some(p), Some(s)) => Ok((OrderId::from(o), p, s)),
            _ => Err(validation("orderId, paymentId and signature are all required")),
        }
    }
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// What the client needs to open the gateway's checkout for a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order: OrderDetails,
    pub key_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub id: OrderId,
    pub amount: MinorUnits,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

impl From<&GatewayOrder> for OrderDetails {
    fn from(order: &GatewayOrder) -> Self {
        Self {
            id: order.id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            receipt: order.receipt.clone(),
            status: order.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// The signature matched and the record has just been marked as paid.
    Verified(VerifiedPayment),
    /// The signature matched, but the record was already paid. Nothing was changed.
    AlreadyPaid(VerifiedPayment),
    /// The signature did not match. Nothing was changed.
    Rejected,
}

impl VerificationResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, VerificationResult::Rejected)
    }
}
