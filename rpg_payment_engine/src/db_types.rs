use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
pub use rpg_common::MinorUnits;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------        OrderId        ---------------------------------------------------------
/// The order identifier issued by the payment gateway, e.g. `order_IluGWxBm9U8zJ8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------     PaymentStatus     ---------------------------------------------------------
/// The only legal transition is `Created` -> `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// The order exists at the gateway, but no verified payment has been seen for it.
    Created,
    /// A payment with a valid signature has been recorded against the order.
    Paid,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Created => write!(f, "CREATED"),
            PaymentStatus::Paid => write!(f, "PAID"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment status: {0}")]
pub struct ConversionError(String);

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "PAID" => Ok(Self::Paid),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------    CustomerDetails    ---------------------------------------------------------
/// Optional contact details supplied by the caller when the order is created. They are stored as-is and never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

//--------------------------------------     PaymentRecord     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PaymentRecord {
    /// Surrogate key, assigned by the store. Later records always have larger ids.
    pub id: i64,
    pub order_id: OrderId,
    /// Set when a verified payment is recorded.
    pub payment_id: Option<String>,
    /// The signature the client submitted with the payment. Set together with `payment_id`.
    pub signature: Option<String>,
    pub amount: MinorUnits,
    pub currency: String,
    pub status: PaymentStatus,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------   NewPaymentRecord    ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewPaymentRecord {
    /// The order id as assigned by the gateway
    pub order_id: OrderId,
    /// The order amount, as confirmed by the gateway
    pub amount: MinorUnits,
    pub currency: String,
    pub customer: CustomerDetails,
    pub created_at: DateTime<Utc>,
}

impl NewPaymentRecord {
    pub fn new(order_id: OrderId, amount: MinorUnits, currency: String) -> Self {
        Self { order_id, amount, currency, customer: CustomerDetails::default(), created_at: Utc::now() }
    }

    pub fn with_customer(mut self, customer: CustomerDetails) -> Self {
        self.customer = customer;
        self
    }
}

//--------------------------------------    VerifiedPayment    ---------------------------------------------------------
/// A payment confirmation that passed signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedPayment {
    pub order_id: OrderId,
    pub payment_id: String,
    pub signature: String,
    pub status: PaymentStatus,
}
