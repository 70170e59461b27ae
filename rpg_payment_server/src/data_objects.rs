use std::fmt::Display;

use chrono::{DateTime, Utc};
use rpg_payment_engine::{
    db_types::{MinorUnits, OrderId, PaymentRecord, PaymentStatus, VerifiedPayment},
    gateway_types::{GatewayOrder, GatewayPayment},
    order_objects::{OrderDetails, OrderSummary},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub message: String,
    pub order: OrderDetails,
    pub key_id: String,
}

impl From<OrderSummary> for CreateOrderResponse {
    fn from(summary: OrderSummary) -> Self {
        Self {
            success: true,
            message: "Order created successfully".to_string(),
            order: summary.order,
            key_id: summary.key_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub order_id: OrderId,
    pub payment_id: String,
}

impl VerifyPaymentResponse {
    pub fn new<S: Display>(message: S, payment: VerifiedPayment) -> Self {
        Self { success: true, message: message.to_string(), order_id: payment.order_id, payment_id: payment.payment_id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetailsResponse {
    pub success: bool,
    pub message: String,
    pub payment: GatewayPayment,
}

/// A payment record as exposed over the API. The client's signature is not included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecordResponse {
    pub id: i64,
    pub order_id: OrderId,
    pub payment_id: Option<String>,
    /// In minor units (e.g. paise)
    pub amount: MinorUnits,
    /// In major units (e.g. rupees)
    pub amount_major: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentRecord> for PaymentRecordResponse {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id,
            order_id: record.order_id,
            payment_id: record.payment_id,
            amount: record.amount,
            amount_major: record.amount.to_major(),
            currency: record.currency,
            status: record.status,
            customer_name: record.customer_name,
            customer_email: record.customer_email,
            customer_contact: record.customer_contact,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub success: bool,
    pub payments: Vec<PaymentRecordResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastOrderResponse {
    pub ok: bool,
    pub last_order: GatewayOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPaymentResponse {
    pub ok: bool,
    pub last_payment: VerifiedPayment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugNotFound {
    pub ok: bool,
    pub message: String,
}

impl DebugNotFound {
    pub fn new<S: Display>(message: S) -> Self {
        Self { ok: false, message: message.to_string() }
    }
}
