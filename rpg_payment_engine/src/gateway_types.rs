//! Data exchanged with the payment gateway, independent of any particular provider's wire format.
use rpg_common::MinorUnits;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db_types::OrderId;

/// An order to be created at the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGatewayOrder {
    pub amount: MinorUnits,
    pub currency: String,
    /// The merchant's own reference for the order.
    pub receipt: String,
}

/// An order as the gateway reports it. Provider-specific fields are retained in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: OrderId,
    pub amount: MinorUnits,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A payment as the gateway reports it. This is handed back to callers verbatim, so every field the provider sent is
/// retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayPayment {
    pub id: String,
    pub order_id: Option<OrderId>,
    pub amount: MinorUnits,
    pub currency: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
