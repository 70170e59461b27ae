use crate::db_types::{OrderId, PaymentStatus};

/// Emitted after a change to a payment record has been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordChangedEvent {
    pub order_id: OrderId,
    pub status: PaymentStatus,
}

impl RecordChangedEvent {
    pub fn new(order_id: OrderId, status: PaymentStatus) -> Self {
        Self { order_id, status }
    }
}
