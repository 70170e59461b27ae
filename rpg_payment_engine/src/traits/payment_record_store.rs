use thiserror::Error;

use crate::db_types::{NewPaymentRecord, OrderId, PaymentRecord};

/// Storage for payment records.
///
/// Every write is a single statement, so implementations do not need transactions to stay consistent.
#[allow(async_fn_in_trait)]
pub trait PaymentRecordStore {
    /// Stores a new record with status `CREATED`.
    ///
    /// This call is idempotent. If a record with the same order id already exists, it is returned unchanged and the
    /// second element of the tuple is `false`.
    async fn insert_record(&self, record: NewPaymentRecord) -> Result<(PaymentRecord, bool), PaymentRecordStoreError>;

    /// Sets the payment id and signature on the record for `order_id` and moves it to `PAID`.
    ///
    /// Only a record in the `CREATED` state is updated. If the record is already paid,
    /// [`PaymentRecordStoreError::AlreadyPaid`] is returned and the row is left untouched. If no record exists,
    /// [`PaymentRecordStoreError::RecordNotFound`] is returned.
    async fn mark_record_paid(
        &self,
        order_id: &OrderId,
        payment_id: &str,
        signature: &str,
    ) -> Result<PaymentRecord, PaymentRecordStoreError>;

    async fn fetch_record_by_order_id(&self, order_id: &OrderId)
        -> Result<Option<PaymentRecord>, PaymentRecordStoreError>;

    /// Fetches every record, most recent (highest id) first.
    async fn fetch_all_records(&self) -> Result<Vec<PaymentRecord>, PaymentRecordStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum PaymentRecordStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("No payment record exists for order {0}")]
    RecordNotFound(OrderId),
    #[error("The payment record for order {0} has already been marked as paid")]
    AlreadyPaid(OrderId),
}

impl From<sqlx::Error> for PaymentRecordStoreError {
    fn from(e: sqlx::Error) -> Self {
        PaymentRecordStoreError::DatabaseError(e.to_string())
    }
}
