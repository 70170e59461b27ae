use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPaymentRecord, OrderId, PaymentRecord},
    traits::PaymentRecordStoreError,
};

/// Inserts the record, returning `false` in the second parameter if a record for the order already exists. In that
/// case the existing record is returned unchanged.
pub async fn idempotent_insert(
    record: NewPaymentRecord,
    conn: &mut SqliteConnection,
) -> Result<(PaymentRecord, bool), PaymentRecordStoreError> {
    let order_id = record.order_id.clone();
    match insert_record(record, conn).await? {
        Some(record) => Ok((record, true)),
        None => {
            trace!("🗃️ Insert for order {order_id} was a no-op");
            let existing = fetch_by_order_id(&order_id, conn)
                .await?
                .ok_or_else(|| PaymentRecordStoreError::RecordNotFound(order_id))?;
            Ok((existing, false))
        },
    }
}

async fn insert_record(
    record: NewPaymentRecord,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, PaymentRecordStoreError> {
    let record = sqlx::query_as(
        r#"
            INSERT INTO payments (
                order_id,
                amount,
                currency,
                status,
                customer_name,
                customer_email,
                customer_contact,
                created_at
            ) VALUES ($1, $2, $3, 'CREATED', $4, $5, $6, $7)
            ON CONFLICT(order_id) DO NOTHING
            RETURNING *;
        "#,
    )
    .bind(record.order_id)
    .bind(record.amount)
    .bind(record.currency)
    .bind(record.customer.name)
    .bind(record.customer.email)
    .bind(record.customer.contact)
    .bind(record.created_at)
    .fetch_optional(conn)
    .await?;
    Ok(record)
}

/// Moves a `CREATED` record to `PAID`. Returns `None` if no record in the `CREATED` state matched.
pub async fn mark_paid(
    order_id: &OrderId,
    payment_id: &str,
    signature: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, PaymentRecordStoreError> {
    let record = sqlx::query_as(
        r#"
            UPDATE payments
            SET payment_id = $1, signature = $2, status = 'PAID'
            WHERE order_id = $3 AND status = 'CREATED'
            RETURNING *;
        "#,
    )
    .bind(payment_id)
    .bind(signature)
    .bind(order_id.as_str())
    .fetch_optional(conn)
    .await?;
    Ok(record)
}

pub async fn fetch_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, PaymentRecordStoreError> {
    let record = sqlx::query_as("SELECT * FROM payments WHERE order_id = $1")
        .bind(order_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(record)
}

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<PaymentRecord>, PaymentRecordStoreError> {
    let records = sqlx::query_as("SELECT * FROM payments ORDER BY id DESC").fetch_all(conn).await?;
    Ok(records)
}
