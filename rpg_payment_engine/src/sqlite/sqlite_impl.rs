//! `SqliteDatabase` is the concrete [`PaymentRecordStore`] used by the server.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate, migrate::MigrateError, SqlitePool};

use super::db::{new_pool, payments};
use crate::{
    db_types::{NewPaymentRecord, OrderId, PaymentRecord},
    traits::{PaymentRecordStore, PaymentRecordStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({})", self.url)
    }
}

impl PaymentRecordStore for SqliteDatabase {
    async fn insert_record(&self, record: NewPaymentRecord) -> Result<(PaymentRecord, bool), PaymentRecordStoreError> {
        let mut conn = self.pool.acquire().await?;
        let (record, inserted) = payments::idempotent_insert(record, &mut conn).await?;
        if inserted {
            debug!("🗃️ Payment record for order {} saved with id {}", record.order_id, record.id);
        } else {
            debug!("🗃️ Payment record for order {} already exists (id {})", record.order_id, record.id);
        }
        Ok((record, inserted))
    }

    async fn mark_record_paid(
        &self,
        order_id: &OrderId,
        payment_id: &str,
        signature: &str,
    ) -> Result<PaymentRecord, PaymentRecordStoreError> {
        let mut conn = self.pool.acquire().await?;
        match payments::mark_paid(order_id, payment_id, signature, &mut conn).await? {
            Some(record) => {
                debug!("🗃️ Order {order_id} is now paid by payment {payment_id}");
                Ok(record)
            },
            None => match payments::fetch_by_order_id(order_id, &mut conn).await? {
                Some(_) => Err(PaymentRecordStoreError::AlreadyPaid(order_id.clone())),
                None => Err(PaymentRecordStoreError::RecordNotFound(order_id.clone())),
            },
        }
    }

    async fn fetch_record_by_order_id(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<PaymentRecord>, PaymentRecordStoreError> {
        let mut conn = self.pool.acquire().await?;
        let record = payments::fetch_by_order_id(order_id, &mut conn).await?;
        Ok(record)
    }

    async fn fetch_all_records(&self) -> Result<Vec<PaymentRecord>, PaymentRecordStoreError> {
        let mut conn = self.pool.acquire().await?;
        let records = payments::fetch_all(&mut conn).await?;
        trace!("🗃️ Fetched {} payment records", records.len());
        Ok(records)
    }
}

impl SqliteDatabase {
    /// Opens a connection pool to `url`. The database file is created if it does not exist yet.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Migrations that have already been applied are skipped.
    pub async fn run_migrations(&self) -> Result<(), MigrateError> {
        migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }
}
