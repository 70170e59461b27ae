//! RPG Payment Engine
//!
//! The RPG payment engine keeps three views of a payment consistent: the order as the payment gateway sees it, the
//! payment record persisted locally, and the spreadsheet report that is regenerated whenever a record changes.
//! It is provider-agnostic. The gateway is reached through the [`traits::PaymentGateway`] trait.
//!
//! The library is divided into the following sections:
//! 1. Storage ([`mod@sqlite`]). A single `payments` table, accessed through the [`traits::PaymentRecordStore`] trait.
//!    SQLite is the only supported backend.
//! 2. The public API ([`mod@rpg_api`]). [`ReconciliationApi`] creates orders, verifies payment signatures, and lists
//!    records. Clients should use this API rather than the store directly.
//! 3. Reporting ([`mod@report`]). Builds the xlsx export from the store.
//!
//! The engine emits a [`events::RecordChangedEvent`] after every committed change to a payment record. The report
//! export task subscribes to these events, so the spreadsheet follows the database without blocking callers.
pub mod db_types;
pub mod events;
pub mod gateway_types;
pub mod helpers;
pub mod report;
pub mod rpg_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use rpg_api::{
    debug_store::DebugStore,
    errors::ReconciliationError,
    order_objects,
    reconciliation_api::ReconciliationApi,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{PaymentGateway, PaymentRecordStore};
