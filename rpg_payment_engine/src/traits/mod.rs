//! # Backend and gateway contracts
//!
//! This module defines the interfaces the reconciliation workflow depends on.
//!
//! * [`PaymentRecordStore`] is implemented by storage backends. It owns the `payments` table and enforces the
//!   uniqueness of order ids and the one-way `CREATED` -> `PAID` transition.
//! * [`PaymentGateway`] is implemented by payment provider clients. It creates remote orders and fetches payments.
mod payment_gateway;
mod payment_record_store;

pub use payment_gateway::{GatewayError, PaymentGateway};
pub use payment_record_store::{PaymentRecordStore, PaymentRecordStoreError};
