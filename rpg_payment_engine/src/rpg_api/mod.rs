//! # The RPG payment engine API
//!
//! [`reconciliation_api::ReconciliationApi`] is the entry point for everything the server does with payments. It
//! coordinates the gateway, the record store, the signature verifier and the debug store, and announces committed
//! changes to the event hooks.
pub mod debug_store;
pub mod errors;
pub mod order_objects;
pub mod reconciliation_api;
