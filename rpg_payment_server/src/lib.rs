//! # RPG server
//! This crate hosts the HTTP server for the Razorpay payment gateway. It is responsible for:
//! * Creating orders at Razorpay on behalf of the storefront, and recording them locally.
//! * Verifying the signed payment confirmations that the storefront forwards after checkout.
//! * Serving the payment records, and the spreadsheet report that is kept up to date in the background.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `POST /api/payments/create-order`: Create a new order.
//! * `POST /api/payments/verify-payment`: Verify a payment signature and mark the order as paid.
//! * `GET /api/payments/payment/{id}`: Fetch a payment from Razorpay.
//! * `GET /api/payments/records`: List the payment records.
//! * `GET /api/payments/export`: Download the payments report.
//! * `GET /api/health`: A health check route.
//! * `GET /last-order`, `GET /last-payment`: Development aids, which can be switched off.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
