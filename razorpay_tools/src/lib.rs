//! A thin client for the parts of the Razorpay REST API that the payment gateway needs: creating orders and fetching
//! payments.
//!
//! The client knows nothing about the payment engine. The server adapts it to the engine's `PaymentGateway` trait.
mod api;
mod config;
mod error;

mod data_objects;
pub mod helpers;

pub use api::RazorpayApi;
pub use config::RazorpayConfig;
pub use data_objects::{NewOrderRequest, RazorpayOrder, RazorpayPayment};
pub use error::RazorpayApiError;
