//! Adapters between third-party payment providers and the payment engine.
pub mod razorpay;
