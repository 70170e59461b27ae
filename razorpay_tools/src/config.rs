use std::time::Duration;

use log::*;
use rpg_common::Secret;

pub const DEFAULT_RAZORPAY_BASE_URL: &str = "https://api.razorpay.com";
pub const DEFAULT_RAZORPAY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// The base URL of the Razorpay API, without the version prefix. e.g. "https://api.razorpay.com"
    pub base_url: String,
    /// The public key id. This is safe to share with browsers, and is needed by the checkout widget.
    pub key_id: String,
    /// The API secret. It authenticates API calls and is the HMAC key for payment signatures.
    pub key_secret: Secret<String>,
    /// Upper bound on the duration of any single API call.
    pub timeout: Duration,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RAZORPAY_BASE_URL.to_string(),
            key_id: String::default(),
            key_secret: Secret::default(),
            timeout: DEFAULT_RAZORPAY_TIMEOUT,
        }
    }
}

impl RazorpayConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("RAZORPAY_BASE_URL").unwrap_or_else(|_| {
            debug!("🪛️ RAZORPAY_BASE_URL not set, using {DEFAULT_RAZORPAY_BASE_URL} as default");
            DEFAULT_RAZORPAY_BASE_URL.to_string()
        });
        let key_id = std::env::var("RAZORPAY_KEY_ID").unwrap_or_else(|_| {
            warn!("🪛️ RAZORPAY_KEY_ID not set. Order creation will be rejected by Razorpay.");
            String::default()
        });
        let key_secret = Secret::new(std::env::var("RAZORPAY_KEY_SECRET").unwrap_or_else(|_| {
            warn!("🪛️ RAZORPAY_KEY_SECRET not set. Gateway calls and payment verification will fail.");
            String::default()
        }));
        let timeout = std::env::var("RAZORPAY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>().map_err(|e| warn!("🪛️ Invalid value for RAZORPAY_TIMEOUT_SECS ({s}). {e}")).ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RAZORPAY_TIMEOUT);
        Self { base_url, key_id, key_secret, timeout }
    }
}
