//! # Payment confirmation signatures
//!
//! After checkout, the gateway hands the client an order id, a payment id and a signature. The client forwards all
//! three to us, and we only believe the payment happened if the signature checks out.
//!
//! ## Message format
//!
//! ```text
//!    {order_id}|{payment_id}
//! ```
//!
//! The signature is `HMAC-SHA256(key_secret, message)`, as lowercase hexadecimal. Only the gateway and this server
//! know the key secret.
use hmac::{Hmac, Mac};
use log::*;
use rpg_common::Secret;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Error)]
pub enum SignatureError {
    #[error("The gateway key secret has not been configured, so payment signatures cannot be verified")]
    MissingSecret,
}

#[derive(Clone)]
pub struct PaymentSignatureVerifier {
    secret: Secret<String>,
}

impl PaymentSignatureVerifier {
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }

    /// The hex-encoded signature the gateway would have produced for this order and payment.
    pub fn expected_signature(&self, order_id: &str, payment_id: &str) -> Result<String, SignatureError> {
        let mac = self.mac_for(order_id, payment_id)?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Checks `signature` against the expected value in constant time. Anything that is not lowercase hex is a
    /// mismatch.
    pub fn is_valid(&self, order_id: &str, payment_id: &str, signature: &str) -> Result<bool, SignatureError> {
        let mac = self.mac_for(order_id, payment_id)?;
        if signature.chars().any(|c| c.is_ascii_uppercase()) {
            trace!("🔐️ Signature for {order_id} is not lowercase hex");
            return Ok(false);
        }
        let Ok(bytes) = hex::decode(signature) else {
            trace!("🔐️ Signature for {order_id} is not valid hex");
            return Ok(false);
        };
        let valid = mac.verify_slice(&bytes).is_ok();
        if !valid {
            debug!("🔐️ Signature mismatch for order {order_id}, payment {payment_id}");
        }
        Ok(valid)
    }

    fn mac_for(&self, order_id: &str, payment_id: &str) -> Result<HmacSha256, SignatureError> {
        let secret = self.secret.reveal();
        if secret.is_empty() {
            return Err(SignatureError::MissingSecret);
        }
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::MissingSecret)?;
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        Ok(mac)
    }
}
