//! RSA-PSS request signing.
//!
//! Kalshi authenticates requests with a detached signature over the
//! canonical string `timestamp + method + path` (no delimiter), where the
//! timestamp is milliseconds since epoch as a decimal string. The
//! signature is RSA-PSS with MGF1/SHA-256, salt length equal to the
//! digest length, base64-encoded.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::pss::SigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha2::Sha256;

use crate::error::KalshiError;

/// Decode a base64-encoded PEM private key (no passphrase).
///
/// Accepts PKCS#8 ("BEGIN PRIVATE KEY") and PKCS#1 ("BEGIN RSA PRIVATE
/// KEY") encodings.
pub fn decode_private_key(key_b64: &str) -> Result<RsaPrivateKey, KalshiError> {
    let pem_bytes = BASE64
        .decode(key_b64.trim())
        .map_err(|e| KalshiError::InvalidKey(format!("not valid base64: {}", e)))?;

    let pem = String::from_utf8(pem_bytes)
        .map_err(|e| KalshiError::InvalidKey(format!("not valid UTF-8 PEM: {}", e)))?;

    RsaPrivateKey::from_pkcs8_pem(&pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&pem))
        .map_err(|e| KalshiError::InvalidKey(e.to_string()))
}

/// Build the canonical string that gets signed.
pub fn signing_message(timestamp_ms: i64, method: &str, path: &str) -> String {
    format!("{}{}{}", timestamp_ms, method, path)
}

/// Sign the canonical string for one request; returns the base64
/// signature.
pub fn sign_request(
    private_key: &RsaPrivateKey,
    timestamp_ms: i64,
    method: &str,
    path: &str,
) -> Result<String, KalshiError> {
    let message = signing_message(timestamp_ms, method, path);

    // SigningKey::new uses a salt length equal to the digest length.
    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key
        .try_sign_with_rng(&mut rand::thread_rng(), message.as_bytes())
        .map_err(|e| KalshiError::Signing(e.to_string()))?;

    Ok(BASE64.encode(signature.to_bytes()))
}
