//! Error types for the Kalshi client.

use thiserror::Error;

/// Errors from credential loading, signing, and transport.
#[derive(Debug, Error)]
pub enum KalshiError {
    #[error("{0} environment variable must be set")]
    MissingCredential(&'static str),

    #[error("invalid KALSHI_PRIVATE_KEY: {0}")]
    InvalidKey(String),

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("request to Kalshi failed: {0}")]
    Transport(String),
}

impl KalshiError {
    /// Whether this failure is a local configuration problem rather than
    /// a transport or remote failure. Callers render the two classes with
    /// different messages.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            KalshiError::MissingCredential(_) | KalshiError::InvalidKey(_)
        )
    }
}
