//! Signed-request client for the Kalshi trading API.
//!
//! Stateless: credentials are read from the environment on every
//! invocation and each request is individually signed with RSA-PSS.

pub mod client;
pub mod error;
pub mod signing;

pub use client::{ApiResponse, Credentials, KalshiClient};
pub use error::KalshiError;
