//! Authenticated HTTP client for the Kalshi API.

use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use rsa::RsaPrivateKey;

use crate::error::KalshiError;
use crate::signing;

const API_KEY_ID_VAR: &str = "KALSHI_API_KEY_ID";
const PRIVATE_KEY_VAR: &str = "KALSHI_PRIVATE_KEY";

/// Request timeout for calls to the remote API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// API credentials, reconstructed from the environment on every request.
///
/// Never cached across requests and never logged.
pub struct Credentials {
    pub api_key_id: String,
    pub private_key: RsaPrivateKey,
}

impl Credentials {
    /// Read credentials from `KALSHI_API_KEY_ID` and `KALSHI_PRIVATE_KEY`
    /// (base64-encoded PEM). Fails fast before any network activity.
    pub fn from_env() -> Result<Self, KalshiError> {
        let api_key_id = std::env::var(API_KEY_ID_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(KalshiError::MissingCredential(API_KEY_ID_VAR))?;

        let key_b64 = std::env::var(PRIVATE_KEY_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(KalshiError::MissingCredential(PRIVATE_KEY_VAR))?;

        let private_key = signing::decode_private_key(&key_b64)?;

        Ok(Self {
            api_key_id,
            private_key,
        })
    }
}

/// Response from the remote API, status and body intact.
///
/// Non-2xx statuses are not errors at this layer; the caller decides how
/// to surface them.
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Client for authenticated GET requests.
pub struct KalshiClient {
    http: reqwest::Client,
    base_url: String,
}

impl KalshiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, KalshiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| KalshiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Issue a signed GET to `base_url + path`.
    pub async fn get(
        &self,
        credentials: &Credentials,
        path: &str,
    ) -> Result<ApiResponse, KalshiError> {
        let timestamp_ms = Utc::now().timestamp_millis();
        let signature =
            signing::sign_request(&credentials.private_key, timestamp_ms, "GET", path)?;

        tracing::debug!(path, "issuing signed request");

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header("KALSHI-ACCESS-KEY", &credentials.api_key_id)
            .header("KALSHI-ACCESS-SIGNATURE", signature)
            .header("KALSHI-ACCESS-TIMESTAMP", timestamp_ms.to_string())
            .send()
            .await
            .map_err(|e| KalshiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| KalshiError::Transport(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_json() {
        let response = ApiResponse {
            status: StatusCode::OK,
            body: r#"{"balance": 10050}"#.to_string(),
        };
        let data = response.json().unwrap();
        assert_eq!(data["balance"], 10050);
    }

    #[test]
    fn test_api_response_json_rejects_non_json_body() {
        let response = ApiResponse {
            status: StatusCode::BAD_GATEWAY,
            body: "<html>upstream error</html>".to_string(),
        };
        assert!(response.json().is_err());
    }

    #[test]
    fn test_client_construction() {
        assert!(KalshiClient::new("https://api.elections.kalshi.com").is_ok());
    }
}
