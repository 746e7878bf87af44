//! Kalshi balance handler.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use kalshi_client::{Credentials, KalshiError};

use crate::state::AppState;

const BALANCE_PATH: &str = "/trade-api/v2/portfolio/balance";

fn failure_response(status: StatusCode, error: String) -> Response {
    (status, Json(json!({ "status": "error", "error": error }))).into_response()
}

fn classify(err: &KalshiError) -> String {
    if err.is_configuration() {
        format!("Configuration error: {}", err)
    } else {
        format!("Unexpected error: {}", err)
    }
}

/// GET /kalshi/balance
pub async fn balance_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    // Credentials are reconstructed from the environment on every
    // request; a missing variable fails before any network call.
    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => return failure_response(StatusCode::INTERNAL_SERVER_ERROR, classify(&e)),
    };

    let response = match state.kalshi.get(&credentials, BALANCE_PATH).await {
        Ok(r) => r,
        Err(e) => return failure_response(StatusCode::INTERNAL_SERVER_ERROR, classify(&e)),
    };

    let remote_status = response.status.as_u16();
    if remote_status == 200 {
        let data = match response.json() {
            Ok(d) => d,
            Err(e) => {
                return failure_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Unexpected error: {}", e),
                )
            }
        };

        let balance_cents = data.get("balance").and_then(serde_json::Value::as_i64).unwrap_or(0);
        let balance_dollars = format!("{:.2}", balance_cents as f64 / 100.0);

        Json(json!({
            "status": "success",
            "balance_cents": balance_cents,
            "balance_dollars": balance_dollars,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "raw_response": data,
        }))
        .into_response()
    } else {
        // Remote failures pass through with the remote's status code and
        // body.
        let status =
            StatusCode::from_u16(remote_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            Json(json!({
                "status": "error",
                "error": format!("Kalshi API returned status {}", remote_status),
                "response": response.body,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_configuration_errors() {
        let err = KalshiError::MissingCredential("KALSHI_API_KEY_ID");
        let message = classify(&err);
        assert!(message.starts_with("Configuration error:"));
        assert!(message.contains("KALSHI_API_KEY_ID"));
    }

    #[test]
    fn test_classify_transport_errors() {
        let err = KalshiError::Transport("connection reset".to_string());
        assert!(classify(&err).starts_with("Unexpected error:"));
    }

    #[test]
    fn test_balance_dollars_formatting() {
        let balance_cents = 10050_i64;
        assert_eq!(format!("{:.2}", balance_cents as f64 / 100.0), "100.50");
    }
}
