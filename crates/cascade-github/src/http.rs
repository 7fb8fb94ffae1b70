//! Shared HTTP response helpers for the GraphQL client.
//!
//! Centralizes status-code checks (rate limiting with `Retry-After` parsing,
//! non-success → [`GatewayError::Api`]) so the operation modules stay
//! focused on query construction and response mapping.

use crate::error::GatewayError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429**, or **403** with `x-ratelimit-remaining: 0` →
///   [`GatewayError::RateLimited`] (`Retry-After` falls back to 60 s).
/// - **Non-success status** → [`GatewayError::Api`] with status and body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status().as_u16();
    if status == 429 || (status == 403 && rate_limit_exhausted(&resp)) {
        return Err(GatewayError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(GatewayError::Api {
            status,
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn rate_limit_exhausted(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
