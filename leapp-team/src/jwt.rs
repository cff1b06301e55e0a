//! Access token expiry.
//!
//! Only the payload segment is inspected. Signatures are the backend's
//! concern; the device just needs to know when to stop trusting a token.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::Utc;
use serde_json::Value;
use tracing::warn;

/// True once the token's `exp` claim is at or before the current time.
pub fn is_jwt_token_expired(token: &str) -> bool {
    is_jwt_token_expired_at(token, Utc::now().timestamp())
}

/// [`is_jwt_token_expired`] against an explicit clock, in epoch seconds.
///
/// A token whose payload cannot be read counts as expired.
pub fn is_jwt_token_expired_at(token: &str, now: i64) -> bool {
    match expiration(token) {
        Some(exp) => now >= exp,
        None => {
            warn!("access token payload unreadable, treating as expired");
            true
        }
    }
}

fn expiration(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = STANDARD
        .decode(payload)
        .or_else(|_| URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')))
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    match claims.get("exp")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
