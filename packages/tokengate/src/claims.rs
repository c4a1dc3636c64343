//! Registered JWT claims shared across issuing and verification.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Standard registered claims (RFC 7519 §4.1 subset).
///
/// All fields are optional; absent fields are omitted from the payload
/// entirely so that temporal validation only applies to claims the
/// issuer actually set. Services with richer identity payloads supply
/// their own claims struct instead — the issuer and verifier are
/// generic over any (de)serializable claims type.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RegisteredClaims {
    /// Subject the token was issued to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issuing party.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Issued-at (seconds since epoch).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry (seconds since epoch).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Not-before (seconds since epoch).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

impl RegisteredClaims {
    /// Claims for `sub`, issued at `now` and expiring after `ttl`.
    pub fn with_ttl(sub: impl Into<String>, now: SystemTime, ttl: Duration) -> Self {
        let iat = unix_seconds(now);
        Self {
            sub: Some(sub.into()),
            iss: None,
            iat: Some(iat),
            exp: Some(iat + ttl.as_secs() as i64),
            nbf: None,
        }
    }
}

fn unix_seconds(t: SystemTime) -> i64 {
    t.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
