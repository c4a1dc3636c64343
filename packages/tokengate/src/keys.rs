//! Verification-key resolution.

use jsonwebtoken::{DecodingKey, Header};
use thiserror::Error;

/// A key lookup failed.
///
/// The detail is logged by the verifier but never reaches the HTTP
/// response; clients only ever see the generic malformed-token
/// rejection.
#[derive(Debug, Error)]
#[error("key resolution failed: {detail}")]
pub struct KeyResolveError {
    detail: String,
}

impl KeyResolveError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Maps a parsed (but not yet verified) token header to the key
/// material the signature must verify under.
///
/// The header's `kid` is an unsigned hint: implementations must confirm
/// it maps to a key they actually trust rather than loading arbitrary
/// key material for it. Resolution may perform I/O (e.g. fetch a public
/// key); a failure is treated by the verifier like any other invalid
/// credential.
pub trait KeyResolver {
    fn resolve(&self, header: &Header) -> Result<DecodingKey, KeyResolveError>;
}

impl<F> KeyResolver for F
where
    F: Fn(&Header) -> Result<DecodingKey, KeyResolveError>,
{
    fn resolve(&self, header: &Header) -> Result<DecodingKey, KeyResolveError> {
        self(header)
    }
}

/// Resolver for services that verify against a single fixed key,
/// optionally requiring the token's `kid` to name it.
#[derive(Clone)]
pub struct SingleKey {
    key: DecodingKey,
    kid: Option<String>,
}

impl SingleKey {
    /// Accept any `kid` (or none) and always hand back `key`.
    pub fn new(key: DecodingKey) -> Self {
        Self { key, kid: None }
    }

    /// Hand back `key` only for tokens whose header names `kid`.
    pub fn with_kid(key: DecodingKey, kid: impl Into<String>) -> Self {
        Self {
            key,
            kid: Some(kid.into()),
        }
    }
}

impl KeyResolver for SingleKey {
    fn resolve(&self, header: &Header) -> Result<DecodingKey, KeyResolveError> {
        if let Some(expected) = &self.kid {
            match header.kid.as_deref() {
                Some(kid) if kid == expected => {}
                Some(kid) => {
                    return Err(KeyResolveError::new(format!("unknown key id {kid:?}")));
                }
                None => return Err(KeyResolveError::new("token header carries no key id")),
            }
        }
        Ok(self.key.clone())
    }
}
