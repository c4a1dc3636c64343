//! Token issuing.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::error::AuthError;

/// Sign `claims` into a compact JWT.
///
/// `kid` is embedded unsigned in the token header so the verifying side
/// can look up the right key; `key` and `algorithm` must be compatible
/// (a secret with an HMAC algorithm, a private key with RSA/ECDSA).
/// Claims are signed as given — setting sensible `exp`/`nbf` values is
/// the caller's job.
pub fn issue_token<C: Serialize>(
    kid: &str,
    key: &EncodingKey,
    algorithm: Algorithm,
    claims: &C,
) -> Result<String, AuthError> {
    let mut header = Header::new(algorithm);
    header.kid = Some(kid.to_owned());

    encode(&header, claims, key).map_err(|e| AuthError::signing(e.to_string()))
}
