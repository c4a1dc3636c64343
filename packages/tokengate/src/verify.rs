//! Token verification and failure classification.

use std::panic::{catch_unwind, AssertUnwindSafe};

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::keys::KeyResolver;

/// Verifies compact JWTs against a pinned algorithm and a key resolver.
///
/// Configuration is immutable after construction, so one verifier can
/// serve any number of requests; verifying the same token twice yields
/// the same outcome. The middleware drives this for inbound requests,
/// but it is equally usable on its own (message queues, websocket
/// handshakes, tests).
pub struct TokenVerifier<R> {
    resolver: R,
    algorithm: Algorithm,
}

impl<R: KeyResolver> TokenVerifier<R> {
    pub fn new(resolver: R, algorithm: Algorithm) -> Self {
        Self {
            resolver,
            algorithm,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Run the verification protocol over a bearer token string.
    ///
    /// Stages, each short-circuiting with its own classification:
    /// structural header decode (`Malformed`), algorithm pinning
    /// (`UnexpectedSigningMethod`), key resolution (`Malformed`), then
    /// one composite signature-and-claims validation whose single
    /// library error is mapped back onto the taxonomy.
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "token failed structural parse");
            AuthError::Malformed
        })?;

        // Pin the algorithm before any key material is touched. A token
        // declaring a different algorithm never reaches verification,
        // no matter whose signature it carries.
        if header.alg != self.algorithm {
            return Err(AuthError::UnexpectedSigningMethod);
        }

        // The resolver is caller-supplied code; a panic inside it must
        // not take the request guarantee down with it.
        let key = match catch_unwind(AssertUnwindSafe(|| self.resolver.resolve(&header))) {
            Ok(Ok(key)) => key,
            Ok(Err(e)) => {
                debug!(error = %e, "key resolution failed");
                return Err(AuthError::Malformed);
            }
            Err(_) => {
                warn!("key resolver panicked");
                return Err(AuthError::Unauthenticated);
            }
        };

        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // exp/nbf are validated when present; their absence is not an
        // error.
        validation.required_spec_claims.clear();

        decode::<C>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(classify)
    }
}

/// Map the library's composite verification error onto the rejection
/// taxonomy. Anything unrecognized degrades to the generic `Invalid`
/// rather than echoing library internals.
fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::ImmatureSignature => AuthError::NotYetActive,
        ErrorKind::InvalidSignature => AuthError::Invalid,
        ErrorKind::InvalidAlgorithm => AuthError::UnexpectedSigningMethod,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::Malformed,
        _ => AuthError::Invalid,
    }
}
