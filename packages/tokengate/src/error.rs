use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

/// Classified outcome of a failed authentication attempt.
///
/// Every variant except [`AuthError::Signing`] maps to a 401 response
/// whose plain-text body is the variant's display message. The variants
/// are mutually exclusive and checked in a fixed order: credential
/// presentation, token structure, algorithm, key, signature, temporal
/// validity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was presented, or the `Authorization` header did
    /// not carry a `Bearer <token>` pair.
    #[error("not authorized")]
    Unauthenticated,

    /// The token was not structurally a JWT, or its key could not be
    /// resolved.
    #[error("JWT is malformed")]
    Malformed,

    /// The token declared a signing algorithm other than the one this
    /// verifier is pinned to.
    #[error("unexpected signing method")]
    UnexpectedSigningMethod,

    /// The signature did not verify under the resolved key.
    #[error("JWT was invalid")]
    Invalid,

    /// The token's `exp` claim is in the past.
    #[error("JWT is expired")]
    Expired,

    /// The token's `nbf` claim is in the future.
    #[error("token is not valid yet")]
    NotYetActive,

    /// Token issuance failed (incompatible key/algorithm, claims
    /// serialization). A configuration problem, not an inbound-request
    /// failure.
    #[error("token signing failed: {detail}")]
    Signing { detail: String },
}

impl AuthError {
    pub fn signing(detail: impl Into<String>) -> Self {
        Self::Signing {
            detail: detail.into(),
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Signing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
