//! Bearer-token authentication for actix-web services.
//!
//! Two halves: [`issue_token`] signs claims into a compact JWT, and
//! [`RequireAuth`] guards routes by verifying inbound tokens before the
//! wrapped handlers run. Verification is pinned to a single algorithm,
//! resolves key material through a caller-supplied [`KeyResolver`], and
//! classifies every failure into the [`AuthError`] taxonomy — any
//! ambiguity rejects the request. Accepted claims are available to
//! handlers through [`Authenticated`].

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod claims;
pub mod error;
pub mod extractors;
pub mod issue;
pub mod keys;
pub mod middleware;
pub mod verify;

// Re-exports for public API
pub use claims::RegisteredClaims;
pub use error::AuthError;
pub use extractors::Authenticated;
pub use issue::issue_token;
pub use keys::{KeyResolveError, KeyResolver, SingleKey};
pub use middleware::RequireAuth;
pub use verify::TokenVerifier;
