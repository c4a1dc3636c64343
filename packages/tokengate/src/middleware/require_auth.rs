//! Bearer-token authentication middleware.
//!
//! Wraps a protected service: each request must present
//! `Authorization: Bearer <token>` and the token must verify against
//! the configured algorithm and key resolver. Verified claims are
//! stored in request extensions before the wrapped service runs;
//! rejected requests get a 401 with a plain-text message naming the
//! failure and never reach the wrapped service.

use std::marker::PhantomData;
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use jsonwebtoken::Algorithm;
use serde::de::DeserializeOwned;

use crate::error::AuthError;
use crate::keys::KeyResolver;
use crate::verify::TokenVerifier;

/// Middleware factory, generic over the key resolver `R` and the claims
/// type `C` deserialized from accepted tokens.
///
/// A fresh `C` is deserialized per request, so nothing is shared
/// between requests; the verifier itself is immutable configuration.
pub struct RequireAuth<R, C> {
    verifier: Rc<TokenVerifier<R>>,
    _claims: PhantomData<C>,
}

impl<R: KeyResolver, C> RequireAuth<R, C> {
    pub fn new(resolver: R, algorithm: Algorithm) -> Self {
        Self {
            verifier: Rc::new(TokenVerifier::new(resolver, algorithm)),
            _claims: PhantomData,
        }
    }
}

// Derived Clone would demand C: Clone for a marker.
impl<R, C> Clone for RequireAuth<R, C> {
    fn clone(&self) -> Self {
        Self {
            verifier: Rc::clone(&self.verifier),
            _claims: PhantomData,
        }
    }
}

impl<S, B, R, C> Transform<S, ServiceRequest> for RequireAuth<R, C>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
    R: KeyResolver + 'static,
    C: DeserializeOwned + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S, R, C>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service,
            verifier: Rc::clone(&self.verifier),
            _claims: PhantomData,
        }))
    }
}

pub struct RequireAuthMiddleware<S, R, C> {
    service: S,
    verifier: Rc<TokenVerifier<R>>,
    _claims: PhantomData<C>,
}

impl<S, B, R, C> Service<ServiceRequest> for RequireAuthMiddleware<S, R, C>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
    R: KeyResolver + 'static,
    C: DeserializeOwned + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = bearer_token(&req).and_then(|token| self.verifier.verify::<C>(&token));

        match outcome {
            Ok(claims) => {
                // Store claims in request extensions BEFORE calling the
                // service; downstream extractors rely on this.
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => {
                // The rejection response is written here, not bubbled as
                // an error: the wrapped service must never run and the
                // 401 body is part of this middleware's contract.
                let res = req.into_response(err.error_response()).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

/// Steps 1–2 of the protocol: the header must exist and must be exactly
/// a `Bearer <token>` pair. Anything else means no usable credential
/// was presented.
fn bearer_token(req: &ServiceRequest) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::Unauthenticated)?;

    let value = value.to_str().map_err(|_| AuthError::Unauthenticated)?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(AuthError::Unauthenticated);
    }

    Ok(parts[1].to_owned())
}
