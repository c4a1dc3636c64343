use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AuthError;

/// Verified claims for the current request, as stored in request
/// extensions by [`RequireAuth`](crate::middleware::RequireAuth).
///
/// Claims are present exactly when the request passed verification, so
/// extraction only fails on routes that were never wrapped by the
/// middleware — a wiring mistake, reported as the generic 401 rather
/// than a 500 that would advertise the unguarded route.
#[derive(Debug, Clone)]
pub struct Authenticated<C>(C);

impl<C> Authenticated<C> {
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<C> Deref for Authenticated<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.0
    }
}

impl<C: Clone + 'static> FromRequest for Authenticated<C> {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<C>()
                .cloned()
                .map(Authenticated)
                .ok_or(AuthError::Unauthenticated),
        )
    }
}
