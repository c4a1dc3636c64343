use std::time::{Duration, SystemTime};

use actix_web::{web, HttpResponse, Result};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use tokengate::{issue_token, Authenticated, RegisteredClaims};

use crate::state::{AppState, KEY_ID};

const TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Issue a 15-minute access token.
///
/// A real service verifies credentials before minting; the demo trusts
/// the username as given.
async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.username.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().body("username cannot be empty"));
    }

    let claims = RegisteredClaims::with_ttl(&req.username, SystemTime::now(), TOKEN_TTL);
    let token = issue_token(KEY_ID, &state.encoding_key, Algorithm::HS256, &claims)?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub sub: Option<String>,
    pub expires_at: Option<i64>,
}

/// Protected endpoint that returns the caller's identity.
async fn me(auth: Authenticated<RegisteredClaims>) -> HttpResponse {
    let claims = auth.into_inner();
    HttpResponse::Ok().json(MeResponse {
        sub: claims.sub,
        expires_at: claims.exp,
    })
}

pub fn public(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/login").route(web::post().to(login)));
}

pub fn private(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me").route(web::get().to(me)));
}
