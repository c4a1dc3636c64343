mod common;
use common::assert_rejected;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use actix_web::{test, web, App, HttpResponse};
use futures_util::future::join_all;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde_json::Value;
use tokengate::{issue_token, Authenticated, RegisteredClaims, RequireAuth, SingleKey};

const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";
const KID: &str = "test-key-1";

/// Protected endpoint echoing the verified claims back as JSON.
async fn me(auth: Authenticated<RegisteredClaims>) -> HttpResponse {
    HttpResponse::Ok().json(auth.into_inner())
}

fn guard() -> RequireAuth<SingleKey, RegisteredClaims> {
    RequireAuth::new(
        SingleKey::with_kid(DecodingKey::from_secret(SECRET), KID),
        Algorithm::HS256,
    )
}

fn protected_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().service(
        web::scope("/api/private")
            .wrap(guard())
            .route("/me", web::get().to(me)),
    )
}

fn sign(claims: &RegisteredClaims) -> String {
    issue_token(KID, &EncodingKey::from_secret(SECRET), Algorithm::HS256, claims)
        .expect("failed to sign test token")
}

fn fresh_claims(sub: &str) -> RegisteredClaims {
    RegisteredClaims::with_ttl(sub, SystemTime::now(), Duration::from_secs(15 * 60))
}

#[actix_web::test]
async fn missing_header_is_rejected() {
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get().uri("/api/private/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_rejected(resp, "not authorized").await;
}

#[actix_web::test]
async fn bare_bearer_scheme_is_rejected() {
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", "Bearer"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_rejected(resp, "not authorized").await;
}

#[actix_web::test]
async fn basic_scheme_is_rejected() {
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", "Basic abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_rejected(resp, "not authorized").await;
}

#[actix_web::test]
async fn garbage_token_is_rejected_as_malformed() {
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_rejected(resp, "JWT is malformed").await;
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_exact_claims() {
    let app = test::init_service(protected_app()).await;

    let claims = fresh_claims("alice");
    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", format!("Bearer {}", sign(&claims))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["sub"], "alice");
    assert_eq!(body["iat"].as_i64(), claims.iat);
    assert_eq!(body["exp"].as_i64(), claims.exp);
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let app = test::init_service(protected_app()).await;

    // Issued 20 minutes ago with a 15-minute TTL.
    let claims = RegisteredClaims::with_ttl(
        "alice",
        SystemTime::now() - Duration::from_secs(20 * 60),
        Duration::from_secs(15 * 60),
    );
    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", format!("Bearer {}", sign(&claims))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_rejected(resp, "JWT is expired").await;
}

#[actix_web::test]
async fn not_yet_active_token_is_rejected() {
    let app = test::init_service(protected_app()).await;

    let mut claims = fresh_claims("alice");
    claims.nbf = Some(
        (SystemTime::now() + Duration::from_secs(3600))
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64,
    );
    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", format!("Bearer {}", sign(&claims))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_rejected(resp, "token is not valid yet").await;
}

#[actix_web::test]
async fn foreign_algorithm_is_rejected() {
    let app = test::init_service(protected_app()).await;

    // Same secret, different algorithm; the signature itself would
    // validate under HS384.
    let token = issue_token(
        KID,
        &EncodingKey::from_secret(SECRET),
        Algorithm::HS384,
        &fresh_claims("alice"),
    )
    .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_rejected(resp, "unexpected signing method").await;
}

#[actix_web::test]
async fn tampered_payload_is_rejected() {
    let app = test::init_service(protected_app()).await;

    let token = sign(&fresh_claims("alice"));
    let donor = sign(&fresh_claims("mallory"));

    let mut parts: Vec<&str> = token.split('.').collect();
    let donor_payload = donor.split('.').nth(1).unwrap();
    parts[1] = donor_payload;
    let tampered = parts.join(".");

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", format!("Bearer {tampered}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_rejected(resp, "JWT was invalid").await;
}

#[actix_web::test]
async fn unguarded_route_never_exposes_claims() {
    // The extractor fails closed when the middleware never ran.
    async fn handler(auth: Authenticated<RegisteredClaims>) -> HttpResponse {
        HttpResponse::Ok().json(auth.into_inner())
    }

    let app =
        test::init_service(App::new().route("/unguarded", web::get().to(handler))).await;

    let req = test::TestRequest::get()
        .uri("/unguarded")
        .insert_header(("Authorization", format!("Bearer {}", sign(&fresh_claims("alice")))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn concurrent_requests_verify_independently() {
    let app = test::init_service(protected_app()).await;

    let token = sign(&fresh_claims("alice"));

    let calls = (0..16).map(|_| {
        let req = test::TestRequest::get()
            .uri("/api/private/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        test::call_service(&app, req)
    });

    for resp in join_all(calls).await {
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["sub"], "alice");
    }
}
