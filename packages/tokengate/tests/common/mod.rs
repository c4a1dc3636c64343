#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then a quiet `"warn"` default.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

#[ctor::ctor]
fn init() {
    init_logging();
}

/// Assert a middleware rejection: 401, plain text, body naming the
/// failure kind.
pub async fn assert_rejected(resp: ServiceResponse<BoxBody>, expected_detail: &str) {
    assert_eq!(resp.status().as_u16(), 401, "expected a 401 rejection");

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert_eq!(content_type, "text/plain; charset=utf-8");

    let body = test::read_body(resp).await;
    assert_eq!(
        body,
        expected_detail.as_bytes(),
        "rejection body should name the failure kind"
    );
}
