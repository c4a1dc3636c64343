use actix_web::{web, App, HttpServer};
use jsonwebtoken::{Algorithm, DecodingKey};
use tokengate::{RegisteredClaims, RequireAuth, SingleKey};

mod routes;
mod state;
mod telemetry;

use state::{AppState, KEY_ID};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("DEMO_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("DEMO_API_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("DEMO_API_PORT must be a valid port number");
            std::process::exit(1);
        });

    let secret = match std::env::var("DEMO_API_JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            eprintln!("DEMO_API_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };

    tracing::info!(%host, port, "starting demo-api");

    let state = web::Data::new(AppState::new(secret.as_bytes()));
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    HttpServer::new(move || {
        let auth = RequireAuth::<_, RegisteredClaims>::new(
            SingleKey::with_kid(decoding_key.clone(), KEY_ID),
            Algorithm::HS256,
        );

        App::new()
            .app_data(state.clone())
            .service(
                web::scope("/api/private")
                    .wrap(auth)
                    .configure(routes::private),
            )
            .configure(routes::public)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
