use jsonwebtoken::EncodingKey;

/// Key identifier embedded in every token this service issues; the
/// verifier side only accepts tokens naming it.
pub const KEY_ID: &str = "demo-api-1";

/// Shared signing configuration for the login endpoint.
pub struct AppState {
    pub encoding_key: EncodingKey,
}

impl AppState {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
        }
    }
}
