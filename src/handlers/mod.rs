pub mod completions;
pub mod health;

pub use completions::{chat_completions, liveness};
pub use health::health_check;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

use crate::constants::MAX_REQUEST_BODY_BYTES;
use crate::models::App;

pub fn router(app: App) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/v1/chat/completions", get(liveness).post(chat_completions))
        .route("/api/openai/chat/completions", get(liveness).post(chat_completions))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(app)
}
