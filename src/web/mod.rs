//! # HTTP Layer
//!
//! Routing and request plumbing around the decode engine. The engine is
//! stateless, so the shared state carries no lock: every request decodes
//! its own image in parallel with the rest.

pub mod handlers;
pub mod source;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::stego::DecodeEngine;

pub struct AppState {
    pub engine: DecodeEngine,
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            engine: DecodeEngine::new(config.codec_config()),
            max_image_bytes: config.server.max_image_bytes,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/decode", post(handlers::decode_handler))
        .route("/decode/direct", post(handlers::decode_direct_handler))
        .route("/encode", post(handlers::encode_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
