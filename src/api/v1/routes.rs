/*
 * Responsibility
 * - Define the v1 URL structure
 * - /health for liveness, /authorize as the single decision endpoint
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{authorize::authorize, health::health};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/authorize", post(authorize))
}
