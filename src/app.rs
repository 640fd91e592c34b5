/*
 * Responsibility
 * - Load Config -> build dependencies -> assemble Router
 * - tracing / panic-hook initialization
 * - start with axum::serve()
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::services::auth::{
    Authorizer, jwks::HttpKeySetFetcher, verifier::TokenVerifier,
};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,todo_authorizer=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        // In production, prefer the default behavior (stderr) and keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting authorizer in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    // Process-level services are built once and injected through AppState;
    // each authorization attempt receives them as collaborators.
    let mut key_sets = HttpKeySetFetcher::new(config.jwks_url.clone())?;
    if config.key_set_cache_ttl_seconds > 0 {
        key_sets = key_sets.with_cache_ttl(Duration::from_secs(config.key_set_cache_ttl_seconds));
    }

    let verifier = TokenVerifier::new(
        config.auth_issuer.clone(),
        config.auth_audience.clone(),
        config.token_leeway_seconds,
    );

    let authorizer = Authorizer::new(Arc::new(key_sets), verifier);

    Ok(AppState::new(Arc::new(authorizer)))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api::v1::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
