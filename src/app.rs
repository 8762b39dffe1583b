use std::sync::Arc;
use std::{panic, process};

use anyhow::Result;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::allow_list::AllowList;
use crate::config::Config;
use crate::error::GatewayError;
use crate::middleware::auth_gate;
use crate::services::validation::TokenValidator;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,api_gateway=debug,tower_http=debug cargo run
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

        // In development, fail fast: crash the whole process so we notice
        // immediately. In production, prefer the default behavior (stderr)
        // and let the gateway keep running.
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
        "starting gateway in {:?} mode on {}, validating tokens at {}",
        config.app_env,
        config.addr,
        config.validate_url
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let validator = TokenValidator::new(config.validate_url.clone(), config.validate_timeout)?;
    let allow_list = AllowList::new(&config.open_endpoints);

    Ok(AppState::new(Arc::new(validator), Arc::new(allow_list)))
}

fn build_router(state: AppState) -> Router {
    async fn health() -> &'static str {
        "ok"
    }

    // Requests that clear the gate fall through to the next stage of the
    // proxy pipeline. Upstream route dispatch lives outside this core, so the
    // stage here is a terminator.
    async fn no_upstream_route() -> GatewayError {
        GatewayError::NoUpstreamRoute
    }

    let downstream = Router::new().fallback(no_upstream_route);
    let gated = auth_gate::apply(downstream, state.clone());

    Router::new()
        .route("/health", get(health))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
