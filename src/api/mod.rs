use crate::{
    api::handlers::{site, unlock},
    assets::AssetStore,
    gate::{self, GateConfig},
};
use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::post,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, debug_span, info};
use ulid::Ulid;

mod handlers;

/// Build the application router.
///
/// Every route sits behind the access-decision middleware. `POST /__unlock`
/// is PIN verification; any other method on that path, and every other
/// request, falls through to static content delivery.
///
/// Exposed separately from [`new`] so tests can drive the whole stack
/// without binding a listener.
#[must_use]
pub fn app(gate_config: GateConfig, store: Arc<AssetStore>) -> Router {
    Router::new()
        .route(
            gate::UNLOCK_ENDPOINT,
            post(unlock::unlock).fallback(site::serve),
        )
        .fallback(site::serve)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(middleware::from_fn(gate::require_auth))
                .layer(Extension(gate_config))
                .layer(Extension(store)),
        )
}

/// Bind the listener and serve the gate until shutdown.
/// # Errors
/// Returns an error if the server fails to start
pub async fn new(port: u16, gate_config: GateConfig, store: AssetStore) -> Result<()> {
    let app = app(gate_config, Arc::new(store));

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {err}");
        return;
    }
    info!("Shutdown signal received");
}
