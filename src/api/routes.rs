//! Route definitions for the gateway.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::auth::{require_bearer, RequestGate};

/// Build the outer application router.
///
/// The MCP sub-application's router is wrapped by the bearer gate; the
/// health probe is registered on the outer router so it never passes
/// through the gate.
pub fn build_router(mcp_router: Router, gate: RequestGate) -> Router {
    tracing::info!(
        protected_prefixes = ?gate.protected_prefixes(),
        "Bearer auth middleware enabled for MCP endpoints"
    );

    // Fallback before layer, so the gate also covers unmatched paths
    let protected = mcp_router
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(gate, require_bearer));

    Router::new()
        .route("/healthz", get(handlers::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
}
