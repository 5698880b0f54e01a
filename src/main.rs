//! MCP Gateway - bearer-token gated MCP server.
//!
//! Hosts a Model Context Protocol server over SSE behind a shared-secret
//! bearer check, plus an unauthenticated `/healthz` probe for
//! orchestration systems.

use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

mod api;
mod auth;
mod config;
mod error;
mod logging;
mod mcp;

use crate::api::build_router;
use crate::auth::{BearerTokenVerifier, RequestGate};
use crate::config::Config;
use crate::mcp::GatewayService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    // This is optional and won't fail if .env doesn't exist
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Initialize logging
    logging::init();

    tracing::info!("Starting MCP Gateway v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration; the server must not bind a socket without a
    // bearer token, so this is a hard failure.
    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let addr = config.listen_addr()?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        sse_path = %config.mcp.sse_path,
        message_path = %config.mcp.message_path,
        "Configuration loaded"
    );

    // Build the request gate from the immutable config values
    let verifier = BearerTokenVerifier::new(&config.auth.bearer_token);
    let gate = RequestGate::new(verifier, &config.auth.protected_prefixes);

    // The rmcp SSE server supplies the protocol routes; we only wrap them
    let sse_config = SseServerConfig {
        bind: addr,
        sse_path: config.mcp.sse_path.clone(),
        post_path: config.mcp.message_path.clone(),
        ct: CancellationToken::new(),
        sse_keep_alive: None,
    };
    let (sse_server, mcp_router) = SseServer::new(sse_config);

    let app = build_router(mcp_router, gate);

    let ct = sse_server.with_service(GatewayService::new);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ct))
        .await?;

    Ok(())
}

/// Resolve when the process should stop serving: Ctrl-C, or the protocol
/// server cancelling itself. Cancels the protocol server either way.
async fn shutdown_signal(ct: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        }
        _ = ct.cancelled() => {}
    }
    tracing::info!("Shutting down");
    ct.cancel();
}
