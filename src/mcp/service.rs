//! MCP server handler registered with the SSE transport.

use rmcp::{
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    ServerHandler,
};

/// Handler for the hosted MCP server.
///
/// One instance is created per client session by the SSE transport.
/// Protocol framing, session multiplexing, and request dispatch are
/// handled by the `rmcp` SDK.
#[derive(Debug, Clone, Default)]
pub struct GatewayService;

impl GatewayService {
    pub fn new() -> Self {
        Self
    }
}

impl ServerHandler for GatewayService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::default(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Bearer-gated MCP server. All endpoints require an \
                 Authorization: Bearer <token> header matching the \
                 configured shared secret."
                    .to_string(),
            ),
        }
    }
}
