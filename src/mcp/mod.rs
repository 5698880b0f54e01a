//! MCP sub-application.
//!
//! The SSE transport and message routing are supplied by the `rmcp` SDK;
//! this module only provides the handler registered with it.

mod service;

pub use service::GatewayService;
