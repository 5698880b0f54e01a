//! HTTP layer for the gateway.
//!
//! Assembles the outer router: the gated MCP sub-application plus the
//! open health probe.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
