//! Bearer authentication middleware for axum.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::BearerTokenVerifier;

/// Error response for authentication failures.
///
/// The body is identical for every failure mode so callers cannot tell
/// which check rejected them.
#[derive(Debug, Serialize)]
pub struct AuthError {
    pub detail: String,
}

impl AuthError {
    fn unauthorized() -> Self {
        Self {
            detail: "Unauthorized".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Immutable per-process state for the bearer gate.
///
/// Shared read-only across concurrent requests; the gate keeps no other
/// state between requests.
#[derive(Debug, Clone)]
pub struct RequestGate {
    verifier: BearerTokenVerifier,
    protected_prefixes: Arc<Vec<String>>,
}

impl RequestGate {
    /// Build a gate protecting the given path prefixes.
    ///
    /// Empty entries are dropped and trailing slashes stripped, so the
    /// root prefix `/` normalizes to the empty string and matches every
    /// path.
    pub fn new(verifier: BearerTokenVerifier, prefixes: &[String]) -> Self {
        let protected_prefixes = prefixes
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.trim_end_matches('/').to_string())
            .collect();
        Self {
            verifier,
            protected_prefixes: Arc::new(protected_prefixes),
        }
    }

    /// The normalized protected prefixes.
    pub fn protected_prefixes(&self) -> &[String] {
        &self.protected_prefixes
    }

    /// Whether the path requires a bearer credential. Compared after
    /// trailing-slash normalization, so `/foo` and `/foo/` are treated
    /// identically.
    fn is_protected(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        self.protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// Require a valid `Authorization: Bearer <token>` header on protected
/// paths; forward everything else untouched.
pub async fn require_bearer(
    State(gate): State<RequestGate>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if !gate.is_protected(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    // Scheme is the literal `Bearer ` - case-sensitive, single space
    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from);

    match provided {
        Some(token) if gate.verifier.verify(&token) => Ok(next.run(request).await),
        Some(_) => {
            tracing::debug!(path = %request.uri().path(), "Invalid bearer token");
            Err(AuthError::unauthorized())
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Missing or malformed Authorization header");
            Err(AuthError::unauthorized())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http, middleware, routing::get, Router};
    use tower::ServiceExt;

    const TOKEN: &str = "sk-test-token";

    fn gated_router(prefixes: &[&str]) -> Router {
        let verifier = BearerTokenVerifier::new(TOKEN);
        let prefixes: Vec<String> = prefixes.iter().map(|p| p.to_string()).collect();
        let gate = RequestGate::new(verifier, &prefixes);
        Router::new()
            .route("/custom-mcp/sse", get(|| async { "subscribed" }))
            .route("/public/info", get(|| async { "open" }))
            .layer(middleware::from_fn_with_state(gate, require_bearer))
    }

    fn request(path: &str, auth: Option<String>) -> http::Request<Body> {
        let mut builder = http::Request::builder().uri(path);
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let app = gated_router(&["/"]);
        let response = app
            .oneshot(request("/custom-mcp/sse", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"detail": "Unauthorized"}));
    }

    #[tokio::test]
    async fn test_wrong_token_is_rejected() {
        let app = gated_router(&["/"]);
        let response = app
            .oneshot(request("/custom-mcp/sse", Some("Bearer wrong-token".to_string())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"detail": "Unauthorized"}));
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_rejected() {
        let app = gated_router(&["/"]);
        let response = app
            .clone()
            .oneshot(request("/custom-mcp/sse", Some(format!("Token {TOKEN}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Scheme is case-sensitive
        let response = app
            .oneshot(request("/custom-mcp/sse", Some(format!("bearer {TOKEN}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_is_forwarded_verbatim() {
        let app = gated_router(&["/"]);
        let response = app
            .oneshot(request("/custom-mcp/sse", Some(format!("Bearer {TOKEN}"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"subscribed");
    }

    #[tokio::test]
    async fn test_unprotected_prefix_needs_no_credential() {
        let app = gated_router(&["/custom-mcp"]);
        let response = app.oneshot(request("/public/info", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"open");
    }

    #[test]
    fn test_trailing_slash_equivalence() {
        let verifier = BearerTokenVerifier::new(TOKEN);
        let gate = RequestGate::new(verifier, &["/custom-mcp/".to_string()]);

        assert!(gate.is_protected("/custom-mcp"));
        assert!(gate.is_protected("/custom-mcp/"));
        assert!(gate.is_protected("/custom-mcp/sse"));
        assert!(gate.is_protected("/custom-mcp/sse/"));
        assert!(!gate.is_protected("/healthz"));
    }

    #[test]
    fn test_root_prefix_protects_everything() {
        let verifier = BearerTokenVerifier::new(TOKEN);
        let gate = RequestGate::new(verifier, &["/".to_string()]);

        assert_eq!(gate.protected_prefixes(), &["".to_string()]);
        assert!(gate.is_protected("/"));
        assert!(gate.is_protected("/anything/at/all"));
    }

    #[test]
    fn test_empty_prefix_entries_are_dropped() {
        let verifier = BearerTokenVerifier::new(TOKEN);
        let gate = RequestGate::new(verifier, &[String::new(), "/mcp".to_string()]);

        assert_eq!(gate.protected_prefixes(), &["/mcp".to_string()]);
        assert!(!gate.is_protected("/other"));
    }
}
