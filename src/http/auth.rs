//! Shared-token authentication

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Header carrying the API token
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Token every protected request must present
#[derive(Debug, Clone)]
pub struct ApiToken(Arc<str>);

impl ApiToken {
    pub fn new(token: &str) -> Self {
        Self(Arc::from(token))
    }

    fn matches(&self, presented: Option<&str>) -> bool {
        presented == Some(&*self.0)
    }
}

/// Reject requests whose x-api-token header does not match with 403
pub async fn require_api_token(
    State(token): State<ApiToken>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    if !token.matches(presented) {
        warn!("Rejected {} {}: bad API token", request.method(), request.uri().path());
        return (
            StatusCode::FORBIDDEN,
            [(header::CONTENT_TYPE, "text/plain")],
            "FORBIDDEN",
        )
            .into_response();
    }

    next.run(request).await
}
