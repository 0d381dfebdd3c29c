use crate::server::AdminState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Admin API key authentication middleware.
///
/// When `admin.api_key` is unset, all requests are allowed — the admin
/// plane is expected to sit behind a trusted network boundary in that
/// deployment.
pub async fn api_key_auth(
    State(state): State<Arc<AdminState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = state.config.admin.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    if provided == Some(expected) {
        Ok(next.run(request).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}
