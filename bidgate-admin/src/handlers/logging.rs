use crate::server::AdminState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use bidgate_core::error::BidgateError;
use bidgate_core::log_spec::HttpLogSpec;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Return the active capture spec and how many interactions it has logged.
pub async fn get_log_spec(
    State(state): State<Arc<AdminState>>,
) -> Result<Json<Value>, StatusCode> {
    match state.logger.current() {
        Some(active) => Ok(Json(json!({
            "spec": active.spec(),
            "logged": active.logged(),
        }))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Install a capture spec, replacing any active one.
pub async fn install_log_spec(
    State(state): State<Arc<AdminState>>,
    Json(spec): Json<HttpLogSpec>,
) -> Result<Json<Value>, Response> {
    let max_limit = state.config.logging.http_interaction.max_limit;
    spec.validate(max_limit).map_err(error_response)?;
    state.logger.install(spec.clone()).map_err(error_response)?;

    info!(
        endpoint = ?spec.endpoint,
        status_code = ?spec.status_code,
        account = ?spec.account,
        limit = spec.limit,
        "HTTP interaction capture installed"
    );

    Ok(Json(json!({ "spec": spec })))
}

/// Clear the active capture spec. Idempotent.
pub async fn clear_log_spec(State(state): State<Arc<AdminState>>) -> StatusCode {
    state.logger.clear();
    info!("HTTP interaction capture cleared");
    StatusCode::NO_CONTENT
}

fn error_response(err: BidgateError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        err.to_json_body(),
    )
        .into_response()
}
