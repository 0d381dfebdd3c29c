use crate::handlers;
use crate::middleware;
use axum::{Router as AxumRouter, routing::get};
use bidgate_core::config::BidgateConfig;
use bidgate_observability::HttpInteractionLogger;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the Admin API.
pub struct AdminState {
    pub logger: Arc<HttpInteractionLogger>,
    pub config: BidgateConfig,
}

/// Build the axum router with all admin routes.
pub fn build_admin_router(state: Arc<AdminState>) -> AxumRouter {
    let admin_api = AxumRouter::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        // On-demand interaction capture
        .route(
            "/logging/http-interaction",
            get(handlers::logging::get_log_spec)
                .put(handlers::logging::install_log_spec)
                .delete(handlers::logging::clear_log_spec),
        );

    AxumRouter::new()
        .nest("/admin", admin_api)
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            middleware::api_key_auth,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the Admin API server.
pub async fn start_admin(state: Arc<AdminState>) -> anyhow::Result<()> {
    if !state.config.admin.enabled {
        info!("Admin API disabled");
        return Ok(());
    }

    let addr = state.config.admin.addr.clone();
    let app = build_admin_router(state);

    info!(addr = %addr, "Starting Admin API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
