//! Routers de la API
//!
//! Cada módulo construye el router de su recurso; `create_api_router` los
//! ensambla bajo `/api` y `build_app` añade las capas transversales.

pub mod assistant_routes;
pub mod auth_routes;
pub mod dashboard_routes;
pub mod document_routes;
pub mod pickup_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest(
            "/api/vehicles",
            vehicle_routes::create_vehicle_router(state.clone()),
        )
        .nest(
            "/api/pickups",
            pickup_routes::create_pickup_router(state.clone()),
        )
        .nest(
            "/api/dashboard",
            dashboard_routes::create_dashboard_router(state.clone()),
        )
        .nest(
            "/api/documents",
            document_routes::create_document_router(state),
        )
        .nest("/api/assistant", assistant_routes::create_assistant_router())
}

/// Aplicación completa con capas transversales, lista para servir
pub fn build_app(state: AppState) -> Router {
    let cors = if state.config.is_production() {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    create_api_router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check del gateway
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicle-scrappage",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
