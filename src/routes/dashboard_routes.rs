use axum::{extract::State, middleware, routing::get, Extension, Json, Router};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{DealerDashboard, OwnerDashboard};
use crate::middleware::auth::{dealer_only, owner_only, session_middleware};
use crate::models::user::Session;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router(state: AppState) -> Router<AppState> {
    let owner_routes = Router::new()
        .route("/owner", get(owner_dashboard))
        .route_layer(middleware::from_fn(owner_only));

    let dealer_routes = Router::new()
        .route("/dealer", get(dealer_dashboard))
        .route_layer(middleware::from_fn(dealer_only));

    Router::new()
        .merge(owner_routes)
        .merge(dealer_routes)
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}

async fn owner_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<OwnerDashboard>, AppError> {
    let controller = DashboardController::new(state);
    let response = controller.owner(&session).await?;
    Ok(Json(response))
}

async fn dealer_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<DealerDashboard>, AppError> {
    let controller = DashboardController::new(state);
    let response = controller.dealer(&session).await?;
    Ok(Json(response))
}
