use axum::{
    extract::State,
    middleware,
    routing::post,
    Extension, Json, Router,
};

use crate::controllers::pickup_controller::PickupController;
use crate::dto::pickup_dto::{PickupResponse, SchedulePickupRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_role, session_middleware};
use crate::models::user::{Role, Session};
use crate::state::AppState;
use crate::utils::errors::AppError;

// Ambos verbos comparten el path, así que la puerta de rol se aplica por
// handler en lugar de por sub-router
pub fn create_pickup_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(schedule_pickup).get(list_assigned_pickups))
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}

async fn schedule_pickup(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<SchedulePickupRequest>,
) -> Result<Json<ApiResponse<PickupResponse>>, AppError> {
    require_role(&session, &[Role::Owner])?;
    let controller = PickupController::new(state);
    let response = controller.schedule(&session, request).await?;
    Ok(Json(response))
}

async fn list_assigned_pickups(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<PickupResponse>>, AppError> {
    require_role(&session, &[Role::Dealer])?;
    let controller = PickupController::new(state);
    let response = controller.list_assigned(&session).await?;
    Ok(Json(response))
}
