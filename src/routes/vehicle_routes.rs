use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, patch, post},
    Extension, Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, StatusUpdateResponse, UpdateStatusRequest, VehicleResponse,
    VehicleViewResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{owner_only, session_middleware};
use crate::models::user::Session;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    let owner_routes = Router::new()
        .route("/", post(create_vehicle))
        .route("/my", get(list_my_vehicles))
        .route_layer(middleware::from_fn(owner_only));

    // La recuperación por id selecciona estrategia según el rol, y el motor
    // de transiciones aplica su propia puerta de rol
    let shared_routes = Router::new()
        .route("/:id", get(get_vehicle))
        .route("/:id/status", patch(update_vehicle_status));

    Router::new()
        .merge(owner_routes)
        .merge(shared_routes)
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state);
    let response = controller.create(&session, request).await?;
    Ok(Json(response))
}

async fn list_my_vehicles(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state);
    let response = controller.list_mine(&session).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<VehicleViewResponse>, AppError> {
    let controller = VehicleController::new(state);
    let response = controller.get_by_id(&session, &id).await?;
    Ok(Json(response))
}

async fn update_vehicle_status(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let controller = VehicleController::new(state);
    let response = controller.update_status(&session, &id, request).await?;
    Ok(Json(response))
}
