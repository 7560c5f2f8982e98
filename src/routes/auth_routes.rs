use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, RegisterRequest, SessionResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::session_middleware;
use crate::models::user::Session;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, session_middleware));

    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .merge(protected)
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.logout(&session).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Json<SessionResponse> {
    let controller = AuthController::new(state);
    Json(controller.me(&session))
}
