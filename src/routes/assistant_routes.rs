use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::assistant_controller::AssistantController;
use crate::dto::assistant_dto::{ChatRequest, ChatResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

// El asistente es público: también atiende desde la página de entrada,
// antes de autenticarse
pub fn create_assistant_router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let controller = AssistantController::new(state);
    let response = controller.chat(request).await?;
    Ok(Json(response))
}
