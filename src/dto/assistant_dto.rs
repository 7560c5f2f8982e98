//! DTOs del asistente de chat

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pregunta libre del usuario al asistente
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
}

/// Respuesta de texto del asistente
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}
