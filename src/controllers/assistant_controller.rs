//! Controlador del asistente de chat

use validator::Validate;

use crate::dto::assistant_dto::{ChatRequest, ChatResponse};
use crate::services::assistant_service::AssistantService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AssistantController {
    state: AppState,
}

impl AssistantController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn chat(&self, request: ChatRequest) -> AppResult<ChatResponse> {
        request.validate()?;

        let reply = AssistantService::new(&self.state.config)
            .chat(&request.message)
            .await;

        Ok(ChatResponse { reply })
    }
}
