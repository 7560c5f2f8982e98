//! Servicio del asistente de chat
//!
//! Colaborador sin estado: recibe un texto libre, le antepone la
//! instrucción de sistema del dominio y devuelve texto. Nunca propaga un
//! error al llamador; ante cualquier fallo responde una disculpa fija.
//! No tiene ningún efecto sobre el modelo de ciclo de vida.

use reqwest::Client;
use serde_json::json;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

/// Instrucción de sistema con el contexto del dominio
pub const ASSISTANT_SYSTEM_INSTRUCTION: &str = "\
You are the assistant for an End-of-Life Vehicle scrappage platform that \
connects vehicle owners with authorized scrappage dealers.

Key information to know:
1. The process:
   - Register Vehicle: owners enter vehicle details (make, model, year, condition).
   - Schedule Pickup: owners choose a date and time slot for pickup.
   - Status tracking: Registered -> Pickup Scheduled -> In Transit -> Received at Yard -> Dismantled -> Certificate Issued.
   - Documents: owners must upload the registration certificate and other documents.
   - COD: the Certificate of Deposit is issued once the vehicle is scrapped.

2. Role specifics:
   - Owners: can add vehicles, schedule pickups, upload documents.
   - Dealers: view assigned pickups and update vehicle status through the stages.

Keep answers concise, friendly, and professional.";

const EMPTY_REPLY_FALLBACK: &str = "I didn't get that. Could you rephrase?";
const UNAVAILABLE_FALLBACK: &str =
    "Sorry, I'm having trouble connecting to my brain right now. Please try again later.";

pub struct AssistantService {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl AssistantService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.assistant_api_url.trim_end_matches('/').to_string(),
            model: config.assistant_model.clone(),
            api_key: config.assistant_api_key.clone(),
        }
    }

    /// Responder una pregunta del usuario
    ///
    /// Infalible por contrato: todo fallo se traduce en la disculpa fija.
    pub async fn chat(&self, message: &str) -> String {
        let Some(api_key) = self.api_key.clone() else {
            tracing::warn!("Asistente sin API key configurada");
            return UNAVAILABLE_FALLBACK.to_string();
        };

        match self.generate(&api_key, message).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_REPLY_FALLBACK.to_string(),
            Err(e) => {
                tracing::error!("Assistant API error: {}", e);
                UNAVAILABLE_FALLBACK.to_string()
            }
        }
    }

    async fn generate(&self, api_key: &str, message: &str) -> AppResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let body = json!({
            "system_instruction": {
                "parts": [{ "text": ASSISTANT_SYSTEM_INSTRUCTION }]
            },
            "contents": [{
                "parts": [{ "text": message }]
            }]
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::RemoteUnavailable(format!("assistant: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "assistant respondió {}: {}",
                status, body
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("assistant: respuesta ilegible: {}", e)))?;

        let text = payload
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.pointer("/content/parts/0/text"))
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(text)
    }
}
