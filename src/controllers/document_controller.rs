//! Controlador de documentos
//!
//! El gateway no interpreta los documentos: los reenvía al almacén y
//! devuelve el acuse. Un fallo del reenvío se reporta igual que cualquier
//! otro; nada se traga en silencio.

use crate::dto::ApiResponse;
use crate::models::user::Session;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppResult};

pub struct DocumentController {
    state: AppState,
}

impl DocumentController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Reenviar un documento del vehículo al almacén
    pub async fn upload(
        &self,
        session: &Session,
        vehicle_id: String,
        document_type: String,
        file_name: String,
        bytes: Vec<u8>,
    ) -> AppResult<ApiResponse<()>> {
        if vehicle_id.trim().is_empty() {
            return Err(validation_error("vehicleId", "el id del vehículo es requerido"));
        }
        if document_type.trim().is_empty() {
            return Err(validation_error("type", "el tipo de documento es requerido"));
        }
        if bytes.is_empty() {
            return Err(validation_error("document", "el archivo no puede estar vacío"));
        }

        self.state
            .store
            .upload_document(
                &session.upstream_token,
                &vehicle_id,
                &document_type,
                file_name,
                bytes,
            )
            .await?;

        Ok(ApiResponse::message_only("Documento recibido".to_string()))
    }
}
