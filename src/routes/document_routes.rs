use axum::{
    extract::{Multipart, State},
    middleware,
    routing::post,
    Extension, Json, Router,
};

use crate::controllers::document_controller::DocumentController;
use crate::dto::ApiResponse;
use crate::middleware::auth::{owner_only, session_middleware};
use crate::models::user::Session;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};

pub fn create_document_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_document))
        .route_layer(middleware::from_fn(owner_only))
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}

async fn upload_document(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let mut vehicle_id: Option<String> = None;
    let mut document_type: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| validation_error("document", "cuerpo multipart inválido"))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("vehicleId") => {
                vehicle_id = Some(field.text().await.map_err(|_| {
                    validation_error("vehicleId", "campo ilegible")
                })?);
            }
            Some("type") => {
                document_type = Some(field.text().await.map_err(|_| {
                    validation_error("type", "campo ilegible")
                })?);
            }
            Some("document") => {
                let file_name = field
                    .file_name()
                    .unwrap_or("document")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| validation_error("document", "archivo ilegible"))?
                    .to_vec();
                file = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let vehicle_id =
        vehicle_id.ok_or_else(|| validation_error("vehicleId", "el id del vehículo es requerido"))?;
    let document_type =
        document_type.ok_or_else(|| validation_error("type", "el tipo de documento es requerido"))?;
    let (file_name, bytes) =
        file.ok_or_else(|| validation_error("document", "el archivo es requerido"))?;

    let controller = DocumentController::new(state);
    let response = controller
        .upload(&session, vehicle_id, document_type, file_name, bytes)
        .await?;
    Ok(Json(response))
}
