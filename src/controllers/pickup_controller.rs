//! Controlador de recogidas

use std::sync::Arc;

use crate::dto::pickup_dto::{PickupResponse, SchedulePickupRequest};
use crate::dto::ApiResponse;
use crate::models::user::Session;
use crate::services::pickup_service::PickupService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct PickupController {
    state: AppState,
}

impl PickupController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Programar la recogida de un vehículo propio
    pub async fn schedule(
        &self,
        session: &Session,
        request: SchedulePickupRequest,
    ) -> AppResult<ApiResponse<PickupResponse>> {
        let pickup = PickupService::new(Arc::clone(&self.state.store))
            .schedule(session, request)
            .await?;

        Ok(ApiResponse::success_with_message(
            pickup.into(),
            "Recogida programada exitosamente".to_string(),
        ))
    }

    /// Listar las recogidas asignadas al desguazador
    pub async fn list_assigned(&self, session: &Session) -> AppResult<Vec<PickupResponse>> {
        let pickups = PickupService::new(Arc::clone(&self.state.store))
            .list_assigned(session)
            .await?;

        Ok(pickups.iter().map(PickupResponse::from).collect())
    }
}
