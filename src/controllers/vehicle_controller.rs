//! Controlador de vehículos

use std::sync::Arc;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, StatusUpdateResponse, UpdateStatusRequest, VehicleResponse,
    VehicleViewResponse,
};
use crate::dto::ApiResponse;
use crate::models::user::Session;
use crate::services::lifecycle_service::LifecycleService;
use crate::services::vehicle_service::VehicleService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct VehicleController {
    state: AppState,
}

impl VehicleController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Registrar un vehículo para desguace
    pub async fn create(
        &self,
        session: &Session,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        let vehicle = VehicleService::new(Arc::clone(&self.state.store))
            .create(session, request)
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo registrado exitosamente".to_string(),
        ))
    }

    /// Listar los vehículos del propietario
    pub async fn list_mine(&self, session: &Session) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = VehicleService::new(Arc::clone(&self.state.store))
            .list_mine(session)
            .await?;

        Ok(vehicles.into_iter().map(Into::into).collect())
    }

    /// Recuperar un vehículo según la estrategia del rol del llamador
    pub async fn get_by_id(&self, session: &Session, id: &str) -> AppResult<VehicleViewResponse> {
        let view = VehicleService::new(Arc::clone(&self.state.store))
            .get_by_id(session, id)
            .await?;

        Ok(VehicleViewResponse {
            vehicle: VehicleResponse::from(&view.vehicle),
            owner_name: view.owner.map(|u| u.name),
        })
    }

    /// Aplicar una transición de estado y confirmar con su etiqueta
    pub async fn update_status(
        &self,
        session: &Session,
        id: &str,
        request: UpdateStatusRequest,
    ) -> AppResult<StatusUpdateResponse> {
        let outcome = LifecycleService::new(
            Arc::clone(&self.state.store),
            self.state.config.strict_transitions,
        )
        .advance(session, id, &request.status)
        .await?;

        Ok(StatusUpdateResponse {
            success: true,
            message: format!(
                "Estado del vehículo actualizado a '{}'",
                outcome.status.label()
            ),
            status: outcome.status,
            status_label: outcome.status.label(),
            vehicle: VehicleResponse::from(&outcome.view.vehicle),
        })
    }
}
