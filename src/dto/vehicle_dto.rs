//! DTOs de vehículos

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::pickup::PickupSlot;
use crate::models::status::VehicleStatus;
use crate::models::vehicle::Vehicle;

/// Request para registrar un vehículo para desguace
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    /// El límite superior real depende del año en curso y se
    /// verifica en el servicio
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(range(min = 1, max = 10))]
    pub condition_score: i32,
}

/// Request para fijar el estado de un vehículo
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Response de vehículo para la API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub condition_score: i32,
    pub status: VehicleStatus,
    pub status_label: &'static str,
    pub pickup_date: Option<NaiveDate>,
    pub slot: Option<PickupSlot>,
    pub user_id: Option<String>,
}

impl From<&Vehicle> for VehicleResponse {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            condition_score: vehicle.condition_score,
            status: vehicle.status,
            status_label: vehicle.status.label(),
            pickup_date: vehicle.schedule.date(),
            slot: vehicle.schedule.slot(),
            user_id: vehicle.user_id.clone(),
        }
    }
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self::from(&vehicle)
    }
}

/// Vista de un vehículo con el perfil del propietario cuando lo aporta la
/// estrategia de búsqueda del desguazador
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleViewResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

/// Confirmación de una transición de estado aplicada
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateResponse {
    pub success: bool,
    /// Mensaje de confirmación con la etiqueta del nuevo estado
    pub message: String,
    pub status: VehicleStatus,
    pub status_label: &'static str,
    pub vehicle: VehicleResponse,
}
