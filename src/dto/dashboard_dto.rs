//! DTOs de las vistas de panel por rol

use chrono::NaiveDate;
use serde::Serialize;

use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::pickup::PickupSlot;
use crate::models::status::VehicleStatus;

/// Paso de la línea de tiempo del ciclo de vida
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StepView {
    pub status: VehicleStatus,
    pub label: &'static str,
    pub completed: bool,
    pub current: bool,
}

/// Vehículo proyectado con su progreso para presentación
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProjection {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub progress_percent: u8,
    pub steps: Vec<StepView>,
}

/// Panel del propietario: sus propios vehículos
#[derive(Debug, Serialize)]
pub struct OwnerDashboard {
    pub vehicles: Vec<VehicleProjection>,
}

/// Entrada del panel del desguazador
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupProjection {
    pub id: String,
    pub pickup_date: NaiveDate,
    pub slot: Option<PickupSlot>,
    pub slot_window: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleProjection>,
}

/// Panel del desguazador: recogidas asignadas, activas primero
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerDashboard {
    pub active_requests: usize,
    pub pickups: Vec<PickupProjection>,
}
