//! DTOs de recogidas

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::pickup::{Pickup, PickupSlot};

/// Request para programar la recogida de un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePickupRequest {
    #[validate(length(min = 1))]
    pub vehicle_id: String,

    /// Fecha de calendario `YYYY-MM-DD`; se valida que no esté en el pasado
    #[validate(length(min = 1))]
    pub pickup_date: String,

    /// Código de franja: MORNING, AFTERNOON o EVENING
    #[validate(length(min = 1))]
    pub slot: String,
}

/// Response de recogida para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupResponse {
    pub id: String,
    pub vehicle_id: String,
    pub pickup_date: NaiveDate,
    pub slot: Option<PickupSlot>,
    pub slot_window: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

impl From<&Pickup> for PickupResponse {
    fn from(pickup: &Pickup) -> Self {
        Self {
            id: pickup.id.clone(),
            vehicle_id: pickup.vehicle_id.clone(),
            pickup_date: pickup.pickup_date,
            slot: pickup.slot,
            slot_window: pickup.slot.map(|s| s.window()),
            vehicle: pickup.vehicle.as_ref().map(VehicleResponse::from),
            owner_name: pickup.owner.as_ref().map(|u| u.name.clone()),
        }
    }
}

impl From<Pickup> for PickupResponse {
    fn from(pickup: Pickup) -> Self {
        Self::from(&pickup)
    }
}
