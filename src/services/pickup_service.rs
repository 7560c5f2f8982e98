//! Servicio de programación de recogidas
//!
//! Este módulo crea la solicitud de recogida de un vehículo y le asocia
//! fecha y franja horaria. El almacén crea la recogida y avanza el vehículo
//! a PICKUP_SCHEDULED en una sola operación lógica.

use std::sync::Arc;

use validator::Validate;

use crate::client::{SchedulePickupPayload, StoreClient};
use crate::dto::pickup_dto::SchedulePickupRequest;
use crate::models::pickup::{Pickup, PickupSlot};
use crate::models::status::VehicleStatus;
use crate::models::user::{Role, Session};
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::validation::{validate_date, validate_future_date};

use super::vehicle_service::VehicleService;

pub struct PickupService {
    store: Arc<StoreClient>,
}

impl PickupService {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Programar la recogida de un vehículo propio
    ///
    /// Solo tiene sentido antes de que exista una recogida: el vehículo debe
    /// estar en etapa CREATED. Cualquier fallo deja el estado previo intacto;
    /// el gateway no aplica nada localmente.
    pub async fn schedule(
        &self,
        session: &Session,
        request: SchedulePickupRequest,
    ) -> AppResult<Pickup> {
        if session.role != Role::Owner {
            return Err(AppError::Forbidden {
                message: "solo el propietario puede programar una recogida".to_string(),
                redirect_to: Some(session.role.default_view()),
            });
        }

        request.validate()?;

        let date = validate_date(&request.pickup_date)
            .map_err(|_| validation_error("pickupDate", "la fecha debe tener formato YYYY-MM-DD"))?;
        if validate_future_date(date).is_err() {
            return Err(validation_error(
                "pickupDate",
                "la fecha de recogida no puede estar en el pasado",
            ));
        }

        let slot = PickupSlot::from_code(&request.slot).ok_or_else(|| {
            validation_error("slot", "la franja debe ser MORNING, AFTERNOON o EVENING")
        })?;

        // El vehículo debe existir en la colección del propietario y seguir
        // en la etapa inicial
        let view = VehicleService::new(Arc::clone(&self.store))
            .get_by_id(session, &request.vehicle_id)
            .await?;
        if view.vehicle.status != VehicleStatus::Created {
            return Err(AppError::InvalidTransition(format!(
                "la recogida solo puede programarse en etapa CREATED; estado actual: {}",
                view.vehicle.status.code()
            )));
        }

        let payload = SchedulePickupPayload {
            vehicle_id: request.vehicle_id,
            pickup_date: date.format("%Y-%m-%d").to_string(),
            slot: slot.code().to_string(),
        };

        let record = self
            .store
            .schedule_pickup(&session.upstream_token, &payload)
            .await?;

        Pickup::try_from(record)
    }

    /// Listar las recogidas asignadas al desguazador, en el orden del almacén
    pub async fn list_assigned(&self, session: &Session) -> AppResult<Vec<Pickup>> {
        let records = self
            .store
            .list_dealer_pickups(&session.upstream_token)
            .await?;

        records.into_iter().map(Pickup::try_from).collect()
    }
}
