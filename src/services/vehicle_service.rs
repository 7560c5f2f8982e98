//! Servicio de vehículos
//!
//! Este módulo contiene la creación de vehículos y la recuperación por id
//! con alcance de rol: cada rol busca únicamente dentro de su propia
//! colección, nunca mediante una búsqueda global.

use std::sync::Arc;

use validator::Validate;

use crate::client::{CreateVehiclePayload, StoreClient};
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::pickup::PickupSlot;
use crate::models::user::{Role, Session};
use crate::models::vehicle::{PickupState, Vehicle, VehicleLookup, VehicleView};
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::validation::{validate_date, validate_plausible_year};

pub struct VehicleService {
    store: Arc<StoreClient>,
}

impl VehicleService {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Seleccionar la estrategia de búsqueda para el rol del llamador
    ///
    /// La capacidad de administrador no está implementada aguas arriba.
    pub fn lookup_strategy(role: Role) -> AppResult<VehicleLookup> {
        match role {
            Role::Owner => Ok(VehicleLookup::Owner),
            Role::Dealer => Ok(VehicleLookup::Dealer),
            Role::Admin => Err(AppError::Forbidden {
                message: "la consulta de vehículos no está disponible para administradores"
                    .to_string(),
                redirect_to: Some(Role::Admin.default_view()),
            }),
        }
    }

    /// Registrar un vehículo nuevo en etapa inicial
    pub async fn create(
        &self,
        session: &Session,
        request: CreateVehicleRequest,
    ) -> AppResult<Vehicle> {
        request.validate()?;
        if validate_plausible_year(request.year).is_err() {
            return Err(validation_error(
                "year",
                "el año debe ser un año de fabricación plausible de 4 cifras",
            ));
        }

        let payload = CreateVehiclePayload {
            make: request.make,
            model: request.model,
            year: request.year,
            condition_score: request.condition_score,
        };

        let record = self
            .store
            .create_vehicle(&session.upstream_token, &payload)
            .await?;

        Vehicle::try_from(record)
    }

    /// Listar los vehículos del propietario, en el orden del almacén
    pub async fn list_mine(&self, session: &Session) -> AppResult<Vec<Vehicle>> {
        let records = self
            .store
            .list_owner_vehicles(&session.upstream_token)
            .await?;

        records.into_iter().map(Vehicle::try_from).collect()
    }

    /// Recuperar un vehículo por id según la estrategia del rol
    pub async fn get_by_id(&self, session: &Session, id: &str) -> AppResult<VehicleView> {
        match Self::lookup_strategy(session.role)? {
            VehicleLookup::Owner => self.owner_lookup(session, id).await,
            VehicleLookup::Dealer => self.dealer_lookup(session, id).await,
        }
    }

    /// Búsqueda del propietario: solo dentro de su propia colección
    async fn owner_lookup(&self, session: &Session, id: &str) -> AppResult<VehicleView> {
        let records = self
            .store
            .list_owner_vehicles(&session.upstream_token)
            .await?;

        let record = records
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(VehicleView {
            vehicle: Vehicle::try_from(record)?,
            owner: None,
        })
    }

    /// Búsqueda del desguazador: dentro de sus recogidas asignadas
    ///
    /// La fecha de recogida de la vista se sobrescribe con la del registro
    /// de recogida: la instantánea embebida puede venir desfasada o sin ella.
    async fn dealer_lookup(&self, session: &Session, id: &str) -> AppResult<VehicleView> {
        let records = self
            .store
            .list_dealer_pickups(&session.upstream_token)
            .await?;

        let record = records
            .into_iter()
            .find(|pickup| pickup.referenced_vehicle_id() == Some(id))
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let snapshot = record
            .vehicle
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        let mut vehicle = Vehicle::try_from(snapshot)?;

        let date = validate_date(&record.pickup_date).map_err(|_| {
            AppError::Upstream(format!(
                "fecha de recogida ilegible: '{}'",
                record.pickup_date
            ))
        })?;
        vehicle.schedule = PickupState::Scheduled {
            date,
            slot: record.slot.as_deref().and_then(PickupSlot::from_code),
        };

        Ok(VehicleView {
            vehicle,
            owner: record.user.map(Into::into),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_strategy_per_role() {
        assert_eq!(
            VehicleService::lookup_strategy(Role::Owner).unwrap(),
            VehicleLookup::Owner
        );
        assert_eq!(
            VehicleService::lookup_strategy(Role::Dealer).unwrap(),
            VehicleLookup::Dealer
        );
        assert!(matches!(
            VehicleService::lookup_strategy(Role::Admin),
            Err(AppError::Forbidden { .. })
        ));
    }
}
