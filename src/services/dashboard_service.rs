//! Proyecciones de panel por rol
//!
//! Este módulo construye las vistas de lectura de cada rol a partir de los
//! registros canónicos: los vehículos del propietario y las recogidas
//! asignadas al desguazador.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::client::StoreClient;
use crate::dto::dashboard_dto::{DealerDashboard, OwnerDashboard, PickupProjection, VehicleProjection};
use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::pickup::Pickup;
use crate::models::user::Session;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

use super::lifecycle_service::{progress_percent, steps};
use super::pickup_service::PickupService;
use super::vehicle_service::VehicleService;

pub struct DashboardService {
    store: Arc<StoreClient>,
}

impl DashboardService {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Panel del propietario: sus vehículos con línea de tiempo y progreso
    pub async fn owner_dashboard(&self, session: &Session) -> AppResult<OwnerDashboard> {
        let vehicles = VehicleService::new(Arc::clone(&self.store))
            .list_mine(session)
            .await?;

        Ok(OwnerDashboard {
            vehicles: vehicles.iter().map(project_vehicle).collect(),
        })
    }

    /// Panel del desguazador: recogidas asignadas con conteo de activas
    pub async fn dealer_dashboard(&self, session: &Session) -> AppResult<DealerDashboard> {
        let mut pickups = PickupService::new(Arc::clone(&self.store))
            .list_assigned(session)
            .await?;

        sort_pickups(&mut pickups);

        let active_requests = pickups.iter().filter(|p| !is_completed(p)).count();

        Ok(DealerDashboard {
            active_requests,
            pickups: pickups.iter().map(project_pickup).collect(),
        })
    }
}

fn project_vehicle(vehicle: &Vehicle) -> VehicleProjection {
    VehicleProjection {
        vehicle: VehicleResponse::from(vehicle),
        progress_percent: progress_percent(vehicle.status),
        steps: steps(vehicle.status),
    }
}

fn project_pickup(pickup: &Pickup) -> PickupProjection {
    PickupProjection {
        id: pickup.id.clone(),
        pickup_date: pickup.pickup_date,
        slot: pickup.slot,
        slot_window: pickup.slot.map(|s| s.window()),
        owner_name: pickup.owner.as_ref().map(|u| u.name.clone()),
        vehicle: pickup.vehicle.as_ref().map(project_vehicle),
    }
}

fn is_completed(pickup: &Pickup) -> bool {
    pickup
        .vehicle
        .as_ref()
        .map(|v| v.status.is_terminal())
        .unwrap_or(false)
}

/// Ordenar recogidas: activas primero, luego por fecha descendente
fn sort_pickups(pickups: &mut [Pickup]) {
    pickups.sort_by(|a, b| {
        match (is_completed(a), is_completed(b)) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => b.pickup_date.cmp(&a.pickup_date),
        }
    });
}
