//! Modelo de vehículo en proceso de desguace
//!
//! Entidad canónica del caso de disposición de un vehículo. La identidad la
//! asigna el almacén externo al crearla y es inmutable; el estado avanza por
//! las etapas del registro mediante las operaciones de transición.

use chrono::NaiveDate;

use crate::models::pickup::PickupSlot;
use crate::models::status::VehicleStatus;
use crate::models::user::UserProfile;

/// Estado de programación de la recogida
///
/// Sustituye al "fecha opcional = aún no programada": el estado de
/// programación es un dato explícito, no la ausencia de un campo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickupState {
    Unscheduled,
    Scheduled {
        date: NaiveDate,
        /// La franja solo se conoce cuando la vista se construye junto a la
        /// recogida (lado desguazador); la colección del propietario no la trae
        slot: Option<PickupSlot>,
    },
}

impl PickupState {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            PickupState::Unscheduled => None,
            PickupState::Scheduled { date, .. } => Some(*date),
        }
    }

    pub fn slot(&self) -> Option<PickupSlot> {
        match self {
            PickupState::Unscheduled => None,
            PickupState::Scheduled { slot, .. } => *slot,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, PickupState::Scheduled { .. })
    }
}

/// Vehículo registrado para desguace
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub condition_score: i32,
    pub status: VehicleStatus,
    pub schedule: PickupState,
    pub user_id: Option<String>,
}

/// Estrategia de búsqueda de un vehículo según el rol del llamador
///
/// Se selecciona una vez por petición a partir de la sesión, en lugar de
/// ramificar por rol en cada punto de uso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleLookup {
    /// Busca solo dentro de la colección propia del propietario
    Owner,
    /// Busca dentro de las recogidas asignadas al desguazador
    Dealer,
}

/// Vista de un vehículo producida por una estrategia de búsqueda
///
/// La estrategia de desguazador adjunta además el perfil público del
/// propietario que acompaña a la recogida.
#[derive(Debug, Clone)]
pub struct VehicleView {
    pub vehicle: Vehicle,
    pub owner: Option<UserProfile>,
}
