//! Modelo de recogida programada
//!
//! Una recogida asocia un vehículo con una fecha y una franja horaria
//! cerrada. La crea el propietario y la lee el desguazador asignado;
//! fecha y franja no se mutan después de creadas.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::user::UserProfile;
use crate::models::vehicle::Vehicle;

/// Franja horaria de recogida - conjunto cerrado de ventanas con nombre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupSlot {
    Morning,
    Afternoon,
    Evening,
}

impl PickupSlot {
    pub fn code(&self) -> &'static str {
        match self {
            PickupSlot::Morning => "MORNING",
            PickupSlot::Afternoon => "AFTERNOON",
            PickupSlot::Evening => "EVENING",
        }
    }

    /// Ventana horaria legible de la franja
    pub fn window(&self) -> &'static str {
        match self {
            PickupSlot::Morning => "9:00 AM - 12:00 PM",
            PickupSlot::Afternoon => "12:00 PM - 4:00 PM",
            PickupSlot::Evening => "4:00 PM - 7:00 PM",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "MORNING" => Some(PickupSlot::Morning),
            "AFTERNOON" => Some(PickupSlot::Afternoon),
            "EVENING" => Some(PickupSlot::Evening),
            _ => None,
        }
    }
}

/// Recogida programada de un vehículo
///
/// Cuando la obtiene un desguazador incluye la instantánea del vehículo
/// asociado y el perfil público del propietario.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: String,
    pub vehicle_id: String,
    pub pickup_date: NaiveDate,
    pub slot: Option<PickupSlot>,
    pub vehicle: Option<Vehicle>,
    pub owner: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_roundtrip() {
        for slot in [PickupSlot::Morning, PickupSlot::Afternoon, PickupSlot::Evening] {
            assert_eq!(PickupSlot::from_code(slot.code()), Some(slot));
        }
        assert_eq!(PickupSlot::from_code("NIGHT"), None);
    }

    #[test]
    fn test_slot_windows() {
        assert_eq!(PickupSlot::Morning.window(), "9:00 AM - 12:00 PM");
        assert_eq!(PickupSlot::Evening.window(), "4:00 PM - 7:00 PM");
    }
}
