//! Registro de estados del ciclo de vida
//!
//! Este módulo define la secuencia cerrada y ordenada de etapas por las que
//! pasa un vehículo en proceso de desguace, junto con sus etiquetas legibles
//! y la lógica de orden/siguiente etapa.

use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

/// Estado del vehículo - secuencia ordenada del ciclo de desguace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Created,
    PickupScheduled,
    InTransit,
    Received,
    Dismantled,
    CodIssued,
}

impl VehicleStatus {
    /// Secuencia de visualización completa, en orden de progreso
    pub const ALL: [VehicleStatus; 6] = [
        VehicleStatus::Created,
        VehicleStatus::PickupScheduled,
        VehicleStatus::InTransit,
        VehicleStatus::Received,
        VehicleStatus::Dismantled,
        VehicleStatus::CodIssued,
    ];

    /// Código de transporte del estado
    pub fn code(&self) -> &'static str {
        match self {
            VehicleStatus::Created => "CREATED",
            VehicleStatus::PickupScheduled => "PICKUP_SCHEDULED",
            VehicleStatus::InTransit => "IN_TRANSIT",
            VehicleStatus::Received => "RECEIVED",
            VehicleStatus::Dismantled => "DISMANTLED",
            VehicleStatus::CodIssued => "COD_ISSUED",
        }
    }

    /// Etiqueta legible del estado
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Created => "Registered",
            VehicleStatus::PickupScheduled => "Pickup Scheduled",
            VehicleStatus::InTransit => "In Transit",
            VehicleStatus::Received => "Received at Yard",
            VehicleStatus::Dismantled => "Dismantled",
            VehicleStatus::CodIssued => "Certificate Issued",
        }
    }

    /// Posición del estado dentro de la secuencia (0..=5)
    pub fn index(&self) -> usize {
        match self {
            VehicleStatus::Created => 0,
            VehicleStatus::PickupScheduled => 1,
            VehicleStatus::InTransit => 2,
            VehicleStatus::Received => 3,
            VehicleStatus::Dismantled => 4,
            VehicleStatus::CodIssued => 5,
        }
    }

    /// Siguiente etapa recomendada, o `None` en la etapa terminal
    pub fn next(&self) -> Option<VehicleStatus> {
        match self {
            VehicleStatus::Created => Some(VehicleStatus::PickupScheduled),
            VehicleStatus::PickupScheduled => Some(VehicleStatus::InTransit),
            VehicleStatus::InTransit => Some(VehicleStatus::Received),
            VehicleStatus::Received => Some(VehicleStatus::Dismantled),
            VehicleStatus::Dismantled => Some(VehicleStatus::CodIssued),
            VehicleStatus::CodIssued => None,
        }
    }

    /// Estado terminal del ciclo
    pub fn is_terminal(&self) -> bool {
        matches!(self, VehicleStatus::CodIssued)
    }

    /// Parsear un código de transporte. Un código fuera del registro
    /// falla explícitamente, nunca se degrada a un valor por defecto.
    pub fn from_code(code: &str) -> Result<VehicleStatus, AppError> {
        match code {
            "CREATED" => Ok(VehicleStatus::Created),
            "PICKUP_SCHEDULED" => Ok(VehicleStatus::PickupScheduled),
            "IN_TRANSIT" => Ok(VehicleStatus::InTransit),
            "RECEIVED" => Ok(VehicleStatus::Received),
            "DISMANTLED" => Ok(VehicleStatus::Dismantled),
            "COD_ISSUED" => Ok(VehicleStatus::CodIssued),
            other => Err(AppError::UnknownStatus(format!(
                "'{}' no es un estado del registro",
                other
            ))),
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
