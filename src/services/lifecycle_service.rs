//! Motor de transiciones del ciclo de vida
//!
//! Este módulo valida y aplica los cambios de estado de un vehículo y
//! deriva la línea de tiempo de progreso que consumen ambos paneles.
//!
//! El camino recomendado es estrictamente hacia adelante
//! (`VehicleStatus::next`), pero el desguazador dispone de un override
//! manual que puede fijar cualquiera de los seis estados en cualquier
//! orden. `strict_transitions` convierte ese override en una transición
//! validada contra la etapa siguiente.

use std::sync::Arc;

use crate::client::StoreClient;
use crate::dto::dashboard_dto::StepView;
use crate::models::status::VehicleStatus;
use crate::models::user::{Role, Session};
use crate::models::vehicle::VehicleView;
use crate::utils::errors::{AppError, AppResult};

use super::vehicle_service::VehicleService;

/// Resultado de una transición aplicada
#[derive(Debug)]
pub struct TransitionOutcome {
    /// Estado fijado por la operación
    pub status: VehicleStatus,
    /// Registro refrescado desde el almacén tras la transición
    pub view: VehicleView,
}

pub struct LifecycleService {
    store: Arc<StoreClient>,
    strict_transitions: bool,
}

impl LifecycleService {
    pub fn new(store: Arc<StoreClient>, strict_transitions: bool) -> Self {
        Self {
            store,
            strict_transitions,
        }
    }

    /// Aplicar una transición de estado sobre un vehículo
    ///
    /// Solo el desguazador transiciona vehículos; el rechazo de rol ocurre
    /// antes de tocar el almacén, así el estado del vehículo queda intacto.
    /// Tras persistir, el registro se vuelve a leer: el almacén puede tener
    /// efectos propios (emisión del certificado en COD_ISSUED) y la copia
    /// local no es autoritativa.
    pub async fn advance(
        &self,
        session: &Session,
        vehicle_id: &str,
        target_code: &str,
    ) -> AppResult<TransitionOutcome> {
        if session.role != Role::Dealer {
            return Err(AppError::Forbidden {
                message: format!(
                    "el rol {} no puede cambiar el estado de un vehículo",
                    session.role.as_str()
                ),
                redirect_to: Some(session.role.default_view()),
            });
        }

        let target = VehicleStatus::from_code(target_code)?;

        let vehicles = VehicleService::new(Arc::clone(&self.store));

        if self.strict_transitions {
            let current = vehicles.get_by_id(session, vehicle_id).await?.vehicle.status;
            if current.next() != Some(target) {
                return Err(AppError::InvalidTransition(format!(
                    "desde {} la única transición permitida es {}",
                    current.code(),
                    current
                        .next()
                        .map(|s| s.code())
                        .unwrap_or("ninguna (etapa terminal)")
                )));
            }
        }

        self.store
            .update_vehicle_status(&session.upstream_token, vehicle_id, target.code())
            .await?;

        let view = vehicles.get_by_id(session, vehicle_id).await?;

        Ok(TransitionOutcome {
            status: target,
            view,
        })
    }
}

/// Porcentaje de progreso de un estado dentro de la secuencia
pub fn progress_percent(status: VehicleStatus) -> u8 {
    (status.index() * 100 / (VehicleStatus::ALL.len() - 1)) as u8
}

/// Línea de tiempo de pasos para un estado dado
///
/// Un paso está completado si su posición no supera a la del estado actual,
/// y es el actual si coincide exactamente.
pub fn steps(status: VehicleStatus) -> Vec<StepView> {
    VehicleStatus::ALL
        .iter()
        .map(|step| StepView {
            status: *step,
            label: step.label(),
            completed: step.index() <= status.index(),
            current: step.index() == status.index(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(VehicleStatus::Created), 0);
        assert_eq!(progress_percent(VehicleStatus::PickupScheduled), 20);
        assert_eq!(progress_percent(VehicleStatus::InTransit), 40);
        assert_eq!(progress_percent(VehicleStatus::Received), 60);
        assert_eq!(progress_percent(VehicleStatus::Dismantled), 80);
        assert_eq!(progress_percent(VehicleStatus::CodIssued), 100);
    }

    #[test]
    fn test_steps_for_in_transit() {
        let timeline = steps(VehicleStatus::InTransit);
        assert_eq!(timeline.len(), 6);

        let completed: Vec<VehicleStatus> = timeline
            .iter()
            .filter(|s| s.completed)
            .map(|s| s.status)
            .collect();
        assert_eq!(
            completed,
            vec![
                VehicleStatus::Created,
                VehicleStatus::PickupScheduled,
                VehicleStatus::InTransit
            ]
        );

        let current: Vec<VehicleStatus> = timeline
            .iter()
            .filter(|s| s.current)
            .map(|s| s.status)
            .collect();
        assert_eq!(current, vec![VehicleStatus::InTransit]);

        let pending: Vec<VehicleStatus> = timeline
            .iter()
            .filter(|s| !s.completed)
            .map(|s| s.status)
            .collect();
        assert_eq!(
            pending,
            vec![
                VehicleStatus::Received,
                VehicleStatus::Dismantled,
                VehicleStatus::CodIssued
            ]
        );
    }

    #[test]
    fn test_steps_terminal_all_completed() {
        let timeline = steps(VehicleStatus::CodIssued);
        assert!(timeline.iter().all(|s| s.completed));
        assert!(timeline.last().unwrap().current);
    }
}
