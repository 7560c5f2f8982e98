//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el motor de
//! transiciones del ciclo de vida, la programación de recogidas, la
//! recuperación con alcance de rol y las proyecciones de panel.

pub mod assistant_service;
pub mod dashboard_service;
pub mod lifecycle_service;
pub mod pickup_service;
pub mod vehicle_service;
