//! Modelos de dominio
//!
//! Este módulo contiene las entidades canónicas del sistema: el registro de
//! estados, los vehículos, las recogidas y el contexto de sesión/rol.

pub mod pickup;
pub mod status;
pub mod user;
pub mod vehicle;
