pub mod assistant_controller;
pub mod auth_controller;
pub mod dashboard_controller;
pub mod document_controller;
pub mod pickup_controller;
pub mod vehicle_controller;
