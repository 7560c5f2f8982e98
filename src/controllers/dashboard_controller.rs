//! Controlador de paneles por rol

use std::sync::Arc;

use crate::dto::dashboard_dto::{DealerDashboard, OwnerDashboard};
use crate::models::user::Session;
use crate::services::dashboard_service::DashboardService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    state: AppState,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn owner(&self, session: &Session) -> AppResult<OwnerDashboard> {
        DashboardService::new(Arc::clone(&self.state.store))
            .owner_dashboard(session)
            .await
    }

    pub async fn dealer(&self, session: &Session) -> AppResult<DealerDashboard> {
        DashboardService::new(Arc::clone(&self.state.store))
            .dealer_dashboard(session)
            .await
    }
}
