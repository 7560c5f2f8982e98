//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum, incluido el almacén de sesiones activas.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::StoreClient;
use crate::config::environment::EnvironmentConfig;
use crate::models::user::Session;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<StoreClient>,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<StoreClient>) -> Self {
        Self {
            config,
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Abrir una sesión autenticada
    ///
    /// La tripleta credencial/rol/perfil entra al mapa en una sola
    /// inserción; nunca se escribe campo a campo.
    pub async fn open_session(&self, session: Session) {
        let key = session.token.clone();
        let mut sessions = self.sessions.write().await;
        sessions.insert(key, session);
        log::info!("🔐 Sesión abierta. Sesiones activas: {}", sessions.len());
    }

    /// Buscar una sesión viva por token
    ///
    /// Una sesión expirada se elimina en el acto y se reporta como ausente.
    pub async fn get_session(&self, token: &str) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired() => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expirada: retirarla con el lock de escritura
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        log::info!("⏰ Sesión expirada retirada. Sesiones activas: {}", sessions.len());
        None
    }

    /// Cerrar una sesión (logout)
    ///
    /// Credencial, rol y perfil desaparecen juntos en una sola extracción.
    pub async fn close_session(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(token).is_some();
        if removed {
            log::info!("👋 Sesión cerrada. Sesiones activas: {}", sessions.len());
        }
        removed
    }

    /// Limpiar sesiones expiradas
    pub async fn cleanup_expired_sessions(&self) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_expired());
    }
}
