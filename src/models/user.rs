//! Modelos de usuario y sesión
//!
//! Este módulo contiene los roles del sistema, el perfil público de un
//! usuario y el objeto de sesión explícito que se inyecta en cada operación
//! que necesita contexto de autorización.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Dealer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Dealer => "DEALER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "OWNER" => Some(Role::Owner),
            "DEALER" => Some(Role::Dealer),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Vista por defecto a la que se redirige a cada rol
    pub fn default_view(&self) -> &'static str {
        match self {
            Role::Owner => "/owner",
            Role::Dealer => "/dealer",
            Role::Admin => "/admin",
        }
    }
}

/// Perfil público del usuario autenticado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Sesión autenticada
///
/// Se construye únicamente en el login y se destruye únicamente en el
/// logout; la tripleta credencial/rol/perfil nunca se muta parcialmente.
#[derive(Debug, Clone)]
pub struct Session {
    /// Token emitido por este gateway, clave de la sesión
    pub token: String,
    /// Credencial bearer frente al almacén externo
    pub upstream_token: String,
    pub role: Role,
    pub user: UserProfile,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        token: String,
        upstream_token: String,
        role: Role,
        user: UserProfile,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            token,
            upstream_token,
            role,
            user,
            expires_at: Utc::now() + chrono::Duration::seconds(ttl_seconds as i64),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Owner, Role::Dealer, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("DRIVER"), None);
    }

    #[test]
    fn test_default_views() {
        assert_eq!(Role::Owner.default_view(), "/owner");
        assert_eq!(Role::Dealer.default_view(), "/dealer");
        assert_eq!(Role::Admin.default_view(), "/admin");
    }

    #[test]
    fn test_session_expiry() {
        let user = UserProfile {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        };
        let live = Session::new("t".into(), "up".into(), Role::Owner, user.clone(), 3600);
        assert!(!live.is_expired());

        let dead = Session {
            expires_at: Utc::now() - chrono::Duration::seconds(1),
            ..Session::new("t".into(), "up".into(), Role::Owner, user, 0)
        };
        assert!(dead.is_expired());
    }
}
