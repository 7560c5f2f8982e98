//! Middleware de autenticación y puertas de rol
//!
//! Este módulo extrae la sesión del header Authorization, la inyecta en la
//! request y aplica las puertas de rol de cada grupo de rutas.

use axum::{
    extract::{OriginalUri, Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{
    models::user::{Role, Session},
    state::AppState,
    utils::errors::{AppError, AppResult},
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Middleware de sesión
///
/// Verifica el token del gateway y busca la sesión viva; si falta o expiró
/// la respuesta incluye el destino solicitado para redirigir tras el login.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Bajo `nest` el path completo viaja en OriginalUri
    let requested_path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated {
            message: "Token de autorización requerido".to_string(),
            next: Some(requested_path.clone()),
        })?;

    let token = extract_token_from_header(auth_header).map_err(|_| AppError::Unauthenticated {
        message: "Header Authorization inválido".to_string(),
        next: Some(requested_path.clone()),
    })?;

    let jwt_config = JwtConfig::from(&state.config);
    verify_token(token, &jwt_config).map_err(|_| AppError::Unauthenticated {
        message: "Token inválido o expirado".to_string(),
        next: Some(requested_path.clone()),
    })?;

    let session = state
        .get_session(token)
        .await
        .ok_or_else(|| AppError::Unauthenticated {
            message: "Sesión no encontrada o expirada".to_string(),
            next: Some(requested_path),
        })?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Verificar que el rol de la sesión esté entre los permitidos
///
/// El rechazo indica la vista por defecto del rol del llamador, a la que
/// la capa de vistas debe redirigir.
pub fn require_role(session: &Session, allowed: &[Role]) -> AppResult<()> {
    if allowed.contains(&session.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden {
            message: format!(
                "el rol {} no puede realizar esta operación",
                session.role.as_str()
            ),
            redirect_to: Some(session.role.default_view()),
        })
    }
}

/// Puerta de rutas exclusivas del propietario
pub async fn owner_only(
    Extension(session): Extension<Session>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&session, &[Role::Owner])?;
    Ok(next.run(request).await)
}

/// Puerta de rutas exclusivas del desguazador
pub async fn dealer_only(
    Extension(session): Extension<Session>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&session, &[Role::Dealer])?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserProfile;

    fn session_with_role(role: Role) -> Session {
        Session::new(
            "token".to_string(),
            "upstream".to_string(),
            role,
            UserProfile {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
            },
            3600,
        )
    }

    #[test]
    fn test_require_role_allows_listed_roles() {
        let session = session_with_role(Role::Dealer);
        assert!(require_role(&session, &[Role::Dealer]).is_ok());
        assert!(require_role(&session, &[Role::Owner, Role::Dealer]).is_ok());
    }

    #[test]
    fn test_require_role_rejects_with_default_view() {
        let session = session_with_role(Role::Owner);
        let result = require_role(&session, &[Role::Dealer]);
        match result {
            Err(AppError::Forbidden { redirect_to, .. }) => {
                assert_eq!(redirect_to, Some("/owner"));
            }
            other => panic!("se esperaba Forbidden, se obtuvo {:?}", other),
        }
    }
}
