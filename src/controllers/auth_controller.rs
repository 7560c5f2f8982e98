//! Controlador de autenticación
//!
//! Delega la verificación de credenciales en el almacén externo y gestiona
//! el ciclo de vida de la sesión: el login es el único constructor y el
//! logout el único destructor.

use validator::Validate;

use crate::client::{StoreLoginRequest, StoreRegisterRequest, StoreAuthResponse};
use crate::dto::auth_dto::{LoginRequest, RegisterRequest, SessionResponse};
use crate::dto::ApiResponse;
use crate::models::user::{Role, Session, UserProfile};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    state: AppState,
}

impl AuthController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Autenticar credenciales existentes y abrir sesión
    pub async fn login(&self, request: LoginRequest) -> AppResult<SessionResponse> {
        request.validate()?;

        let response = self
            .state
            .store
            .login(&StoreLoginRequest {
                email: request.email,
                password: request.password,
            })
            .await?;

        self.establish_session(response, None).await
    }

    /// Registrar una cuenta nueva
    ///
    /// Si el almacén devuelve token, la sesión queda abierta (auto-login);
    /// si no, el actor debe iniciar sesión con sus credenciales.
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> AppResult<ApiResponse<SessionResponse>> {
        request.validate()?;
        let requested_role = request.role;

        let response = self
            .state
            .store
            .register(&StoreRegisterRequest {
                name: request.name,
                email: request.email,
                password: request.password,
                role: requested_role.as_str().to_string(),
            })
            .await?;

        if !response.success {
            return Err(AppError::unauthenticated(
                response
                    .message
                    .unwrap_or_else(|| "El registro fue rechazado".to_string()),
            ));
        }

        if response.token.is_some() {
            let session = self.establish_session(response, Some(requested_role)).await?;
            Ok(ApiResponse::success(session))
        } else {
            Ok(ApiResponse::message_only(
                "Cuenta creada. Inicie sesión con sus credenciales.".to_string(),
            ))
        }
    }

    /// Cerrar la sesión del llamador
    ///
    /// Credencial, rol y perfil se destruyen juntos; nunca parcialmente.
    pub async fn logout(&self, session: &Session) -> AppResult<ApiResponse<()>> {
        self.state.close_session(&session.token).await;
        Ok(ApiResponse::message_only("Sesión cerrada".to_string()))
    }

    /// Perfil de la sesión actual
    pub fn me(&self, session: &Session) -> SessionResponse {
        SessionResponse {
            success: true,
            token: session.token.clone(),
            role: session.role,
            user: session.user.clone(),
        }
    }

    /// Construir la sesión a partir de la respuesta del almacén
    async fn establish_session(
        &self,
        response: StoreAuthResponse,
        fallback_role: Option<Role>,
    ) -> AppResult<SessionResponse> {
        if !response.success {
            // Credenciales rechazadas, con el motivo legible del almacén;
            // distinto de un fallo de red, que llega como RemoteUnavailable
            return Err(AppError::unauthenticated(
                response
                    .message
                    .unwrap_or_else(|| "Credenciales rechazadas".to_string()),
            ));
        }

        let upstream_token = response.token.ok_or_else(|| {
            AppError::Upstream("respuesta de autenticación sin token".to_string())
        })?;

        let role = response
            .role
            .as_deref()
            .and_then(Role::from_str)
            .or_else(|| {
                response
                    .user
                    .as_ref()
                    .and_then(|u| u.role.as_deref())
                    .and_then(Role::from_str)
            })
            .or(fallback_role)
            .ok_or_else(|| {
                AppError::Upstream("respuesta de autenticación sin rol".to_string())
            })?;

        let user: UserProfile = response
            .user
            .map(Into::into)
            .ok_or_else(|| AppError::Upstream("respuesta de autenticación sin perfil".to_string()))?;

        let jwt_config = JwtConfig::from(&self.state.config);
        let token = generate_token(&user.id, role, &jwt_config)?;

        let session = Session::new(
            token.clone(),
            upstream_token,
            role,
            user.clone(),
            self.state.config.jwt_expiration,
        );
        self.state.open_session(session).await;

        Ok(SessionResponse {
            success: true,
            token,
            role,
            user,
        })
    }
}
