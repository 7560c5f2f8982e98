//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthenticated: {message}")]
    Unauthenticated {
        message: String,
        /// Destino solicitado originalmente, para redirigir después del login
        next: Option<String>,
    },

    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
        /// Vista por defecto del rol del llamador
        redirect_to: Option<&'static str>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "Los datos proporcionados son inválidos".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Unauthenticated { message, next } => {
                tracing::warn!("Unauthenticated access: {}", message);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthenticated".to_string(),
                        message,
                        details: Some(json!({
                            "redirect_to": "/login",
                            "next": next,
                        })),
                        code: Some("UNAUTHENTICATED".to_string()),
                    },
                )
            }

            AppError::Forbidden { message, redirect_to } => {
                tracing::warn!("Forbidden access: {}", message);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: "Forbidden".to_string(),
                        message,
                        details: redirect_to.map(|view| json!({ "redirect_to": view })),
                        code: Some("FORBIDDEN".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                tracing::warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::InvalidTransition(msg) => {
                tracing::warn!("Invalid transition: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Invalid Transition".to_string(),
                        message: msg,
                        details: None,
                        code: Some("INVALID_TRANSITION".to_string()),
                    },
                )
            }

            AppError::UnknownStatus(msg) => {
                tracing::warn!("Unknown status: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Unknown Status".to_string(),
                        message: msg,
                        details: None,
                        code: Some("UNKNOWN_STATUS".to_string()),
                    },
                )
            }

            AppError::RemoteUnavailable(msg) => {
                tracing::error!("Remote unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Remote Unavailable".to_string(),
                        message: format!("No se pudo contactar el almacén externo: {}", msg),
                        details: None,
                        code: Some("REMOTE_UNAVAILABLE".to_string()),
                    },
                )
            }

            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Upstream Error".to_string(),
                        message: "El almacén externo devolvió un error".to_string(),
                        details: Some(json!({ "upstream_error": msg })),
                        code: Some("UPSTREAM_ERROR".to_string()),
                    },
                )
            }

            AppError::Jwt(msg) => {
                tracing::warn!("JWT error: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "JWT Error".to_string(),
                        message: msg,
                        details: None,
                        code: Some("JWT_ERROR".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "Ocurrió un error inesperado".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Sesión ausente o inválida, sin destino original
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        AppError::Unauthenticated {
            message: message.into(),
            next: None,
        }
    }

    /// Rol insuficiente, sin vista de redirección
    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden {
            message: message.into(),
            redirect_to: None,
        }
    }
}

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}
