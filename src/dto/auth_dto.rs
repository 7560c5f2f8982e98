//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{Role, UserProfile};

/// Request de login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request de registro de cuenta
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    pub role: Role,
}

/// Response de sesión establecida
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub token: String,
    pub role: Role,
    pub user: UserProfile,
}
