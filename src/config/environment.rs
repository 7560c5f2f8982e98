//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    // Almacén externo (backend de persistencia)
    pub store_base_url: String,
    pub store_timeout_secs: u64,
    /// Exigir que las transiciones manuales sigan la etapa recomendada.
    /// Apagado por defecto: el override del desguazador es permisivo.
    pub strict_transitions: bool,
    // Asistente de chat
    pub assistant_api_url: String,
    pub assistant_model: String,
    pub assistant_api_key: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            port: env::var("PORT")
                .expect("PORT must be set")
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").expect("HOST must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .expect("JWT_EXPIRATION must be set")
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .expect("CORS_ORIGINS must be set")
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            store_base_url: env::var("STORE_API_URL").expect("STORE_API_URL must be set"),
            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("STORE_TIMEOUT_SECS must be a valid number"),
            strict_transitions: env::var("STRICT_TRANSITIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            assistant_api_url: env::var("ASSISTANT_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            assistant_model: env::var("ASSISTANT_MODEL")
                .unwrap_or_else(|_| "gemini-3-flash-preview".to_string()),
            assistant_api_key: env::var("ASSISTANT_API_KEY").ok(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
