use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use vehicle_scrappage::client::StoreClient;
use vehicle_scrappage::config::environment::EnvironmentConfig;
use vehicle_scrappage::routes::build_app;
use vehicle_scrappage::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Scrappage Gateway - Coordinación de desguace");
    info!("======================================================");

    let config = EnvironmentConfig::default();

    // Cliente del almacén externo de persistencia
    let store = match StoreClient::new(config.store_base_url.clone(), config.store_timeout_secs) {
        Ok(client) => {
            info!("✅ Cliente del almacén configurado: {}", config.store_base_url);
            Arc::new(client)
        }
        Err(e) => {
            error!("❌ Error configurando el cliente del almacén: {}", e);
            return Err(anyhow::anyhow!("Error del cliente del almacén: {}", e));
        }
    };

    let port = config.port;
    let app_state = AppState::new(config, store);
    let app = build_app(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar cuenta");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   POST /api/auth/logout - Cerrar sesión");
    info!("   GET  /api/auth/me - Sesión actual");
    info!("🚙 Endpoints - Vehicle:");
    info!("   POST  /api/vehicles - Registrar vehículo (propietario)");
    info!("   GET   /api/vehicles/my - Listar vehículos propios (propietario)");
    info!("   GET   /api/vehicles/:id - Obtener vehículo según rol");
    info!("   PATCH /api/vehicles/:id/status - Transicionar estado (desguazador)");
    info!("📅 Endpoints - Pickup:");
    info!("   POST /api/pickups - Programar recogida (propietario)");
    info!("   GET  /api/pickups - Recogidas asignadas (desguazador)");
    info!("📊 Endpoints - Dashboard:");
    info!("   GET  /api/dashboard/owner - Panel del propietario");
    info!("   GET  /api/dashboard/dealer - Panel del desguazador");
    info!("📄 Endpoints - Documents:");
    info!("   POST /api/documents/upload - Subir documento (propietario)");
    info!("💬 Endpoints - Assistant:");
    info!("   POST /api/assistant/chat - Asistente de chat");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
