mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚛 Fleet Logbook - Bitácora de flota");
    info!("====================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // CORS: permisivo en desarrollo, restringido a los orígenes configurados
    // en producción
    let cors = if config.cors_origins.is_empty() || config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config);

    // Rutas protegidas por JWT
    let protected = Router::new()
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/events", routes::event_routes::create_event_router())
        .nest("/api/closures", routes::closure_routes::create_closure_router())
        .nest("/api/profiles", routes::profile_routes::create_profile_router())
        .nest(
            "/api/operational-roles",
            routes::operational_role_routes::create_operational_role_router(),
        )
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/login - Login");
    info!("🚗 Vehículos:");
    info!("   POST /api/vehicles - Crear vehículo (admin)");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/available - Vehículos disponibles");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo (admin)");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo (admin)");
    info!("📓 Bitácora:");
    info!("   POST /api/events - Crear evento");
    info!("   GET  /api/events - Listar eventos");
    info!("   GET  /api/events/:id - Obtener evento");
    info!("   PUT  /api/events/:id - Actualizar evento activo");
    info!("   POST /api/events/:id/close - Cerrar evento");
    info!("   POST /api/events/:id/cancel - Cancelar evento");
    info!("   DELETE /api/events/:id - Eliminar evento (admin)");
    info!("   GET  /api/events/vehicle/:id/stats - Estadísticas por vehículo");
    info!("📊 Cierres:");
    info!("   POST /api/closures - Crear cierre de período");
    info!("   GET  /api/closures - Listar cierres");
    info!("   GET  /api/closures/eligible-events - Eventos elegibles");
    info!("   POST /api/closures/metrics - Métricas de un conjunto de eventos");
    info!("   GET  /api/closures/:id - Obtener cierre con sus eventos");
    info!("   DELETE /api/closures/:id - Eliminar cierre (admin)");
    info!("👤 Perfiles:");
    info!("   GET  /api/profiles/me - Perfil actual");
    info!("   GET  /api/profiles - Listar perfiles (admin)");
    info!("   POST /api/profiles - Crear perfil (admin)");
    info!("   PUT  /api/profiles/:id/role - Cambiar rol (admin)");
    info!("   PUT  /api/profiles/:id/active - Activar/desactivar (admin)");
    info!("🪪 Roles operativos:");
    info!("   POST /api/operational-roles - Asignar rol (admin)");
    info!("   GET  /api/operational-roles/profile/:id - Roles de un perfil");
    info!("   POST /api/operational-roles/:id/deactivate - Desactivar rol (admin)");

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

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-logbook",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
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
