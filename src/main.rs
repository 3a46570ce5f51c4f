use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{error, info};

use inventra::bootstrap::ensure_default_admin;
use inventra::logging::init_tracing;
use inventra::metrics::{init_metrics, metrics_app};
use inventra::router::init_router;
use inventra::state::AppState;
use inventra_config::{AdminConfig, DatabaseConfig, ObservabilityConfig, ServerConfig};
use inventra_db::{PgStore, init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    dotenvy::from_filename("config.env").ok();

    let observability = ObservabilityConfig::from_env();
    init_tracing(&observability);

    let database_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::from_env(Arc::new(PgStore::new(pool)));

    ensure_default_admin(
        state.store.as_ref(),
        &AdminConfig::from_env(),
        &state.password_config,
    )
    .await
    .context("Failed to ensure default admin")?;

    if let Some(handle) = init_metrics(&observability).context("Failed to install metrics")? {
        let metrics_addr = format!("0.0.0.0:{}", observability.metrics_port);
        let listener = tokio::net::TcpListener::bind(&metrics_addr)
            .await
            .with_context(|| format!("Failed to bind metrics server on {}", metrics_addr))?;
        info!("Metrics available at http://{}/metrics", metrics_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let server_config = ServerConfig::from_env();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_address()))?;

    info!("Server running on http://{}", server_config.bind_address());
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        server_config.bind_address()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
