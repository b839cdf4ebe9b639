use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use todo_api::config::Config;
use todo_api::routes;
use todo_api::state::AppState;
use todo_api::store::PgStore;
use todo_api::token::JwtKeys;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_api=info,tower_http=info")),
        )
        .init();

    let store = match PgStore::connect(&config.database_url, config.database_max_connections).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "error connecting DB");
            return Err(e.into());
        }
    };
    tracing::info!("DB connected");

    let keys = JwtKeys::new(&config.jwt_secret, Duration::hours(config.jwt_expiry_hours));
    let state = AppState::new(store.clone(), keys);

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;

    tracing::info!("server started on http://{}", config.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
