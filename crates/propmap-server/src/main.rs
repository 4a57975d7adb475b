mod api;
mod middleware;

use std::sync::Arc;

use propmap_core::MapSearchService;
use propmap_db::PgListingStore;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = propmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = propmap_db::PoolConfig::from_app_config(&config);
    let pool = propmap_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = propmap_db::run_migrations(&pool).await?;
    tracing::info!(applied, env = %config.env, "database ready");

    let store = Arc::new(PgListingStore::new(pool));
    let map = MapSearchService::new(store, config.geo.clone());
    let app = build_app(AppState { map }, rate_limit_state(&config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "propmap-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
