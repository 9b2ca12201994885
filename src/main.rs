use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use plant_maintenance as plant;
use plant::services::units::UnitRosterClient;
use plant::storage::{JsonFileStore, StateStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = plant::config::load_config().context("failed to load configuration")?;
    plant::config::init_tracing(&cfg.log_level, cfg.log_json);

    // Make sure the roster exists before the front-end asks for it
    let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::new(&cfg.data_dir));
    let mut state = plant::AppState::load(store);
    let roster = UnitRosterClient::new(cfg.unit_roster_url.clone(), cfg.unit_roster_timeout())?;
    state.ensure_unit_roster(&roster).await;

    if !cfg.static_dir.join("index.html").exists() {
        info!(
            "No index.html under {}; only /api routes will answer",
            cfg.static_dir.display()
        );
    }
    let app = plant::app_router(&cfg.static_dir);

    // Bind and serve
    let host: std::net::IpAddr = cfg
        .host
        .parse()
        .with_context(|| format!("invalid host address {}", cfg.host))?;
    let addr = SocketAddr::from((host, cfg.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
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
    info!("Shutdown signal received");
}
