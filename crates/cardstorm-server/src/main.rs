//! cardstorm server
//!
//! Serves `/health`, `/metrics` and `/generate_high_cardinality_metrics`.
//! Config comes from `$CARDSTORM_CONFIG` or `./cardstorm.yaml`; both optional.

use tracing_subscriber::{fmt, EnvFilter};

use cardstorm_core::error::{CardstormError, Result};
use cardstorm_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.client_code().as_str(), "cardstorm exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("CARDSTORM_CONFIG").ok();
    let cfg = config::load(path.as_deref())?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "cardstorm starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| CardstormError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CardstormError::Internal(format!("server failed: {e}")))?;

    tracing::info!("cardstorm stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
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
    tracing::info!("shutdown signal received, draining connections");
}
