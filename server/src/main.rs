use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use vibetribe_server::config::Config;
use vibetribe_server::routes::create_routes;
use vibetribe_server::session::SessionStore;
use vibetribe_server::state::AppState;
use vibetribe_server::upstream::HttpBackend;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vibetribe_server=info,tower_http=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let backend = match HttpBackend::new(config.upstream_base_url.clone(), config.upstream_timeout) {
        Ok(backend) => backend,
        Err(err) => {
            tracing::error!(error = %err, "Failed to build upstream client");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(upstream = %config.upstream_base_url, "Upstream client ready");

    let addr = config.bind_addr;
    let state = AppState::new(config, Arc::new(backend));
    tokio::spawn(sweep_sessions(state.sessions.clone()));

    let app = create_routes(state);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "Failed to bind address");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("🚀 Server running at http://{}", addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "Server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn sweep_sessions(sessions: SessionStore) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let removed = sessions.purge_expired(Utc::now()).await;
        if removed > 0 {
            tracing::debug!(removed, "Purged expired sessions");
        }
    }
}
