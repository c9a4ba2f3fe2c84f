mod config;
mod error;
mod extract;
mod handler;
mod select;
#[cfg(test)]
mod test_support;
mod upstream;
mod views;

use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use crate::{
    config::ServerConfig,
    error::ApiError,
    handler::{AppState, router},
    upstream::RecordingClient,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "rtv4d_downloader=info,tower_http=info".to_string()),
        )
        .init();

    if let Err(error) = run().await {
        eprintln!("Server error: {}", error.message);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ApiError> {
    let config = ServerConfig::from_env()?;

    let http_client = reqwest::Client::builder()
        .build()
        .map_err(|error| ApiError::internal(format!("Cannot create HTTP client: {error}")))?;

    let state = AppState {
        recordings: RecordingClient::new(http_client, config.api_base.clone()),
    };
    let app = router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|error| ApiError::internal(format!("Cannot listen on {addr}: {error}")))?;

    info!(
        "Downloader ready on http://{addr} (recording API {})",
        config.api_base
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|error| ApiError::internal(format!("HTTP server error: {error}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!("Cannot install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!("Cannot install SIGTERM handler: {error}");
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

    info!("Shutdown requested, draining open connections");
}
