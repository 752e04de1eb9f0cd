// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Imprint — image to PDF conversion service.
//
// Entry point. Initialises logging, reads configuration, and serves the
// conversion endpoint until Ctrl+C or SIGTERM.

use tokio::net::TcpListener;
use tokio::signal;

use imprint_core::ServerConfig;
use imprint_core::error::ImprintError;
use imprint_document::ImagePdfConverter;

#[tokio::main]
async fn main() -> Result<(), ImprintError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // A missing .env is normal outside development.
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        max_upload_bytes = ?config.max_upload_bytes,
        "Imprint starting"
    );

    let app = imprint_server::router(ImagePdfConverter::new(), &config);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
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
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
