//! pan-proxy server binary.
//!
//! Fronts a single cloud-drive account for the bundled web UI: QR or cookie
//! login, directory listing, search and folder creation. The provider
//! backend (mock or HTTP gateway) is chosen on the command line and wired
//! into one [`AccountSession`] shared by all requests.

mod api;
mod app;
mod config;
mod entry;
mod error;
mod format;
mod frontend;
mod http;
mod icon;
mod logging;
mod provider;
mod qr;
mod session;
mod version;

use axum_server::Handle;
use clap::Parser;
use shadow_rs::shadow;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use crate::config::{Args, ProviderKind, SHUTDOWN_GRACE_SECS};
use crate::http::build_cors_layer;
use crate::provider::Provider;
use crate::provider::gateway::GatewayProvider;
use crate::provider::mock::MockProvider;
use crate::qr::PngQrEncoder;
use crate::session::{AccountSession, SessionOptions};

shadow!(build);

/// Starts the server and blocks until shutdown.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    logging::init_logging();

    let args = Args::parse();
    let provider_timeout = Duration::from_secs(args.provider_timeout_secs);
    let provider = build_provider(&args, provider_timeout)?;
    let session = Arc::new(AccountSession::new(
        provider,
        Arc::new(PngQrEncoder),
        SessionOptions {
            demo_mode: args.demo_mode,
            provider_timeout,
        },
    ));
    info!(
        provider = ?args.provider,
        demo_mode = args.demo_mode,
        timeout_secs = args.provider_timeout_secs,
        "account session ready"
    );

    let app = app::build_router(session, build_cors_layer(args.cors_origins.as_deref()));

    let host = args
        .host
        .parse::<IpAddr>()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()))?;
    let http_addr = SocketAddr::new(host, args.http_port);
    let handle = Handle::new();

    info!("Starting HTTP server at {}", http_addr);

    let http_server = axum_server::bind(http_addr)
        .handle(handle.clone())
        .serve(app.into_make_service_with_connect_info::<SocketAddr>());

    tokio::select! {
        result = http_server => result?,
        _ = shutdown_signal(handle) => {}
    }

    Ok(())
}

fn build_provider(
    args: &Args,
    timeout: Duration,
) -> Result<Arc<dyn Provider>, std::io::Error> {
    match args.provider {
        ProviderKind::Mock => Ok(Arc::new(MockProvider::new(args.mock_confirm_after))),
        ProviderKind::Gateway => {
            let url = args.gateway_url.as_deref().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "--gateway-url is required for the gateway provider",
                )
            })?;
            let provider = GatewayProvider::new(url, timeout)
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            Ok(Arc::new(provider))
        }
    }
}

async fn shutdown_signal(handle: Handle) {
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received termination signal shutting down");
    handle.graceful_shutdown(Some(Duration::from_secs(SHUTDOWN_GRACE_SECS)));
}
