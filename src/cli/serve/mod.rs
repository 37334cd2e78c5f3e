//! Serve command - runs the roster web front-end

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::domain::UserDirectory;
use crate::infrastructure::{InMemoryUserDirectory, Outcome, RosterClient};

/// Arguments for the serve command
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to serve on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Keep users in process memory instead of calling the directory service
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the web front-end until Ctrl+C / SIGTERM
pub async fn run(config: &AppConfig, args: ServeArgs) -> anyhow::Result<()> {
    let roster = if args.in_memory {
        info!("Using in-memory user directory");
        let directory: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
        RosterClient::new(directory)
    } else {
        info!("Using user directory at {}", config.directory.base_url);
        super::build_roster(config)?
    };

    if roster.mount().await == Outcome::Failed {
        warn!("Initial roster load failed; the page will show the error until a refresh succeeds");
    }

    let app = create_router(AppState::new(roster));
    let addr = build_socket_addr(config, &args)?;
    info!("Starting roster front-end on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

fn build_socket_addr(config: &AppConfig, args: &ServeArgs) -> anyhow::Result<SocketAddr> {
    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let port = args.port.unwrap_or(config.server.port);

    Ok(SocketAddr::from((host.parse::<std::net::IpAddr>()?, port)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
