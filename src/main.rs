//! Report engine server - main entry point.
//!
//! Loads the sheet template configuration and serves the report API.

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use report_engine::api::{AppState, create_router};
use report_engine::config::ConfigLoader;

/// Command-line arguments for the report engine server.
#[derive(Parser, Debug)]
#[command(name = "report-engine")]
#[command(about = "Aggregation and payroll report server for time-tracking and attendance sheets")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "REPORT_ENGINE_PORT")]
    port: u16,

    /// Directory holding engine.yaml and templates/
    #[arg(short, long, default_value = "./config/default", env = "REPORT_ENGINE_CONFIG")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "report_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting report engine on port {}", args.port);
    info!("Config directory: {}", args.config_dir.display());

    let config = ConfigLoader::load(&args.config_dir)?;
    info!(
        name = %config.metadata().name,
        version = %config.metadata().version,
        templates = config.config().templates().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
