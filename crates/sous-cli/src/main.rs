//! `sous` binary: loads settings, starts the recipe gateway.

use clap::Parser;
use sous_core::{Environment, Settings};
use sous_gateway::GatewayServer;
use sous_inference::InferenceClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sous", version, about = "Sous: recipe suggestion and parsing gateway")]
struct Cli {
    /// Dotenv file loaded before reading the environment (ignored if absent)
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Host to bind to (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_file_loaded = load_env_file(&cli.env_file)?;

    let mut settings = Settings::from_env()?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }

    init_tracing(settings.environment);
    if !env_file_loaded {
        warn!(path = %cli.env_file.display(), "Env file not found, using process environment only");
    }

    info!(
        app = %settings.app_name,
        environment = %settings.environment,
        model = %settings.model.model_id,
        origins = ?settings.allowed_origins,
        "Starting {}",
        settings.app_name
    );

    let settings = Arc::new(settings);
    let inference = Arc::new(InferenceClient::new(&settings.model));
    let app = GatewayServer::build(settings.clone(), inference);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;
    info!("Sous gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Sous gateway stopped");
    Ok(())
}

/// Loads `path` into the process environment. Returns false if it does not exist.
fn load_env_file(path: &Path) -> anyhow::Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(anyhow::anyhow!(
            "Failed to load env file '{}': {}",
            path.display(),
            e
        )),
    }
}

/// JSON logs in production, compact human-readable logs elsewhere.
fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if environment.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).compact().init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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
