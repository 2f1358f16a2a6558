//! Sample microservice entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*};

use sample_microservice::api::{create_router, AppState};
use sample_microservice::config::Config;
use sample_microservice::error::{Result, ServiceError};
use sample_microservice::utils::shutdown_signal;

/// Sample HTTP microservice for CI/CD demos.
#[derive(Parser, Debug)]
#[command(name = "sample-microservice")]
#[command(about = "Minimal HTTP microservice with health, echo, info and metrics endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address (overrides HOST).
    #[arg(long)]
    host: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first so RUST_LOG from .env reaches the subscriber
    let loaded = Config::load();

    // Initialize logging
    let filter = match &loaded {
        Ok(config) => config.log_filter(args.verbose),
        Err(_) => Config::default().log_filter(args.verbose),
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(loaded),
        Some(Command::Serve { port, host }) => cmd_serve(loaded, port, host).await,
        None => cmd_serve(loaded, args.port, args.host).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(loaded: Result<Config>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SAMPLE MICROSERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Environment: {}", config.environment);
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    loaded: Result<Config>,
    port: Option<u16>,
    host: Option<String>,
) -> anyhow::Result<()> {
    let mut config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }

    let addr = config.bind_addr().map_err(ServiceError::InvalidConfig)?;

    let app_state = AppState::new(&config);
    info!(
        service_id = app_state.service_id(),
        environment = app_state.environment(),
        "Service identity established"
    );

    let listener = TcpListener::bind(addr).await.map_err(ServiceError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::from)?;

    info!("Server stopped");
    Ok(())
}
