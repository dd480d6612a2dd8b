//! aeroguide CLI and REST API entry point.
//!
//! Binary name: `aerog`
//!
//! Parses CLI arguments, wires the upstream adapters into the assistant,
//! then either starts the HTTP server (`serve`) or refreshes the cached
//! exchange-rate file (`update-rates`).

mod http;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "aerog", about = "Airport assistant service", version)]
struct Cli {
    /// Path to the service configuration file.
    #[arg(short, long, default_value = "aerog.toml", global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Override the configured port.
        #[arg(short, long)]
        port: Option<u16>,
        /// Override the configured bind host.
        #[arg(long)]
        host: Option<String>,
    },
    /// Fetch the latest exchange rates and write the cached rates file.
    UpdateRates {
        /// Base currency the table is quoted against.
        #[arg(short, long, default_value = "PLN")]
        base: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // credentials come from the environment; .env is a convenience
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,aeroguide=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = aeroguide_infra::config::load_config(&cli.config).await;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let ttl_secs = config.session.ttl_secs;

            let state = AppState::init(config).await?;
            spawn_session_eviction(state.sessions.clone(), ttl_secs);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} aeroguide listening on {}",
                console::style("✈️").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::UpdateRates { base } => {
            let path = PathBuf::from(&config.rates.path);
            let count = aeroguide_infra::rates::update_rates_file(&path, &base).await?;
            println!(
                "  {} Wrote {} currencies (base {}) to {}",
                console::style("✓").green(),
                count,
                console::style(&base).cyan(),
                path.display()
            );
        }
    }

    Ok(())
}

/// Periodically drop navigation sessions idle past the TTL.
fn spawn_session_eviction(
    sessions: std::sync::Arc<aeroguide_core::session::InMemorySessionStore>,
    ttl_secs: u64,
) {
    // sweep at a fraction of the TTL, but at least once a minute
    let period = std::time::Duration::from_secs((ttl_secs / 10).clamp(10, 60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_expired(chrono::Utc::now());
            if evicted > 0 {
                tracing::debug!(evicted, "expired navigation sessions dropped");
            }
        }
    });
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
