//! CLI entrypoint for voicelog
//!
//! This is the main binary that wires together all layers using
//! dependency injection and serves the HTTP API.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use voicelog_domain::{CommandLogRepository, SessionRepository};
use voicelog_infrastructure::{
    ConfigLoader, FileConfig, FileDatabaseConfig, FileLoggingConfig, OpenAiResponder,
    OpenAiSettings, SqliteStore,
};
use voicelog_presentation::{AppState, Cli, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(cli.verbose, &config.logging);

    info!("Starting voicelog");

    // === Dependency Injection ===
    let store = Arc::new(open_store(&config.database)?);
    let responder = OpenAiResponder::new(OpenAiSettings::from_config(&config.ai))
        .context("Failed to initialize AI provider")?;

    let sessions: Arc<dyn SessionRepository> = store.clone();
    let logs: Arc<dyn CommandLogRepository> = store;
    let state = AppState::new(
        sessions,
        logs,
        Arc::new(responder),
        config.dispatch_params(),
    );
    let app = build_router(state);

    // === Serve ===
    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(path) = &cli.database {
        config.database.path = Some(path.clone());
    }
}

/// Console logging filtered by `-v` (or `RUST_LOG`), plus a daily log file
/// when `[logging] dir` is set. The returned guard flushes the file on drop.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });
    let console = fmt::layer().with_target(false);

    match &logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, &logging.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            None
        }
    }
}

fn open_store(database: &FileDatabaseConfig) -> Result<SqliteStore> {
    match database.resolve_path() {
        Some(path) => SqliteStore::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display())),
        None => {
            info!("Using in-memory database; data is lost on exit");
            SqliteStore::open_in_memory().context("Failed to open in-memory database")
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
