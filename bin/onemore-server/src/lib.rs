//! onemore-server: HTTP front of the one-more catalog.
//!
//! Two public operations sit on top of a small SQLite store:
//! - `GET /api/one-more` serves a weighted random approved item,
//! - `POST /api/submit` queues anonymous text for manual review.
//!
//! The binary in `main.rs` only parses the command line and calls [`run`].

pub mod config;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod services;
pub mod state;

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::Config;
use crate::entities::SqliteStore;
use crate::state::AppState;

/// What the process should do once configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Run the HTTP server until SIGINT / SIGTERM.
    #[default]
    Serve,
    /// Insert the starter catalog into an empty database and exit.
    Seed,
}

/// Startup order:
/// 1. Parse configuration from environment variables.
/// 2. Initialise structured tracing (JSON or pretty, stdout or rolling file).
/// 3. Open the SQLite database and run pending migrations.
/// 4. Seed, or build the Axum router and serve with graceful shutdown.
pub async fn run(command: Command) -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    // Held until the end of `run` so buffered file logs are flushed.
    let _log_guard = init_tracing(&cfg);
    info!(version = env!("CARGO_PKG_VERSION"), ?command, "onemore-server starting");

    // ── 3. Database ────────────────────────────────────────────────────────────
    let store = SqliteStore::connect(&cfg.database_url)
        .await
        .with_context(|| format!("opening database {}", cfg.database_url))?;
    info!(database_url = %cfg.database_url, "database ready");

    // ── 4. Command ─────────────────────────────────────────────────────────────
    match command {
        Command::Seed => {
            let inserted = services::seed::seed(&store).await?;
            info!(inserted, "seed complete");
        }
        Command::Serve => {
            let addr: SocketAddr = cfg
                .bind_address
                .parse()
                .with_context(|| format!("invalid ONEMORE_BIND '{}'", cfg.bind_address))?;
            let state = AppState::new(cfg, store);
            let app = routes::build(state);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, "HTTP server listening");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    info!("onemore-server stopped");
    Ok(())
}

fn init_tracing(cfg: &Config) -> Option<WorkerGuard> {
    // Build the log-level filter, warning loudly if the configured value is
    // not a valid tracing filter expression.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: ONEMORE_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let (writer, guard) = match &cfg.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "onemore-server.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(cfg.log_dir.is_none())
        .with_writer(writer);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    guard
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c   => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
